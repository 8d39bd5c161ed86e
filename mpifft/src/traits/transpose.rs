//! Global transposes
use bytemuck::Pod;

use crate::{
    errors::MpiFftError, traits::communicator::Communicator,
    transpose::types::Redistribution,
};

/// Interface for a strategy redistributing an array between two layouts of a process group.
pub trait Transpose {
    /// Redistribute `input`, held in the source layout of `redistribution`, into `output`, held in its
    /// target layout. Collective over `comm`, `output` is overwritten entirely.
    ///
    /// # Arguments
    /// * `comm` - The group sharing the redistributed axes.
    /// * `redistribution` - Source and target layouts.
    /// * `input` - Local buffer in the source layout.
    /// * `output` - Local buffer in the target layout.
    fn transpose<E: Pod + Send + Sync, C: Communicator>(
        &self,
        comm: &C,
        redistribution: &Redistribution,
        input: &[E],
        output: &mut [E],
    ) -> Result<(), MpiFftError>;
}
