//! Decomposition strategies
use crate::{
    decomposition::types::{ProcessGrid, Step},
    errors::MpiFftError,
    types::TransformKind,
};

/// Interface for a domain decomposition topology.
///
/// A strategy fixes the process grid, which grid axis distributes each array axis in physical
/// space, and the sequence of local transforms and transposes taking the physical layout to the
/// spectral layout. Local shapes and slices of every stage follow from these three choices.
pub trait Strategy {
    /// Number of array axes supported.
    fn ndim(&self) -> usize;

    /// Process grid of a group of `size` processes, as seen from `rank`.
    fn grid(&self, size: usize, rank: usize) -> Result<ProcessGrid, MpiFftError>;

    /// Grid axis distributing each array axis of the physical layout.
    fn physical_distribution(&self) -> Vec<Option<usize>>;

    /// Steps of the forward transform, from the physical to the spectral layout.
    fn forward_steps(&self, kind: TransformKind) -> Vec<Step>;
}
