//! Distributed transforms
use num_complex::Complex;

use crate::{errors::MpiFftError, traits::scalar::RealScalar, types::Dealias};

/// Interface for a forward and inverse transform of an array distributed over a process group.
///
/// Both operations are collective: every process of the group must call them with its own local
/// buffers. Buffers are checked against the local layout of the active dealias mode before any
/// communication takes place.
pub trait DistributedTransform {
    /// Real type of the transform
    type Real: RealScalar;

    /// Element type of the physical (untransformed) array
    type Physical: Copy;

    /// Transform a local physical array into the local part of its spectrum.
    ///
    /// # Arguments
    /// * `input` - Physical array of shape `local_real_shape`, or `local_real_shape_padded` under the 3/2-rule.
    /// * `output` - Spectral array of shape `local_complex_shape`, overwritten.
    /// * `dealias` - Dealiasing applied to this call.
    fn forward(
        &self,
        input: &[Self::Physical],
        output: &mut [Complex<Self::Real>],
        dealias: Dealias,
    ) -> Result<(), MpiFftError>;

    /// Transform the local part of a spectrum back into physical space.
    ///
    /// # Arguments
    /// * `input` - Spectral array of shape `local_complex_shape`.
    /// * `output` - Physical array of shape `local_real_shape`, or `local_real_shape_padded` under the 3/2-rule, overwritten.
    /// * `dealias` - Dealiasing applied to this call.
    fn inverse(
        &self,
        input: &[Complex<Self::Real>],
        output: &mut [Self::Physical],
        dealias: Dealias,
    ) -> Result<(), MpiFftError>;
}
