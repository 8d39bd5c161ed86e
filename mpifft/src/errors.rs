//! # Error Types
use thiserror::Error;

use crate::fft::types::FftError;

/// Errors raised by distributed transforms, always detected on the calling process at the
/// call that violates the contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MpiFftError {
    /// An unknown identifier, or a combination of parameters that no decomposition supports.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A distributed axis that cannot be split with the selected exchange strategy.
    #[error("axis {axis} of extent {extent} cannot be split over {parts} ranks: {reason}")]
    Shape {
        /// Axis being split
        axis: usize,
        /// Global extent of the axis at this stage of the pipeline
        extent: usize,
        /// Number of ranks sharing the axis
        parts: usize,
        /// Reason the split was rejected
        reason: &'static str,
    },

    /// A caller supplied buffer inconsistent with the active layout.
    #[error("buffer of length {found} does not match local shape {shape:?} ({expected} elements)")]
    ShapeMismatch {
        /// Local shape required by the active layout
        shape: Vec<usize>,
        /// Number of elements required
        expected: usize,
        /// Number of elements supplied
        found: usize,
    },

    /// Failure propagated from a collective exchange.
    #[error("communication failure: {0}")]
    Communication(String),
}

impl MpiFftError {
    /// Check that a buffer holds exactly the elements of a local shape.
    pub fn check_len(shape: &[usize], found: usize) -> Result<(), MpiFftError> {
        let expected = shape.iter().product();
        if expected == found {
            Ok(())
        } else {
            Err(MpiFftError::ShapeMismatch {
                shape: shape.to_vec(),
                expected,
                found,
            })
        }
    }
}

impl From<FftError> for MpiFftError {
    fn from(err: FftError) -> Self {
        match err {
            FftError::InvalidPlanError(msg) => MpiFftError::Configuration(msg),
            FftError::InvalidDimensionError { shape, found } => MpiFftError::ShapeMismatch {
                expected: shape.iter().product(),
                shape,
                found,
            },
        }
    }
}
