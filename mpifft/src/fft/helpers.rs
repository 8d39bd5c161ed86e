//! Helper functions
use crate::{fft::types::FftError, helpers::n_elements};

/// Validate that a buffer holds exactly the elements of a shape.
///
/// # Arguments
/// * `shape` - Expected shape.
/// * `len` - Length of the buffer.
pub fn validate_shape(shape: &[usize], len: usize) -> Result<(), FftError> {
    if !shape.is_empty() && n_elements(shape) == len {
        Ok(())
    } else {
        Err(FftError::InvalidDimensionError {
            shape: shape.to_vec(),
            found: len,
        })
    }
}

/// Shape of the output of a real-to-complex transform along the last axis.
pub fn reduced_shape(shape: &[usize]) -> Vec<usize> {
    let mut reduced = shape.to_vec();
    if let Some(last) = reduced.last_mut() {
        *last = *last / 2 + 1;
    }
    reduced
}
