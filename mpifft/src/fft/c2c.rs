//! # Complex to Complex Transform
use num::Zero;
use num_complex::Complex;
use rayon::prelude::*;

use super::helpers::validate_shape;
use super::r2c::{backward_real, forward_real};
use super::types::{FftError, RustFft};
use crate::{traits::fft::LocalFft, traits::scalar::RealScalar, types::Sign};

/// Target number of elements per batch of contiguous lanes handed to a worker.
const BATCH_SIZE: usize = 1 << 14;

impl<T: RealScalar> LocalFft<T> for RustFft<T> {
    fn c2c(
        &self,
        data: &mut [Complex<T>],
        shape: &[usize],
        axis: usize,
        sign: Sign,
    ) -> Result<(), FftError> {
        validate_shape(shape, data.len())?;
        if axis >= shape.len() {
            return Err(FftError::InvalidDimensionError {
                shape: shape.to_vec(),
                found: data.len(),
            });
        }
        if data.is_empty() {
            return Ok(());
        }

        let n = shape[axis];
        let plan = self.plan(n)?;
        let fft = match sign {
            Sign::Forward => &plan.forward,
            Sign::Backward => &plan.backward,
        };
        let scratch_len = fft.get_inplace_scratch_len();

        // Number of interleaved lanes in each block of the buffer
        let inner: usize = shape[axis + 1..].iter().product();

        self.pool.install(|| {
            if inner == 1 {
                // Lanes are contiguous, batch several per task
                let batch = (BATCH_SIZE / n).max(1) * n;
                data.par_chunks_mut(batch).for_each_init(
                    || vec![Complex::zero(); scratch_len],
                    |scratch, lanes| fft.process_with_scratch(lanes, scratch),
                );
            } else {
                // Gather interleaved lanes of each block into a contiguous work buffer and back
                let block = n * inner;
                data.par_chunks_exact_mut(block).for_each_init(
                    || {
                        (
                            vec![Complex::zero(); block],
                            vec![Complex::zero(); scratch_len],
                        )
                    },
                    |(work, scratch), chunk| {
                        for j in 0..n {
                            for s in 0..inner {
                                work[s * n + j] = chunk[j * inner + s];
                            }
                        }
                        fft.process_with_scratch(work, scratch);
                        for j in 0..n {
                            for s in 0..inner {
                                chunk[j * inner + s] = work[s * n + j];
                            }
                        }
                    },
                );
            }
        });

        Ok(())
    }

    fn r2c(
        &self,
        input: &[T],
        output: &mut [Complex<T>],
        shape: &[usize],
    ) -> Result<(), FftError> {
        forward_real(self, input, output, shape)
    }

    fn c2r(
        &self,
        input: &[Complex<T>],
        output: &mut [T],
        shape: &[usize],
    ) -> Result<(), FftError> {
        backward_real(self, input, output, shape)
    }
}
