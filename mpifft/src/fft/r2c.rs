//! # Real to Complex Transform
use num::Zero;
use num_complex::Complex;
use rayon::prelude::*;

use super::helpers::{reduced_shape, validate_shape};
use super::types::{FftError, RustFft};
use crate::traits::scalar::RealScalar;

/// Real-to-complex transform of every lane along the last axis.
pub(crate) fn forward_real<T: RealScalar>(
    kernel: &RustFft<T>,
    input: &[T],
    output: &mut [Complex<T>],
    shape: &[usize],
) -> Result<(), FftError> {
    validate_shape(shape, input.len())?;
    validate_shape(&reduced_shape(shape), output.len())?;
    if input.is_empty() {
        return Ok(());
    }

    let n = shape[shape.len() - 1];
    let nf = n / 2 + 1;
    let fft = &kernel.plan(n)?.forward;
    let scratch_len = fft.get_inplace_scratch_len();

    kernel.pool.install(|| {
        input
            .par_chunks_exact(n)
            .zip(output.par_chunks_exact_mut(nf))
            .for_each_init(
                || {
                    (
                        vec![Complex::zero(); n],
                        vec![Complex::zero(); scratch_len],
                    )
                },
                |(buffer, scratch), (lane, out)| {
                    for (b, &x) in buffer.iter_mut().zip(lane) {
                        *b = Complex::new(x, T::zero());
                    }
                    fft.process_with_scratch(buffer, scratch);
                    out.copy_from_slice(&buffer[..nf]);
                },
            );
    });

    Ok(())
}

/// Complex-to-real transform of every lane along the last axis, the input is assumed Hermitian.
pub(crate) fn backward_real<T: RealScalar>(
    kernel: &RustFft<T>,
    input: &[Complex<T>],
    output: &mut [T],
    shape: &[usize],
) -> Result<(), FftError> {
    validate_shape(shape, output.len())?;
    validate_shape(&reduced_shape(shape), input.len())?;
    if output.is_empty() {
        return Ok(());
    }

    let n = shape[shape.len() - 1];
    let nf = n / 2 + 1;
    let fft = &kernel.plan(n)?.backward;
    let scratch_len = fft.get_inplace_scratch_len();

    kernel.pool.install(|| {
        input
            .par_chunks_exact(nf)
            .zip(output.par_chunks_exact_mut(n))
            .for_each_init(
                || {
                    (
                        vec![Complex::zero(); n],
                        vec![Complex::zero(); scratch_len],
                    )
                },
                |(buffer, scratch), (lane, out)| {
                    buffer[..nf].copy_from_slice(lane);
                    for k in nf..n {
                        buffer[k] = lane[n - k].conj();
                    }
                    // Imaginary parts of the zero and Nyquist modes are discarded
                    buffer[0].im = T::zero();
                    if n % 2 == 0 {
                        buffer[n / 2].im = T::zero();
                    }
                    fft.process_with_scratch(buffer, scratch);
                    for (o, b) in out.iter_mut().zip(buffer.iter()) {
                        *o = b.re;
                    }
                },
            );
    });

    Ok(())
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use num_complex::Complex;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::{fft::types::RustFft, traits::fft::LocalFft, types::PlannerEffort};

    #[test]
    fn test_r2c2r_identity() {
        let mut rng = StdRng::seed_from_u64(0);

        for shape in [vec![4, 3, 8], vec![5, 7]] {
            let n = *shape.last().unwrap();
            let nf = n / 2 + 1;
            let kernel =
                RustFft::<f64>::new(&[(n, PlannerEffort::Measure)], Some(2)).unwrap();

            let len: usize = shape.iter().product();
            let input = (0..len).map(|_| rng.gen::<f64>()).collect::<Vec<_>>();
            let mut spectral = vec![Complex::new(0.0, 0.0); len / n * nf];
            let mut output = vec![0.0; len];

            kernel.r2c(&input, &mut spectral, &shape).unwrap();
            kernel.c2r(&spectral, &mut output, &shape).unwrap();

            for (o, i) in output.iter().zip(input.iter()) {
                assert_relative_eq!(o / n as f64, i, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_r2c_single_mode() {
        let n = 6;
        let kernel = RustFft::<f32>::new(&[(n, PlannerEffort::Estimate)], Some(1)).unwrap();
        let input = (0..n)
            .map(|j| (2.0 * std::f32::consts::PI * j as f32 / n as f32).cos())
            .collect::<Vec<_>>();
        let mut spectral = vec![Complex::new(0f32, 0f32); n / 2 + 1];
        kernel.r2c(&input, &mut spectral, &[n]).unwrap();

        for (k, c) in spectral.iter().enumerate() {
            let expected = if k == 1 { n as f32 / 2.0 } else { 0.0 };
            assert_relative_eq!(c.re, expected, epsilon = 1e-5);
            assert_relative_eq!(c.im, 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_r2c_invalid_output() {
        let kernel = RustFft::<f64>::new(&[(8, PlannerEffort::Measure)], Some(1)).unwrap();
        let input = vec![0.0; 16];
        let mut spectral = vec![Complex::new(0.0, 0.0); 8];
        assert!(kernel.r2c(&input, &mut spectral, &[2, 8]).is_err());
    }
}
