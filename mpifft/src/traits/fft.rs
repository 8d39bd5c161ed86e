//! Local Fourier transform kernel
use num_complex::Complex;

use crate::{fft::types::FftError, traits::scalar::RealScalar, types::Sign};

/// Interface for single process transforms of row-major multidimensional data, applied along one
/// axis for every lane of the buffer. Transforms are unnormalised in both directions.
///
/// # Example usage
///
/// ```rust
/// use mpifft::fft::types::RustFft;
/// use mpifft::traits::fft::LocalFft;
/// use mpifft::types::{PlannerEffort, Sign};
/// use num_complex::Complex;
///
/// let shape = [4, 6];
/// let kernel = RustFft::<f64>::new(&[(4, PlannerEffort::Estimate), (6, PlannerEffort::Estimate)], Some(1)).unwrap();
///
/// let real = (0..24).map(|i| i as f64).collect::<Vec<_>>();
/// let mut spectral = vec![Complex::new(0.0, 0.0); 4 * (6 / 2 + 1)];
/// kernel.r2c(&real, &mut spectral, &shape).unwrap();
/// kernel.c2c(&mut spectral, &[4, 6 / 2 + 1], 0, Sign::Forward).unwrap();
/// assert!((spectral[0].re - 276.0).abs() < 1e-10);
/// ```
pub trait LocalFft<T: RealScalar> {
    /// Complex-to-complex transform along `axis` of a buffer of shape `shape`, in place.
    ///
    /// # Arguments
    /// * `data` - Buffer of shape `shape`.
    /// * `shape` - Shape of the buffer.
    /// * `axis` - Axis along which each lane is transformed.
    /// * `sign` - Direction of the transform.
    fn c2c(
        &self,
        data: &mut [Complex<T>],
        shape: &[usize],
        axis: usize,
        sign: Sign,
    ) -> Result<(), FftError>;

    /// Real-to-complex transform along the last axis. Returns an output of shape `[.., n/2 + 1]`.
    ///
    /// # Arguments
    /// * `input` - Real buffer of shape `shape`.
    /// * `output` - Complex buffer of shape `shape` with the last axis reduced to `n/2 + 1`.
    /// * `shape` - Shape of the real buffer.
    fn r2c(&self, input: &[T], output: &mut [Complex<T>], shape: &[usize])
        -> Result<(), FftError>;

    /// Complex-to-real transform along the last axis, the inverse of [`LocalFft::r2c`] up to a factor `n`.
    ///
    /// # Arguments
    /// * `input` - Complex buffer with the last axis reduced to `n/2 + 1`.
    /// * `output` - Real buffer of shape `shape`.
    /// * `shape` - Shape of the real buffer.
    fn c2r(&self, input: &[Complex<T>], output: &mut [T], shape: &[usize])
        -> Result<(), FftError>;
}
