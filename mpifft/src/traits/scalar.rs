//! Scalar types supported by distributed transforms
use bytemuck::Pod;
use num::Float;
use rustfft::FftNum;

use crate::types::Precision;

/// Real floating point type of a transform, carrying its precision explicitly so that it is never
/// inferred from a buffer at runtime.
pub trait RealScalar: FftNum + Float + Pod + Default + Send + Sync {
    /// Precision selector matching this type
    const PRECISION: Precision;

    /// Convert the ratio `num / den` to this type, computed in double precision.
    fn ratio(num: usize, den: usize) -> Self;

    /// Convert a double precision value to this type.
    fn from_f64_lossy(value: f64) -> Self;
}

impl RealScalar for f32 {
    const PRECISION: Precision = Precision::Single;

    fn ratio(num: usize, den: usize) -> Self {
        (num as f64 / den as f64) as f32
    }

    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }
}

impl RealScalar for f64 {
    const PRECISION: Precision = Precision::Double;

    fn ratio(num: usize, den: usize) -> Self {
        num as f64 / den as f64
    }

    fn from_f64_lossy(value: f64) -> Self {
        value
    }
}
