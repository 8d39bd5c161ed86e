//! # Distributed Transform Pipeline
//!
//! Composition of local transforms, global transposes and dealiasing into forward and inverse transforms
//! of distributed arrays.
//!
//! # Features
//! * Real-to-complex and complex-to-complex transforms of two and three dimensional arrays.
//! * Construction through a builder, validated once, after which the transform is immutable.
//! * Pure queries of global and local shapes and slices, with and without 3/2-rule padding.
//! * Wavenumbers of the local spectral block for pseudo-spectral solvers.
mod builder;
mod execute;
mod queries;
pub mod types;

pub use types::{DistributedFft, DistributedFftBuilder, FftConfig, C2C, R2C};
