//! # Local Transforms
//!
//! Single process transforms delegated to RustFFT, applied along one axis of row-major data.
//!
//! # Features
//! * Complex-to-complex transforms along any axis, lanes along inner axes gathered into contiguous batches.
//! * Real-to-complex and complex-to-real transforms along the last axis.
//! * Plans created once for every required length, lanes processed in parallel on a dedicated thread pool.
mod c2c;
mod helpers;
mod r2c;
pub mod types;

pub use types::RustFft;
