//! # Trait Definitions
pub mod communicator;
pub mod decomposition;
pub mod fft;
pub mod scalar;
pub mod transform;
pub mod transpose;
