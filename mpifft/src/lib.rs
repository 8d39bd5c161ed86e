//! # Distributed Multidimensional Fast Fourier Transforms
//!
//! Parallel real-to-complex and complex-to-complex FFTs of two and three dimensional arrays that are
//! too large to be held by a single process, designed for pseudo-spectral solvers.
//!
//! Notable features of this library are:
//! * Slab, pencil and line domain decompositions, with local shapes and slices available as pure queries.
//! * Three exchange strategies for the global transposes: uniform blocks, padded uniform blocks and fully
//!   generalised variable sized blocks.
//! * Alias free evaluation of nonlinear terms with the 3/2-rule (zero padding) or the 2/3-rule (truncation).
//! * A single process group as a deterministic reference, an in-process threaded group, and MPI via the `mpi` feature.
//!
//! ## Example usage
//!
//! ```rust
//! use mpifft::{comm::SelfComm, DistributedFftBuilder, traits::transform::DistributedTransform, types::Dealias};
//! use num_complex::Complex;
//!
//! let fft = DistributedFftBuilder::<f64, _>::new()
//!     .shape(&[8, 8, 8])
//!     .communicator(SelfComm)
//!     .build_r2c()
//!     .unwrap();
//!
//! let a = vec![1.0; fft.local_real_shape().iter().product()];
//! let mut c = vec![Complex::new(0.0, 0.0); fft.local_complex_shape().iter().product()];
//! fft.forward(&a, &mut c, Dealias::None).unwrap();
//! assert!((c[0].re - 512.0).abs() < 1e-10);
//! ```
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod comm;
pub mod dealias;
pub mod decomposition;
pub mod errors;
pub mod fft;
pub mod helpers;
pub mod pipeline;
pub mod traits;
pub mod transpose;
pub mod types;

// Public API
#[doc(inline)]
pub use errors::MpiFftError;
#[doc(inline)]
pub use pipeline::types::DistributedFft;
#[doc(inline)]
pub use pipeline::types::DistributedFftBuilder;
#[doc(inline)]
pub use pipeline::types::FftConfig;
#[doc(inline)]
pub use pipeline::types::C2C;
#[doc(inline)]
pub use pipeline::types::R2C;
