//! # Global Transposes
//!
//! Redistribution of a distributed array between two layouts of a sub-group, making one axis local and
//! distributing another.
//!
//! # Features
//! * Uniform exchanges of equal sized blocks with a plain all-to-all.
//! * Padded uniform exchanges, blocks packed into equal sized zero padded slots.
//! * Generalised exchanges of variable sized blocks.
//! * Packing of outgoing blocks parallelised over peers.
mod generalized;
mod pack;
mod padded;
pub mod types;
mod uniform;

pub use types::{ExchangeEngine, GeneralizedExchange, PaddedUniformExchange, Redistribution, UniformExchange};
