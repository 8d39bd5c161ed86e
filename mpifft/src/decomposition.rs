//! # Domain Decomposition
//!
//! Process grids, axis splitting rules and the plans describing which array axes are distributed, and
//! over which sub-group, at every stage of a distributed transform.
//!
//! # Features
//! * Slab decompositions of two and three dimensional arrays over a one dimensional process grid.
//! * Pencil decompositions of three dimensional arrays over a two dimensional process grid, with either
//!   alignment between the transposes.
//! * Line decompositions of two dimensional arrays.
//! * Local shapes and slices computed without communication, so they are available as pure queries.
mod line;
mod pencil;
pub mod plan;
pub mod shape;
mod slab;
pub mod types;

pub use line::Line;
pub use pencil::Pencil;
pub use slab::Slab;

use crate::{errors::MpiFftError, traits::decomposition::Strategy, types::Decomposition};

/// Strategy implementing a decomposition of `ndim` dimensional arrays.
pub fn strategy(
    decomposition: Decomposition,
    ndim: usize,
) -> Result<Box<dyn Strategy + Send + Sync>, MpiFftError> {
    match decomposition {
        Decomposition::Slab => {
            if ndim == 2 || ndim == 3 {
                Ok(Box::new(Slab { ndim }))
            } else {
                Err(MpiFftError::Configuration(format!(
                    "slab decomposition requires two or three dimensions, found {ndim}"
                )))
            }
        }
        Decomposition::Pencil { alignment, grid } => {
            if ndim == 3 {
                Ok(Box::new(Pencil { alignment, grid }))
            } else {
                Err(MpiFftError::Configuration(format!(
                    "pencil decomposition requires three dimensions, found {ndim}"
                )))
            }
        }
        Decomposition::Line => {
            if ndim == 2 {
                Ok(Box::new(Line))
            } else {
                Err(MpiFftError::Configuration(format!(
                    "line decomposition requires two dimensions, found {ndim}"
                )))
            }
        }
    }
}
