//! Line decomposition
use crate::{
    decomposition::{
        slab::single_transpose_steps,
        types::{ProcessGrid, Step},
    },
    errors::MpiFftError,
    traits::decomposition::Strategy,
    types::TransformKind,
};

/// Two dimensional arrays distributed along the first axis in physical space and the second in spectral space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Line;

impl Strategy for Line {
    fn ndim(&self) -> usize {
        2
    }

    fn grid(&self, size: usize, rank: usize) -> Result<ProcessGrid, MpiFftError> {
        Ok(ProcessGrid::linear(size, rank))
    }

    fn physical_distribution(&self) -> Vec<Option<usize>> {
        vec![Some(0), None]
    }

    fn forward_steps(&self, kind: TransformKind) -> Vec<Step> {
        single_transpose_steps(2, kind)
    }
}
