//! Pencil decomposition
use crate::{
    decomposition::types::{ProcessGrid, Step},
    errors::MpiFftError,
    traits::decomposition::Strategy,
    types::{Alignment, TransformKind},
};

/// Three dimensional arrays distributed along two axes over a two dimensional process grid `[p0, p1]`.
///
/// In physical space the first axis is split over grid axis 0 and the second over grid axis 1. The
/// last axis is transformed first, then the transposes make the aligned axis and finally the remaining
/// axis local.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pencil {
    /// Axis transformed between the two transposes
    pub alignment: Alignment,

    /// Explicit process grid, factorised from the group size if absent
    pub grid: Option<[usize; 2]>,
}

/// Factorise `size` into the most balanced grid `[p0, p1]` with `p0 >= p1`.
pub fn balanced_grid(size: usize) -> [usize; 2] {
    let p1 = (1..=size)
        .take_while(|d| d * d <= size)
        .filter(|d| size % d == 0)
        .last()
        .unwrap_or(1);
    [size / p1.max(1), p1]
}

impl Strategy for Pencil {
    fn ndim(&self) -> usize {
        3
    }

    fn grid(&self, size: usize, rank: usize) -> Result<ProcessGrid, MpiFftError> {
        let dims = match self.grid {
            Some(dims) => {
                if dims[0] * dims[1] != size {
                    return Err(MpiFftError::Configuration(format!(
                        "process grid {dims:?} does not match a group of {size} processes"
                    )));
                }
                dims
            }
            None => balanced_grid(size),
        };
        Ok(ProcessGrid::planar(dims, rank))
    }

    fn physical_distribution(&self) -> Vec<Option<usize>> {
        vec![Some(0), Some(1), None]
    }

    fn forward_steps(&self, kind: TransformKind) -> Vec<Step> {
        let first = match kind {
            TransformKind::RealToComplex => Step::Real { axis: 2 },
            TransformKind::ComplexToComplex => Step::Complex { axis: 2 },
        };

        match self.alignment {
            Alignment::Y => vec![
                first,
                Step::Transpose {
                    group: 1,
                    gather: 1,
                    scatter: 2,
                },
                Step::Complex { axis: 1 },
                Step::Transpose {
                    group: 0,
                    gather: 0,
                    scatter: 1,
                },
                Step::Complex { axis: 0 },
            ],
            Alignment::X => vec![
                first,
                Step::Transpose {
                    group: 0,
                    gather: 0,
                    scatter: 2,
                },
                Step::Complex { axis: 0 },
                Step::Transpose {
                    group: 1,
                    gather: 1,
                    scatter: 0,
                },
                Step::Complex { axis: 1 },
            ],
        }
    }
}
