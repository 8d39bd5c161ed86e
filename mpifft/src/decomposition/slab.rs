//! Slab decomposition
use crate::{
    decomposition::types::{ProcessGrid, Step},
    errors::MpiFftError,
    traits::decomposition::Strategy,
    types::TransformKind,
};

/// The first axis is distributed in physical space and the second in spectral space, over a one
/// dimensional process grid spanning the whole group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slab {
    /// Number of array axes, two or three
    pub ndim: usize,
}

/// Steps of a transform with one transpose, shared by slab and line decompositions.
pub(crate) fn single_transpose_steps(ndim: usize, kind: TransformKind) -> Vec<Step> {
    let last = ndim - 1;
    let mut steps = vec![match kind {
        TransformKind::RealToComplex => Step::Real { axis: last },
        TransformKind::ComplexToComplex => Step::Complex { axis: last },
    }];
    steps.extend((1..last).rev().map(|axis| Step::Complex { axis }));
    steps.push(Step::Transpose {
        group: 0,
        gather: 0,
        scatter: 1,
    });
    steps.push(Step::Complex { axis: 0 });
    steps
}

impl Strategy for Slab {
    fn ndim(&self) -> usize {
        self.ndim
    }

    fn grid(&self, size: usize, rank: usize) -> Result<ProcessGrid, MpiFftError> {
        Ok(ProcessGrid::linear(size, rank))
    }

    fn physical_distribution(&self) -> Vec<Option<usize>> {
        let mut distribution = vec![None; self.ndim];
        distribution[0] = Some(0);
        distribution
    }

    fn forward_steps(&self, kind: TransformKind) -> Vec<Step> {
        single_transpose_steps(self.ndim, kind)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        decomposition::{types::Step, Slab},
        traits::decomposition::Strategy,
        types::TransformKind,
    };

    #[test]
    fn test_slab_steps() {
        let slab = Slab { ndim: 3 };
        assert_eq!(
            slab.forward_steps(TransformKind::RealToComplex),
            vec![
                Step::Real { axis: 2 },
                Step::Complex { axis: 1 },
                Step::Transpose {
                    group: 0,
                    gather: 0,
                    scatter: 1
                },
                Step::Complex { axis: 0 },
            ]
        );
        assert_eq!(slab.physical_distribution(), vec![Some(0), None, None]);
    }
}
