//! Plans of a distributed transform
use itertools::Itertools;

use crate::{
    decomposition::{
        shape::split_extent,
        types::{AxisSplit, Layout, Plan, ProcessGrid, Step},
    },
    errors::MpiFftError,
    helpers::padded_extent,
    traits::decomposition::Strategy,
    transpose::types::Redistribution,
    types::{Exchange, TransformKind},
};

impl Layout {
    /// Create a layout, computing the local block of the process at `grid.coords`.
    pub fn new(
        extents: Vec<usize>,
        splits: Vec<Option<AxisSplit>>,
        reduced: Option<usize>,
        grid: &ProcessGrid,
    ) -> Self {
        let local = extents
            .iter()
            .zip(splits.iter())
            .map(|(&extent, split)| match split {
                Some(split) => split.ranges[grid.coords[split.group]].clone(),
                None => 0..extent,
            })
            .collect();

        Self {
            extents,
            splits,
            local,
            reduced,
        }
    }

    /// Layout following a forward step.
    ///
    /// # Arguments
    /// * `step` - Step applied to this layout.
    /// * `lengths` - Global transform lengths, the extents of the spectral array before reduction.
    /// * `grid` - Process grid of the group.
    /// * `exchange` - Exchange strategy used by transposes.
    pub fn apply(
        &self,
        step: &Step,
        lengths: &[usize],
        grid: &ProcessGrid,
        exchange: Exchange,
    ) -> Result<Layout, MpiFftError> {
        let mut extents = self.extents.clone();
        let mut splits = self.splits.clone();
        let mut reduced = self.reduced;

        match *step {
            Step::Real { axis } | Step::Complex { axis } => {
                if splits[axis].is_some() {
                    return Err(MpiFftError::Configuration(format!(
                        "axis {axis} is distributed when it is transformed"
                    )));
                }
                if let Step::Real { .. } = step {
                    extents[axis] = lengths[axis] / 2 + 1;
                    reduced = Some(axis);
                } else {
                    extents[axis] = lengths[axis];
                }
            }

            Step::Transpose {
                group,
                gather,
                scatter,
            } => {
                if splits[scatter].is_some() || splits[gather].is_none() {
                    return Err(MpiFftError::Configuration(format!(
                        "cannot gather axis {gather} and scatter axis {scatter} of this layout"
                    )));
                }
                splits[gather] = None;
                splits[scatter] = Some(AxisSplit {
                    group,
                    ranges: split_extent(
                        scatter,
                        extents[scatter],
                        grid.dims[group],
                        exchange,
                        reduced == Some(scatter),
                    )?,
                });
            }
        }

        Ok(Layout::new(extents, splits, reduced, grid))
    }
}

impl Plan {
    /// Plan the forward transform of an array with global transform lengths `lengths`, as seen by the
    /// process at `grid.coords`. With `padded`, the physical array is held at 3/2 of the resolution of
    /// each axis and every local transform truncates back to `lengths`.
    ///
    /// # Arguments
    /// * `strategy` - Decomposition topology.
    /// * `grid` - Process grid of the group.
    /// * `kind` - Element kind of the physical array.
    /// * `lengths` - Global transform lengths.
    /// * `padded` - Whether to plan the padded physical layout.
    /// * `exchange` - Exchange strategy used by transposes.
    pub fn new<S: Strategy + ?Sized>(
        strategy: &S,
        grid: &ProcessGrid,
        kind: TransformKind,
        lengths: &[usize],
        padded: bool,
        exchange: Exchange,
    ) -> Result<Self, MpiFftError> {
        let physical = if padded {
            lengths.iter().map(|&n| padded_extent(n)).collect_vec()
        } else {
            lengths.to_vec()
        };

        let splits = strategy
            .physical_distribution()
            .into_iter()
            .enumerate()
            .map(|(axis, group)| {
                group
                    .map(|group| {
                        split_extent(axis, physical[axis], grid.dims[group], exchange, false)
                            .map(|ranges| AxisSplit { group, ranges })
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let steps = strategy.forward_steps(kind);
        let mut layouts = vec![Layout::new(physical, splits, None, grid)];
        for step in steps.iter() {
            let next = layouts[layouts.len() - 1].apply(step, lengths, grid, exchange)?;
            layouts.push(next);
        }

        Ok(Self { steps, layouts })
    }

    /// Physical layout.
    pub fn physical(&self) -> &Layout {
        &self.layouts[0]
    }

    /// Spectral layout.
    pub fn spectral(&self) -> &Layout {
        &self.layouts[self.layouts.len() - 1]
    }

    /// Forward redistribution performed by step `index`, if it is a transpose.
    pub fn redistribution(&self, index: usize) -> Option<Redistribution> {
        let Step::Transpose {
            group,
            gather,
            scatter,
        } = self.steps[index]
        else {
            return None;
        };

        let before = &self.layouts[index];
        let after = &self.layouts[index + 1];

        Some(Redistribution {
            group,
            input_shape: before.local_shape(),
            output_shape: after.local_shape(),
            gather,
            scatter,
            gather_ranges: before.splits[gather].as_ref()?.ranges.clone(),
            scatter_ranges: after.splits[scatter].as_ref()?.ranges.clone(),
        })
    }
}

#[cfg(test)]
mod test {
    use crate::{
        decomposition::{strategy, types::Plan},
        errors::MpiFftError,
        types::{Alignment, Decomposition, Exchange, TransformKind},
    };

    /// Every layout of every rank, for a group of `size` processes.
    fn plans(
        decomposition: Decomposition,
        kind: TransformKind,
        lengths: &[usize],
        size: usize,
        padded: bool,
        exchange: Exchange,
    ) -> Result<Vec<Plan>, MpiFftError> {
        let strategy = strategy(decomposition, lengths.len())?;
        (0..size)
            .map(|rank| {
                let grid = strategy.grid(size, rank)?;
                Plan::new(strategy.as_ref(), &grid, kind, lengths, padded, exchange)
            })
            .collect()
    }

    /// Local blocks of every layout tile the distributed part of the global array exactly once.
    fn check_conservation(plans: &[Plan]) {
        for stage in 0..plans[0].layouts.len() {
            let layout = &plans[0].layouts[stage];

            let covered = layout
                .splits
                .iter()
                .zip(layout.extents.iter())
                .map(|(split, &extent)| match split {
                    Some(split) => {
                        // Ranges are contiguous from zero
                        for pair in split.ranges.windows(2) {
                            assert_eq!(pair[0].end, pair[1].start);
                        }
                        assert_eq!(split.ranges[0].start, 0);
                        split.ranges[split.ranges.len() - 1].end
                    }
                    None => extent,
                })
                .collect::<Vec<_>>();

            let total: usize = plans.iter().map(|p| p.layouts[stage].local_len()).sum();
            assert_eq!(total, covered.iter().product::<usize>());

            let mut boxes = plans
                .iter()
                .map(|p| p.layouts[stage].local_slice())
                .map(|s| s.iter().map(|r| (r.start, r.end)).collect::<Vec<_>>())
                .collect::<Vec<_>>();
            boxes.sort();
            boxes.dedup();
            assert_eq!(boxes.len(), plans.len());
        }
    }

    #[test]
    fn test_slab_conservation() {
        for size in 1..=4 {
            let plans = plans(
                Decomposition::Slab,
                TransformKind::RealToComplex,
                &[10, 9, 8],
                size,
                false,
                Exchange::Generalized,
            )
            .unwrap();
            check_conservation(&plans);
            assert_eq!(plans[0].spectral().extents, vec![10, 9, 5]);
        }
    }

    #[test]
    fn test_pencil_conservation() {
        for alignment in [Alignment::X, Alignment::Y] {
            for exchange in [
                Exchange::Uniform,
                Exchange::PaddedUniform,
                Exchange::Generalized,
            ] {
                let plans = plans(
                    Decomposition::Pencil {
                        alignment,
                        grid: None,
                    },
                    TransformKind::RealToComplex,
                    &[8, 12, 16],
                    4,
                    false,
                    exchange,
                )
                .unwrap();
                check_conservation(&plans);
            }
        }
    }

    #[test]
    fn test_uniform_nyquist() {
        let plans = plans(
            Decomposition::Pencil {
                alignment: Alignment::Y,
                grid: None,
            },
            TransformKind::RealToComplex,
            &[8, 12, 16],
            4,
            false,
            Exchange::Uniform,
        )
        .unwrap();

        // The last mode along the reduced axis is held by no process
        let spectral = plans[3].spectral();
        assert_eq!(spectral.extents, vec![8, 12, 9]);
        assert_eq!(spectral.local, vec![0..8, 6..12, 4..8]);
    }

    #[test]
    fn test_padded_plan() {
        let plans = plans(
            Decomposition::Slab,
            TransformKind::RealToComplex,
            &[8, 8, 8],
            2,
            true,
            Exchange::Generalized,
        )
        .unwrap();
        check_conservation(&plans);
        assert_eq!(plans[1].physical().local, vec![6..12, 0..12, 0..12]);
        assert_eq!(plans[1].spectral().local, vec![0..8, 4..8, 0..5]);
    }

    #[test]
    fn test_invalid_plans() {
        let err = plans(
            Decomposition::Slab,
            TransformKind::ComplexToComplex,
            &[10, 10, 10],
            3,
            false,
            Exchange::Uniform,
        );
        assert!(matches!(err, Err(MpiFftError::Shape { axis: 0, .. })));

        let err = plans(
            Decomposition::Slab,
            TransformKind::ComplexToComplex,
            &[2, 10],
            4,
            false,
            Exchange::Generalized,
        );
        assert!(matches!(err, Err(MpiFftError::Shape { .. })));

        let err = plans(
            Decomposition::Line,
            TransformKind::RealToComplex,
            &[8, 8, 8],
            1,
            false,
            Exchange::Generalized,
        );
        assert!(matches!(err, Err(MpiFftError::Configuration(_))));
    }
}
