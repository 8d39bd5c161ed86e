//! Shape, slice and wavenumber queries
use std::{f64::consts::PI, ops::Range};

use num::Zero;
use num_complex::Complex;

use crate::{
    decomposition::{
        shape::split_extent,
        types::{AxisSplit, Layout, ProcessGrid},
    },
    errors::MpiFftError,
    helpers::{frequency, padded_extent, strides},
    pipeline::types::DistributedFft,
    traits::{communicator::Communicator, scalar::RealScalar},
    types::{Precision, TransformKind},
};

impl<T, C> DistributedFft<T, C>
where
    T: RealScalar,
    C: Communicator,
{
    /// Precision of the transform.
    pub fn precision(&self) -> Precision {
        T::PRECISION
    }

    /// Rank of the calling process within the group.
    pub fn rank(&self) -> usize {
        self.world.rank()
    }

    /// Number of processes in the group.
    pub fn size(&self) -> usize {
        self.world.size()
    }

    /// Process grid, as seen by the calling process.
    pub fn grid(&self) -> &ProcessGrid {
        &self.grid
    }

    /// Global shape of the physical array.
    pub fn global_real_shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    /// Global shape of the spectral array, the last axis reduced for real-to-complex transforms.
    pub fn global_complex_shape(&self) -> Vec<usize> {
        self.plan.spectral().extents.clone()
    }

    /// Local shape of the physical array.
    pub fn local_real_shape(&self) -> Vec<usize> {
        self.plan.physical().local_shape()
    }

    /// Global index ranges of the local physical block.
    pub fn local_real_slice(&self) -> Vec<Range<usize>> {
        self.plan.physical().local_slice()
    }

    /// Local shape of the spectral array.
    pub fn local_complex_shape(&self) -> Vec<usize> {
        self.plan.spectral().local_shape()
    }

    /// Global index ranges of the local spectral block.
    pub fn local_complex_slice(&self) -> Vec<Range<usize>> {
        self.plan.spectral().local_slice()
    }

    /// Global shape of the physical array padded by the 3/2-rule.
    pub fn global_real_shape_padded(&self) -> Vec<usize> {
        self.shape.iter().map(|&n| padded_extent(n)).collect()
    }

    /// Global shape of the spectral array at 3/2-rule padded resolution.
    pub fn global_complex_shape_padded(&self) -> Vec<usize> {
        let mut shape = self.global_real_shape_padded();
        if self.kind == TransformKind::RealToComplex {
            if let Some(last) = shape.last_mut() {
                *last = *last / 2 + 1;
            }
        }
        shape
    }

    /// Local shape of the physical array padded by the 3/2-rule.
    pub fn local_real_shape_padded(&self) -> Result<Vec<usize>, MpiFftError> {
        Ok(self.padded_physical()?.local_shape())
    }

    /// Global index ranges of the local padded physical block.
    pub fn local_real_slice_padded(&self) -> Result<Vec<Range<usize>>, MpiFftError> {
        Ok(self.padded_physical()?.local_slice())
    }

    /// Local shape of the spectral array at 3/2-rule padded resolution, distributed as the spectral array.
    pub fn local_complex_shape_padded(&self) -> Result<Vec<usize>, MpiFftError> {
        let spectral = self.plan.spectral();
        let extents = self.global_complex_shape_padded();

        let splits = spectral
            .splits
            .iter()
            .enumerate()
            .map(|(axis, split)| {
                split
                    .as_ref()
                    .map(|split| {
                        split_extent(
                            axis,
                            extents[axis],
                            self.grid.dims[split.group],
                            self.config.exchange,
                            spectral.reduced == Some(axis),
                        )
                        .map(|ranges| AxisSplit {
                            group: split.group,
                            ranges,
                        })
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Layout::new(extents, splits, spectral.reduced, &self.grid).local_shape())
    }

    fn padded_physical(&self) -> Result<&Layout, MpiFftError> {
        self.padded_plan
            .as_ref()
            .map(|plan| plan.physical())
            .map_err(|err| err.clone())
    }

    /// Wavenumbers of the local spectral block along each axis, integer frequencies scaled by `2π/L`.
    pub fn local_wavenumbers(&self) -> Vec<Vec<T>> {
        let spectral = self.plan.spectral();
        spectral
            .local
            .iter()
            .enumerate()
            .map(|(axis, range)| {
                let scale = T::from_f64_lossy(2.0 * PI) / self.domain[axis];
                range
                    .clone()
                    .map(|i| {
                        let k = if spectral.reduced == Some(axis) {
                            i as isize
                        } else {
                            frequency(i, self.shape[axis])
                        };
                        T::from_f64_lossy(k as f64) * scale
                    })
                    .collect()
            })
            .collect()
    }

    /// Zero the locally held Nyquist coefficients of the reduced axis of an even length, leaving other
    /// coefficients untouched. A uniform exchange over a reduced axis of indivisible extent holds no
    /// Nyquist coefficient, so data compared against it must be prepared this way. Does nothing for
    /// complex-to-complex transforms.
    pub fn zero_nyquist(&self, data: &mut [Complex<T>]) -> Result<(), MpiFftError> {
        let spectral = self.plan.spectral();
        let shape = spectral.local_shape();
        MpiFftError::check_len(&shape, data.len())?;

        let Some(axis) = spectral.reduced else {
            return Ok(());
        };
        let n = self.shape[axis];
        if n % 2 != 0 || !spectral.local[axis].contains(&(n / 2)) {
            return Ok(());
        }

        let local = n / 2 - spectral.local[axis].start;
        let stride = strides(&shape)[axis];
        for (index, value) in data.iter_mut().enumerate() {
            if (index / stride) % shape[axis] == local {
                *value = Complex::zero();
            }
        }
        Ok(())
    }
}
