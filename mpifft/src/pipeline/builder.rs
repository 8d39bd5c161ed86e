//! Builder objects to construct distributed transforms
use std::f64::consts::PI;

use itertools::Itertools;
use tracing::debug;

use crate::{
    decomposition::{strategy, types::Plan},
    errors::MpiFftError,
    fft::types::RustFft,
    helpers::padded_extent,
    pipeline::types::{DistributedFft, DistributedFftBuilder, FftConfig, C2C, R2C},
    traits::{communicator::Communicator, scalar::RealScalar},
    transpose::types::ExchangeEngine,
    types::{Decomposition, Exchange, PlannerEffort, Precision, TransformKind},
};

impl<T, C> Default for DistributedFftBuilder<T, C>
where
    T: RealScalar,
    C: Communicator,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> DistributedFftBuilder<T, C>
where
    T: RealScalar,
    C: Communicator,
{
    /// Initialise an empty builder with the default configuration
    pub fn new() -> Self {
        Self {
            shape: None,
            domain: None,
            communicator: None,
            precision: None,
            config: FftConfig::default(),
        }
    }

    /// Global shape of the physical array, two or three axes
    pub fn shape(mut self, shape: &[usize]) -> Self {
        self.shape = Some(shape.to_vec());
        self
    }

    /// Physical length of the domain along each axis, used to scale wavenumbers
    pub fn domain(mut self, lengths: &[T]) -> Self {
        self.domain = Some(lengths.to_vec());
        self
    }

    /// Group over which the array is distributed
    pub fn communicator(mut self, communicator: C) -> Self {
        self.communicator = Some(communicator);
        self
    }

    /// Requested precision, must agree with the real type of the transform
    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Exchange strategy of the global transposes
    pub fn exchange(mut self, exchange: Exchange) -> Self {
        self.config.exchange = exchange;
        self
    }

    /// Domain decomposition topology
    pub fn decomposition(mut self, decomposition: Decomposition) -> Self {
        self.config.decomposition = decomposition;
        self
    }

    /// Planner effort of each axis
    pub fn planner_effort(mut self, effort: &[PlannerEffort]) -> Self {
        self.config.planner_effort = effort.to_vec();
        self
    }

    /// Size of the local kernel's worker pool
    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = Some(threads);
        self
    }

    /// Finalise a real-to-complex transform. Collective over the communicator.
    pub fn build_r2c(self) -> Result<R2C<T, C>, MpiFftError> {
        Ok(R2C(self.build(TransformKind::RealToComplex)?))
    }

    /// Finalise a complex-to-complex transform. Collective over the communicator.
    pub fn build_c2c(self) -> Result<C2C<T, C>, MpiFftError> {
        Ok(C2C(self.build(TransformKind::ComplexToComplex)?))
    }

    fn build(self, kind: TransformKind) -> Result<DistributedFft<T, C>, MpiFftError> {
        let shape = self
            .shape
            .ok_or_else(|| MpiFftError::Configuration("global shape must be set".to_string()))?;
        let world = self
            .communicator
            .ok_or_else(|| MpiFftError::Configuration("communicator must be set".to_string()))?;

        let ndim = shape.len();
        if ndim != 2 && ndim != 3 {
            return Err(MpiFftError::Configuration(format!(
                "only two and three dimensional transforms are supported, found shape {shape:?}"
            )));
        }
        if shape.iter().any(|&n| n == 0) {
            return Err(MpiFftError::Configuration(format!(
                "every extent must be positive, found shape {shape:?}"
            )));
        }

        let mut config = self.config;
        if let Some(precision) = self.precision {
            if precision != T::PRECISION {
                return Err(MpiFftError::Configuration(format!(
                    "requested {precision:?} precision for a transform of {:?} precision",
                    T::PRECISION
                )));
            }
        }
        config.precision = T::PRECISION;

        let domain = match self.domain {
            Some(domain) => {
                if domain.len() != ndim || domain.iter().any(|&l| l <= T::zero()) {
                    return Err(MpiFftError::Configuration(format!(
                        "domain needs one positive length for each of the {ndim} axes"
                    )));
                }
                domain
            }
            None => vec![T::from_f64_lossy(2.0 * PI); ndim],
        };

        let strategy = strategy(config.decomposition, ndim)?;
        let grid = strategy.grid(world.size(), world.rank())?;

        // One sub-group for each axis of the process grid
        let groups = (0..grid.dims.len())
            .map(|axis| {
                let (color, key) = grid.color_key(axis);
                let group = world.split(color, key)?;
                if group.size() != grid.dims[axis] || group.rank() != grid.coords[axis] {
                    return Err(MpiFftError::Communication(format!(
                        "sub-group of grid axis {axis} has rank {} of {}, expected rank {} of {}",
                        group.rank(),
                        group.size(),
                        grid.coords[axis],
                        grid.dims[axis]
                    )));
                }
                Ok(group)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let plan = Plan::new(strategy.as_ref(), &grid, kind, &shape, false, config.exchange)?;
        let padded_plan = Plan::new(strategy.as_ref(), &grid, kind, &shape, true, config.exchange);

        let mut lengths = shape
            .iter()
            .enumerate()
            .map(|(axis, &n)| (n, config.effort(axis)))
            .collect_vec();
        if padded_plan.is_ok() {
            lengths.extend(
                shape
                    .iter()
                    .enumerate()
                    .map(|(axis, &n)| (padded_extent(n), config.effort(axis))),
            );
        }
        let kernel = RustFft::new(&lengths, config.threads)?;

        debug!(
            rank = world.rank(),
            ?kind,
            ?shape,
            dims = ?grid.dims,
            coords = ?grid.coords,
            physical = ?plan.physical().local,
            spectral = ?plan.spectral().local,
            padded = padded_plan.is_ok(),
            "built distributed transform"
        );

        let exchange = ExchangeEngine::from(config.exchange);

        Ok(DistributedFft {
            config,
            kind,
            shape,
            domain,
            world,
            groups,
            grid,
            plan,
            padded_plan,
            kernel,
            exchange,
        })
    }
}
