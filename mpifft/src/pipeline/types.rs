//! # Pipeline Types
use std::ops::Deref;

use crate::{
    decomposition::types::{Plan, ProcessGrid},
    errors::MpiFftError,
    fft::types::RustFft,
    traits::{communicator::Communicator, scalar::RealScalar},
    transpose::types::ExchangeEngine,
    types::{Decomposition, Exchange, PlannerEffort, Precision, TransformKind},
};

/// Immutable configuration of a distributed transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FftConfig {
    /// Precision of the transform, must match its real type
    pub precision: Precision,

    /// Exchange strategy of the global transposes
    pub exchange: Exchange,

    /// Domain decomposition topology
    pub decomposition: Decomposition,

    /// Planner effort of each axis, axes without an entry use the default effort
    pub planner_effort: Vec<PlannerEffort>,

    /// Size of the local kernel's worker pool, the number of logical cores if absent
    pub threads: Option<usize>,
}

impl Default for FftConfig {
    fn default() -> Self {
        Self {
            precision: Precision::Double,
            exchange: Exchange::default(),
            decomposition: Decomposition::default(),
            planner_effort: Vec::new(),
            threads: None,
        }
    }
}

impl FftConfig {
    /// Planner effort of an axis.
    pub fn effort(&self, axis: usize) -> PlannerEffort {
        self.planner_effort.get(axis).copied().unwrap_or_default()
    }
}

/// A distributed transform, as held by one process of its group.
///
/// Everything is fixed at construction: the process grid and its sub-groups, the plans of the plain and
/// padded layouts, the local kernel's plans and the exchange strategy.
pub struct DistributedFft<T, C>
where
    T: RealScalar,
    C: Communicator,
{
    /// Configuration
    pub config: FftConfig,

    /// Element kind of the physical array
    pub kind: TransformKind,

    /// Global shape of the physical array
    pub shape: Vec<usize>,

    /// Physical length of the domain along each axis
    pub domain: Vec<T>,

    /// Group over which the array is distributed
    pub world: C,

    /// Sub-group spanning each axis of the process grid
    pub groups: Vec<C>,

    /// Process grid
    pub grid: ProcessGrid,

    /// Plan of the unpadded physical layout
    pub plan: Plan,

    /// Plan of the 3/2-rule padded physical layout, or the reason it cannot be used with this group
    pub padded_plan: Result<Plan, MpiFftError>,

    /// Local transform kernel
    pub kernel: RustFft<T>,

    /// Exchange strategy of the global transposes
    pub exchange: ExchangeEngine,
}

/// Real-to-complex distributed transform, the physical array is real.
pub struct R2C<T: RealScalar, C: Communicator>(pub(crate) DistributedFft<T, C>);

/// Complex-to-complex distributed transform, the physical array is complex.
pub struct C2C<T: RealScalar, C: Communicator>(pub(crate) DistributedFft<T, C>);

impl<T: RealScalar, C: Communicator> Deref for R2C<T, C> {
    type Target = DistributedFft<T, C>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: RealScalar, C: Communicator> Deref for C2C<T, C> {
    type Target = DistributedFft<T, C>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Builder for distributed transforms.
pub struct DistributedFftBuilder<T, C>
where
    T: RealScalar,
    C: Communicator,
{
    /// Global shape of the physical array
    pub shape: Option<Vec<usize>>,

    /// Physical length of the domain along each axis, `2π` if not set
    pub domain: Option<Vec<T>>,

    /// Group over which the array is distributed
    pub communicator: Option<C>,

    /// Precision requested by the caller, checked against `T`
    pub precision: Option<Precision>,

    /// Configuration
    pub config: FftConfig,
}
