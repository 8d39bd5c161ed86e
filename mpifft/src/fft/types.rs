//! # Local Transform Types
use std::{collections::HashMap, fmt, sync::Arc};

use rayon::{ThreadPool, ThreadPoolBuilder};
use rustfft::{Fft, FftPlanner, FftPlannerScalar};
use tracing::debug;

use crate::{traits::scalar::RealScalar, types::PlannerEffort};

/// Error type for the local transform kernel, arising from creating plans and using data of incorrect dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FftError {
    /// Failed to create a valid plan or worker pool
    InvalidPlanError(String),

    /// Buffers of a size incompatible with the requested shape
    InvalidDimensionError {
        /// Shape the buffer was expected to hold
        shape: Vec<usize>,
        /// Length of the buffer supplied
        found: usize,
    },
}

/// Forward and backward plans for one transform length.
#[derive(Clone)]
pub struct PlanPair<T: RealScalar> {
    /// Forward plan
    pub forward: Arc<dyn Fft<T>>,

    /// Backward plan
    pub backward: Arc<dyn Fft<T>>,
}

/// Local transform kernel backed by RustFFT.
pub struct RustFft<T: RealScalar> {
    /// Plans indexed by transform length
    pub plans: HashMap<usize, PlanPair<T>>,

    /// Worker pool processing lanes
    pub pool: ThreadPool,
}

impl<T: RealScalar> RustFft<T> {
    /// Create plans for every transform length in `lengths`, each with its planner effort.
    ///
    /// # Arguments
    /// * `lengths` - Transform lengths and the planner effort used for each.
    /// * `threads` - Size of the worker pool, defaults to the number of logical cores.
    pub fn new(lengths: &[(usize, PlannerEffort)], threads: Option<usize>) -> Result<Self, FftError> {
        let mut plans = HashMap::new();
        let mut planner = FftPlanner::<T>::new();
        let mut scalar_planner = FftPlannerScalar::<T>::new();

        for &(n, effort) in lengths {
            if n == 0 {
                return Err(FftError::InvalidPlanError(
                    "cannot plan a transform of length zero".to_string(),
                ));
            }
            if plans.contains_key(&n) {
                continue;
            }
            let pair = match effort {
                PlannerEffort::Estimate => PlanPair {
                    forward: scalar_planner.plan_fft_forward(n),
                    backward: scalar_planner.plan_fft_inverse(n),
                },
                PlannerEffort::Measure | PlannerEffort::Patient | PlannerEffort::Exhaustive => {
                    PlanPair {
                        forward: planner.plan_fft_forward(n),
                        backward: planner.plan_fft_inverse(n),
                    }
                }
            };
            debug!(n, ?effort, "planned local transform");
            plans.insert(n, pair);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.unwrap_or(0))
            .build()
            .map_err(|e| FftError::InvalidPlanError(e.to_string()))?;

        Ok(Self { plans, pool })
    }

    /// Look up the plans of a transform length.
    pub fn plan(&self, n: usize) -> Result<&PlanPair<T>, FftError> {
        self.plans
            .get(&n)
            .ok_or_else(|| FftError::InvalidPlanError(format!("no plan for length {n}")))
    }
}

impl<T: RealScalar> fmt::Debug for RustFft<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lengths = self.plans.keys().copied().collect::<Vec<_>>();
        lengths.sort_unstable();
        f.debug_struct("RustFft")
            .field("lengths", &lengths)
            .field("threads", &self.pool.current_num_threads())
            .finish()
    }
}
