//! # Decomposition Types
use std::ops::Range;

/// Cartesian arrangement of the processes of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessGrid {
    /// Number of processes along each grid axis, their product is the group size
    pub dims: Vec<usize>,

    /// Coordinates of the calling process
    pub coords: Vec<usize>,
}

impl ProcessGrid {
    /// One dimensional grid of a whole group.
    pub fn linear(size: usize, rank: usize) -> Self {
        Self {
            dims: vec![size],
            coords: vec![rank],
        }
    }

    /// Row-major two dimensional grid of shape `dims`.
    pub fn planar(dims: [usize; 2], rank: usize) -> Self {
        Self {
            dims: dims.to_vec(),
            coords: vec![rank / dims[1], rank % dims[1]],
        }
    }

    /// Colour and key splitting a group into the sub-group spanning grid axis `axis`, i.e. the processes
    /// whose coordinates agree on every other axis, ranked by their coordinate along `axis`.
    pub fn color_key(&self, axis: usize) -> (usize, usize) {
        let mut color = 0;
        for (i, (&c, &d)) in self.coords.iter().zip(self.dims.iter()).enumerate() {
            if i != axis {
                color = color * d + c;
            }
        }
        (color, self.coords[axis])
    }
}

/// A single stage of a distributed transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Complex-to-complex transform along a local axis
    Complex {
        /// Array axis
        axis: usize,
    },

    /// Real-to-complex transform along a local axis, which becomes the reduced axis
    Real {
        /// Array axis
        axis: usize,
    },

    /// Global transpose within the sub-group spanning a grid axis. In the forward direction the `gather`
    /// axis becomes local and the `scatter` axis becomes distributed.
    Transpose {
        /// Grid axis of the sub-group
        group: usize,

        /// Array axis made local
        gather: usize,

        /// Array axis distributed
        scatter: usize,
    },
}

/// Split of an array axis over the processes of a sub-group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisSplit {
    /// Grid axis of the sub-group
    pub group: usize,

    /// Global index range held by each rank of the sub-group
    pub ranges: Vec<Range<usize>>,
}

/// Distribution of a global array at one stage of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Global extent of each axis
    pub extents: Vec<usize>,

    /// Split of each axis, `None` for local axes
    pub splits: Vec<Option<AxisSplit>>,

    /// Global index range held by the calling process along each axis
    pub local: Vec<Range<usize>>,

    /// Conjugate symmetry reduced axis, once the real-to-complex transform has been applied
    pub reduced: Option<usize>,
}

impl Layout {
    /// Shape of the local block.
    pub fn local_shape(&self) -> Vec<usize> {
        self.local.iter().map(|r| r.len()).collect()
    }

    /// Global index ranges of the local block.
    pub fn local_slice(&self) -> Vec<Range<usize>> {
        self.local.clone()
    }

    /// Number of elements of the local block.
    pub fn local_len(&self) -> usize {
        self.local.iter().map(|r| r.len()).product()
    }
}

/// The steps of a forward transform and the layout before and after each of them, for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Forward steps
    pub steps: Vec<Step>,

    /// `layouts[i]` precedes `steps[i]`, the last layout is the spectral layout
    pub layouts: Vec<Layout>,
}
