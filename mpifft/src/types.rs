//! # Configuration Types
//!
//! Closed enumerations for every selector accepted at construction. Each one parses from the
//! identifiers used by spectral solver input files, failing with [`MpiFftError::Configuration`].
use std::str::FromStr;

use crate::errors::MpiFftError;

/// Floating point precision of a transform, paired with its default tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// `f32` real data, `Complex<f32>` spectral data
    Single,

    /// `f64` real data, `Complex<f64>` spectral data
    Double,
}

impl Precision {
    /// Default relative tolerance for comparisons at this precision.
    pub fn rtol(&self) -> f64 {
        match self {
            Precision::Single => 1e-4,
            Precision::Double => 1e-8,
        }
    }

    /// Default absolute tolerance for comparisons at this precision.
    pub fn atol(&self) -> f64 {
        match self {
            Precision::Single => 5e-7,
            Precision::Double => 1e-10,
        }
    }
}

impl FromStr for Precision {
    type Err = MpiFftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" | "f32" => Ok(Precision::Single),
            "double" | "f64" => Ok(Precision::Double),
            _ => Err(MpiFftError::Configuration(format!(
                "unknown precision '{s}', expected 'single' or 'double'"
            ))),
        }
    }
}

/// Collective strategy used by the global transposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Exchange {
    /// Equal blocks exchanged with a plain all-to-all. Every distributed extent must divide evenly,
    /// a distributed real-to-complex axis that does not drops its Nyquist index to make it so.
    Uniform,

    /// Equal sized slots exchanged with a plain all-to-all, blocks of the reduced real-to-complex
    /// axis are padded up to the slot size so no mode is dropped.
    PaddedUniform,

    /// Variable sized blocks exchanged with a variable count all-to-all, no restriction on extents.
    #[default]
    Generalized,
}

impl FromStr for Exchange {
    type Err = MpiFftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform-block-exchange" | "uniform" | "AlltoallN" => Ok(Exchange::Uniform),
            "padded-uniform-block-exchange" | "padded-uniform" | "Alltoall" => {
                Ok(Exchange::PaddedUniform)
            }
            "generalized-block-exchange" | "generalized" | "Alltoallw" => {
                Ok(Exchange::Generalized)
            }
            _ => Err(MpiFftError::Configuration(format!(
                "unknown communication variant '{s}'"
            ))),
        }
    }
}

/// Axis made contiguous between the two transposes of a pencil decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// The first axis is transformed between the transposes
    X,

    /// The second axis is transformed between the transposes
    #[default]
    Y,
}

impl FromStr for Alignment {
    type Err = MpiFftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" | "x" => Ok(Alignment::X),
            "Y" | "y" => Ok(Alignment::Y),
            _ => Err(MpiFftError::Configuration(format!(
                "unknown alignment '{s}', expected 'X' or 'Y'"
            ))),
        }
    }
}

/// Dealiasing applied by a single forward or inverse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dealias {
    /// Plain transforms
    #[default]
    None,

    /// Zero every mode beyond two thirds of the Nyquist frequency, no padding
    TwoThirds,

    /// Zero pad to 3/2 of the resolution before the inverse, truncate after the forward
    ThreeHalves,
}

impl Dealias {
    /// Whether the physical array is held at padded resolution.
    pub fn is_padded(&self) -> bool {
        matches!(self, Dealias::ThreeHalves)
    }
}

impl FromStr for Dealias {
    type Err = MpiFftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" | "None" => Ok(Dealias::None),
            "2/3-rule" => Ok(Dealias::TwoThirds),
            "3/2-rule" => Ok(Dealias::ThreeHalves),
            _ => Err(MpiFftError::Configuration(format!(
                "unknown dealias mode '{s}', expected '2/3-rule' or '3/2-rule'"
            ))),
        }
    }
}

/// Planning effort forwarded to the local transform kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlannerEffort {
    /// Cheapest planning, portable scalar algorithms
    Estimate,

    /// Default planning, instruction set detected at runtime
    #[default]
    Measure,

    /// As `Measure`
    Patient,

    /// As `Measure`
    Exhaustive,
}

impl FromStr for PlannerEffort {
    type Err = MpiFftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FFTW_ESTIMATE" | "estimate" => Ok(PlannerEffort::Estimate),
            "FFTW_MEASURE" | "measure" => Ok(PlannerEffort::Measure),
            "FFTW_PATIENT" | "patient" => Ok(PlannerEffort::Patient),
            "FFTW_EXHAUSTIVE" | "exhaustive" => Ok(PlannerEffort::Exhaustive),
            _ => Err(MpiFftError::Configuration(format!(
                "unknown planner effort '{s}'"
            ))),
        }
    }
}

/// Domain decomposition topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Decomposition {
    /// One axis distributed over a one dimensional process grid
    #[default]
    Slab,

    /// Two axes distributed over a two dimensional process grid, three dimensional data only
    Pencil {
        /// Layout between the two transposes
        alignment: Alignment,

        /// Explicit process grid `[p0, p1]`, factorised from the group size if absent
        grid: Option<[usize; 2]>,
    },

    /// Two dimensional data with one distributed axis
    Line,
}

impl FromStr for Decomposition {
    type Err = MpiFftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slab" | "Slab" => Ok(Decomposition::Slab),
            "pencil" | "Pencil" => Ok(Decomposition::Pencil {
                alignment: Alignment::default(),
                grid: None,
            }),
            "line" | "Line" => Ok(Decomposition::Line),
            _ => Err(MpiFftError::Configuration(format!(
                "unknown decomposition '{s}', expected 'slab', 'pencil' or 'line'"
            ))),
        }
    }
}

/// Element kind of the physical array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Real physical data, conjugate symmetry reduced last axis in spectral space
    RealToComplex,

    /// Complex physical data
    ComplexToComplex,
}

/// Direction of a transform
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Forward transform
    Forward,

    /// Backward transform
    Backward,
}
