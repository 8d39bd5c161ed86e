//! # Transpose Types
use std::ops::Range;

use bytemuck::Pod;

use crate::{
    errors::MpiFftError,
    traits::{communicator::Communicator, transpose::Transpose},
    types::Exchange,
};

/// Source and target layouts of a global transpose, as seen by one process of the sub-group.
///
/// In the source layout the `gather` axis is split over the sub-group and the `scatter` axis is local,
/// in the target layout the roles are exchanged. Every other axis keeps its local extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redistribution {
    /// Grid axis of the sub-group
    pub group: usize,

    /// Local shape in the source layout
    pub input_shape: Vec<usize>,

    /// Local shape in the target layout
    pub output_shape: Vec<usize>,

    /// Axis made local
    pub gather: usize,

    /// Axis distributed
    pub scatter: usize,

    /// Global range of the gather axis held by each rank of the sub-group in the source layout
    pub gather_ranges: Vec<Range<usize>>,

    /// Global range of the scatter axis held by each rank of the sub-group in the target layout
    pub scatter_ranges: Vec<Range<usize>>,
}

impl Redistribution {
    /// Redistribution undoing this one.
    pub fn reversed(&self) -> Self {
        Self {
            group: self.group,
            input_shape: self.output_shape.clone(),
            output_shape: self.input_shape.clone(),
            gather: self.scatter,
            scatter: self.gather,
            gather_ranges: self.scatter_ranges.clone(),
            scatter_ranges: self.gather_ranges.clone(),
        }
    }
}

/// Equal blocks exchanged with a plain all-to-all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformExchange;

/// Blocks packed into equal sized zero padded slots, exchanged with a plain all-to-all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddedUniformExchange;

/// Variable sized blocks exchanged with a variable count all-to-all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneralizedExchange;

/// Transpose strategy selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeEngine {
    /// Uniform block exchange
    Uniform(UniformExchange),

    /// Padded uniform block exchange
    PaddedUniform(PaddedUniformExchange),

    /// Generalised block exchange
    Generalized(GeneralizedExchange),
}

impl From<Exchange> for ExchangeEngine {
    fn from(exchange: Exchange) -> Self {
        match exchange {
            Exchange::Uniform => ExchangeEngine::Uniform(UniformExchange),
            Exchange::PaddedUniform => ExchangeEngine::PaddedUniform(PaddedUniformExchange),
            Exchange::Generalized => ExchangeEngine::Generalized(GeneralizedExchange),
        }
    }
}

impl Transpose for ExchangeEngine {
    fn transpose<E: Pod + Send + Sync, C: Communicator>(
        &self,
        comm: &C,
        redistribution: &Redistribution,
        input: &[E],
        output: &mut [E],
    ) -> Result<(), MpiFftError> {
        match self {
            ExchangeEngine::Uniform(e) => e.transpose(comm, redistribution, input, output),
            ExchangeEngine::PaddedUniform(e) => e.transpose(comm, redistribution, input, output),
            ExchangeEngine::Generalized(e) => e.transpose(comm, redistribution, input, output),
        }
    }
}
