use thiserror::Error;

use crate::systems::lu::SolveError;
use crate::variography::model_variograms::iso_fitter::FitError;

pub mod ordinary_kriging;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("no conditioning samples")]
    NoSamples,

    #[error("non-finite query location")]
    NonFiniteQuery,

    #[error("non-finite sample at index {0}")]
    NonFiniteSample(usize),

    #[error(transparent)]
    Parameters(#[from] FitError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}
