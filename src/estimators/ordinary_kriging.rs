use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::spatial_database::{QueryPoint, SamplePoint};
use crate::systems::solved_systems::ok_system::SolvedOKSystem;
use crate::systems::solved_systems::SolvedSystem;
use crate::systems::system_builder::OKSystemBuilder;
use crate::variography::model_variograms::iso_fitter::fit_parameters;
use crate::variography::model_variograms::{IsoVariogramModel, VariogramParameters};

use super::EstimateError;

/// Estimate paired with its ordinary kriging variance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KrigedValue {
    pub value: f64,
    /// `None` when the value was passed through from a single sample.
    pub variance: Option<f64>,
}

/// Ordinary kriging estimate and variance at `query`. The value is clamped to be
/// non-negative, as is the variance.
///
/// * no samples: [`EstimateError::NoSamples`]
/// * one sample: its value, unchanged
/// * otherwise the system is built from `params` as given; fitting is up to the caller
pub fn try_krige(
    query: &QueryPoint,
    samples: &[SamplePoint],
    params: &VariogramParameters,
) -> Result<KrigedValue, EstimateError> {
    if samples.is_empty() {
        return Err(EstimateError::NoSamples);
    }
    if !query.is_finite() {
        return Err(EstimateError::NonFiniteQuery);
    }
    if let Some(i) = samples.iter().position(|s| !s.is_finite()) {
        return Err(EstimateError::NonFiniteSample(i));
    }

    if let [only] = samples {
        return Ok(KrigedValue {
            value: only.value,
            variance: None,
        });
    }

    params.validate()?;

    let cov_mat = OKSystemBuilder::build_cov_mat(samples, params);
    let cov_vec = OKSystemBuilder::build_cov_vec(samples, query, params);
    let system = SolvedOKSystem::solve(cov_mat, cov_vec)?;

    let values = samples.iter().map(|s| s.value).collect::<Vec<_>>();
    let est = system.estimate(&values);
    let variance = system.variance(params.covariogram(0.0));

    tracing::trace!(%query, n_cond = samples.len(), est, variance, "kriged");

    Ok(KrigedValue {
        value: est.max(0.0),
        variance: Some(variance.max(0.0)),
    })
}

/// Ordinary kriging estimate at `query`, clamped to be non-negative.
/// See [`try_krige`] for the degenerate cases.
pub fn try_estimate(
    query: &QueryPoint,
    samples: &[SamplePoint],
    params: &VariogramParameters,
) -> Result<f64, EstimateError> {
    try_krige(query, samples, params).map(|k| k.value)
}

/// Like [`try_estimate`], with every failure mapped to `None`.
pub fn estimate(
    query: &QueryPoint,
    samples: &[SamplePoint],
    params: &VariogramParameters,
) -> Option<f64> {
    match try_estimate(query, samples, params) {
        Ok(v) => Some(v),
        Err(EstimateError::NoSamples) => None,
        Err(e) => {
            tracing::warn!(%query, error = %e, "estimate unavailable");
            None
        }
    }
}

/// Estimate many query points against the same samples and parameters in parallel.
pub fn estimate_batch(
    queries: &[QueryPoint],
    samples: &[SamplePoint],
    params: &VariogramParameters,
) -> Vec<Option<f64>> {
    queries
        .par_iter()
        .map(|q| estimate(q, samples, params))
        .collect()
}

/// A kriging session holding the most recently fitted parameters.
///
/// Each [`interpolate`](Self::interpolate) call refits range and sill to the samples it is
/// given before estimating. The nugget is never refit and persists from construction.
#[derive(Debug, Clone, Default)]
pub struct KrigingEngine {
    params: VariogramParameters,
}

impl KrigingEngine {
    pub fn new(params: VariogramParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &VariogramParameters {
        &self.params
    }

    /// Refit range and sill. No-op with fewer than two samples.
    pub fn auto_adjust(&mut self, samples: &[SamplePoint]) {
        self.params = fit_parameters(samples, &self.params);
    }

    pub fn interpolate(&mut self, query: &QueryPoint, samples: &[SamplePoint]) -> Option<f64> {
        if samples.iter().all(SamplePoint::is_finite) {
            self.auto_adjust(samples);
        }
        estimate(query, samples, &self.params)
    }
}
