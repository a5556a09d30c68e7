use itertools::Itertools;
use thiserror::Error;

use crate::spatial_database::SamplePoint;

use super::VariogramParameters;

/// Fraction of the mean pairwise distance used as the practical range.
pub const RANGE_FRACTION: f64 = 0.7;

/// Lower bound on the fitted sill.
pub const MIN_SILL: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("invalid nugget: {0}")]
    InvalidNugget(f64),
    #[error("invalid sill: {0}")]
    InvalidSill(f64),
    #[error("invalid range: {0}")]
    InvalidRange(f64),
}

/// Heuristic fit of range and sill to a sample set.
///
/// This is not a likelihood fit. The range is tied to the sensor spacing and the sill
/// to the spread of the observed values:
///
/// * `range = 0.7 * mean pairwise distance`
/// * `sill = max(0.1, population variance of values)`
///
/// The nugget is carried over from `prior`. With fewer than two samples `prior` is
/// returned unchanged. When every sample sits at the same location the mean distance
/// is zero and the prior range is kept, since a zero range is not a valid model.
pub fn fit_parameters(samples: &[SamplePoint], prior: &VariogramParameters) -> VariogramParameters {
    if samples.len() < 2 {
        return *prior;
    }

    let (dist_sum, n_pairs) = samples
        .iter()
        .tuple_combinations()
        .map(|(a, b)| a.distance_to(&b.location()))
        .fold((0f64, 0usize), |(sum, n), d| (sum + d, n + 1));

    let mut fitted = *prior;

    let range = RANGE_FRACTION * dist_sum / n_pairs as f64;
    if range.is_finite() && range > 0.0 {
        fitted.range = range;
    }

    let sill = MIN_SILL.max(population_variance(samples.iter().map(|s| s.value)));
    if sill.is_finite() {
        fitted.sill = sill;
    }

    tracing::debug!(
        nugget = fitted.nugget,
        sill = fitted.sill,
        range = fitted.range,
        n_pairs,
        "variogram parameters fitted"
    );

    fitted
}

pub(crate) fn population_variance<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let values = values.into_iter();
    let (sum, n) = values.clone().fold((0f64, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        return 0.0;
    }
    let mean = sum / n as f64;
    values.map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64
}
