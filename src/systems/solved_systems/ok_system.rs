use nalgebra::{DMatrix, DVector, DVectorView};

use crate::systems::lu::{self, SolveError};

use super::SolvedSystem;

/// Solution of an ordinary kriging system: `n` weights followed by the Lagrange
/// multiplier.
#[derive(Clone, Debug)]
pub struct SolvedOKSystem {
    pub n_cond: usize,
    solution: DVector<f64>,
    cov_vec: DVector<f64>,
}

impl SolvedOKSystem {
    pub fn solve(cov_mat: DMatrix<f64>, cov_vec: DVector<f64>) -> Result<Self, SolveError> {
        let n_cond = cov_vec.len().saturating_sub(1);
        let solution = lu::solve(cov_mat, cov_vec.clone())?;
        Ok(Self {
            n_cond,
            solution,
            cov_vec,
        })
    }

    pub fn lagrange_multiplier(&self) -> f64 {
        self.solution[self.n_cond]
    }

    /// Kriging variance `c_0 - w . c - mu`, with `c_0` the covariance at zero lag.
    pub fn variance(&self, c_0: f64) -> f64 {
        let wc = self.weights().dot(&self.cov_vec.rows(0, self.n_cond));
        c_0 - wc - self.lagrange_multiplier()
    }
}

impl SolvedSystem for SolvedOKSystem {
    #[inline(always)]
    fn estimate(&self, values: &[f64]) -> f64 {
        self.solution
            .iter()
            .take(self.n_cond)
            .zip(values)
            .map(|(w, v)| w * v)
            .sum()
    }

    fn weights(&self) -> DVectorView<'_, f64> {
        self.solution.rows(0, self.n_cond)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeoPoint;
    use crate::spatial_database::SamplePoint;
    use crate::systems::system_builder::OKSystemBuilder;
    use crate::variography::model_variograms::iso_fitter::fit_parameters;
    use crate::variography::model_variograms::{IsoVariogramModel, VariogramParameters};
    use approx::assert_relative_eq;
    use itertools::Itertools;
    use proptest::prelude::*;

    fn solve_at(cond: &[SamplePoint], q: GeoPoint) -> (SolvedOKSystem, VariogramParameters) {
        let params = fit_parameters(cond, &VariogramParameters::default());
        let c = OKSystemBuilder::build_cov_mat(cond, &params);
        let d = OKSystemBuilder::build_cov_vec(cond, &q, &params);
        (SolvedOKSystem::solve(c, d).unwrap(), params)
    }

    #[test]
    fn weights_sum_to_one() {
        let cond = vec![
            SamplePoint::new(-7.764729, 110.376655, 12.0),
            SamplePoint::new(-7.767512, 110.378690, 14.0),
            SamplePoint::new(-7.768433, 110.382745, 16.0),
            SamplePoint::new(-7.765948, 110.373671, 18.0),
            SamplePoint::new(-7.771038, 110.378416, 20.0),
        ];
        let (system, _) = solve_at(&cond, GeoPoint::new(-7.769, 110.377));
        assert_eq!(system.weights().len(), 5);
        assert_relative_eq!(system.weights().sum(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn exact_at_sample_location() {
        let cond = vec![
            SamplePoint::new(0.0, 0.0, 10.0),
            SamplePoint::new(0.0, 1.0, 20.0),
            SamplePoint::new(1.0, 0.0, 30.0),
        ];
        let values = cond.iter().map(|s| s.value).collect::<Vec<_>>();
        let (system, params) = solve_at(&cond, GeoPoint::new(0.0, 0.0));

        assert_relative_eq!(system.estimate(&values), 10.0, epsilon = 1e-6);
        assert_relative_eq!(system.weights()[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(system.variance(params.covariogram(0.0)), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn variance_grows_away_from_samples() {
        let cond = vec![
            SamplePoint::new(0.0, 0.0, 10.0),
            SamplePoint::new(0.0, 0.01, 20.0),
            SamplePoint::new(0.01, 0.0, 30.0),
        ];
        let (near, params) = solve_at(&cond, GeoPoint::new(0.001, 0.001));
        let (far, _) = solve_at(&cond, GeoPoint::new(0.05, 0.05));
        let c_0 = params.covariogram(0.0);
        assert!(far.variance(c_0) > near.variance(c_0));
    }

    proptest! {
        #[test]
        fn unbiased_for_random_layouts(
            coords in prop::collection::vec((-0.05f64..0.05, -0.05f64..0.05, 0.0f64..100.0), 2..10),
            q in (-0.05f64..0.05, -0.05f64..0.05),
        ) {
            let cond = coords
                .iter()
                .map(|&(lat, lon, v)| SamplePoint::new(lat, lon, v))
                .collect::<Vec<_>>();
            prop_assume!(cond
                .iter()
                .tuple_combinations()
                .all(|(a, b)| a.distance_to(&b.location()) > 10.0));

            let params = fit_parameters(&cond, &VariogramParameters::default());
            let c = OKSystemBuilder::build_cov_mat(&cond, &params);
            let d = OKSystemBuilder::build_cov_vec(&cond, &GeoPoint::new(q.0, q.1), &params);
            let solved = SolvedOKSystem::solve(c, d);
            prop_assert!(solved.is_ok(), "solve failed: {:?}", solved.err());
            let system = solved.unwrap();
            prop_assert!((system.weights().sum() - 1.0).abs() < 1e-6);
        }
    }
}
