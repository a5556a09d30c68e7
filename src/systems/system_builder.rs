use nalgebra::{DMatrix, DVector};

use crate::geometry::GeoPoint;
use crate::spatial_database::SamplePoint;
use crate::variography::model_variograms::IsoVariogramModel;

/// Builds the ordinary kriging system.
///
/// For `n` conditioning points the system is `(n + 1) x (n + 1)`: the covariance
/// block followed by a Lagrange row and column of ones with a zero corner, which
/// forces the weights to sum to one.
pub struct OKSystemBuilder;

impl OKSystemBuilder {
    pub fn build_cov_mat<V: IsoVariogramModel>(cond: &[SamplePoint], vgram: &V) -> DMatrix<f64> {
        let n = cond.len();
        let mut cov_mat = DMatrix::from_element(n + 1, n + 1, 1.0);

        // symmetric, so only compute the lower triangle
        for (i, p1) in cond.iter().enumerate() {
            for (j, p2) in cond.iter().enumerate().take(i + 1) {
                let h = p1.distance_to(&p2.location());
                let cov = vgram.covariogram(h);
                cov_mat[(i, j)] = cov;
                cov_mat[(j, i)] = cov;
            }
        }

        cov_mat[(n, n)] = 0.0;
        cov_mat
    }

    pub fn build_cov_vec<V: IsoVariogramModel>(
        cond: &[SamplePoint],
        kriging_point: &GeoPoint,
        vgram: &V,
    ) -> DVector<f64> {
        let n = cond.len();
        DVector::from_fn(n + 1, |i, _| {
            if i == n {
                1.0
            } else {
                vgram.covariogram(cond[i].distance_to(kriging_point))
            }
        })
    }
}
