use serde::{Deserialize, Serialize};

use self::iso_exponential::IsoExponential;
use self::iso_fitter::FitError;

pub mod iso_exponential;
pub mod iso_fitter;

pub trait IsoVariogramModel {
    /// Semivariance at large separation.
    fn c_0(&self) -> f64;
    fn variogram(&self, h: f64) -> f64;
    fn covariogram(&self, h: f64) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariogramKind {
    #[default]
    Exponential,
}

/// Model parameters used to build a kriging system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariogramParameters {
    pub nugget: f64,
    pub sill: f64,
    pub range: f64,
    #[serde(default)]
    pub model: VariogramKind,
}

impl Default for VariogramParameters {
    fn default() -> Self {
        Self {
            nugget: 0.1,
            sill: 1.0,
            range: 1000.0,
            model: VariogramKind::Exponential,
        }
    }
}

impl VariogramParameters {
    /// Validated constructor: `nugget >= 0`, `sill > 0`, `range > 0`, all finite.
    pub fn new(nugget: f64, sill: f64, range: f64) -> Result<Self, FitError> {
        let params = Self {
            nugget,
            sill,
            range,
            model: VariogramKind::Exponential,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), FitError> {
        if !(self.nugget.is_finite() && self.nugget >= 0.0) {
            return Err(FitError::InvalidNugget(self.nugget));
        }
        if !(self.sill.is_finite() && self.sill > 0.0) {
            return Err(FitError::InvalidSill(self.sill));
        }
        if !(self.range.is_finite() && self.range > 0.0) {
            return Err(FitError::InvalidRange(self.range));
        }
        Ok(())
    }

    fn iso_model(&self) -> IsoExponential {
        match self.model {
            VariogramKind::Exponential => IsoExponential::new(self.nugget, self.sill, self.range),
        }
    }
}

impl IsoVariogramModel for VariogramParameters {
    fn c_0(&self) -> f64 {
        self.iso_model().c_0()
    }

    fn variogram(&self, h: f64) -> f64 {
        self.iso_model().variogram(h)
    }

    fn covariogram(&self, h: f64) -> f64 {
        self.iso_model().covariogram(h)
    }
}
