use super::IsoVariogramModel;

/// Exponential model with a nugget.
///
/// `range` is the practical range: the structured part reaches ~95% of the sill
/// at `h == range`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoExponential {
    pub nugget: f64,
    pub sill: f64,
    pub range: f64,
}

impl IsoExponential {
    const PRACTICAL_RANGE_FACTOR: f64 = 3.0;

    pub fn new(nugget: f64, sill: f64, range: f64) -> Self {
        Self {
            nugget,
            sill,
            range,
        }
    }
}

impl IsoVariogramModel for IsoExponential {
    fn c_0(&self) -> f64 {
        self.nugget + self.sill
    }

    fn variogram(&self, h: f64) -> f64 {
        if h == 0f64 {
            return 0f64;
        }
        self.nugget + self.sill * (1.0 - (-Self::PRACTICAL_RANGE_FACTOR * h / self.range).exp())
    }

    // covariance is taken against the sill alone, so off-diagonal entries carry
    // a -nugget offset
    fn covariogram(&self, h: f64) -> f64 {
        self.sill - self.variogram(h)
    }
}
