use serde::{Deserialize, Serialize};

use crate::geometry::GeoPoint;

pub mod point_set;

/// A known measurement at a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub lat: f64,
    pub lon: f64,
    pub value: f64,
}

impl SamplePoint {
    #[inline(always)]
    pub const fn new(lat: f64, lon: f64, value: f64) -> Self {
        Self { lat, lon, value }
    }

    #[inline(always)]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    #[inline(always)]
    pub fn distance_to(&self, point: &GeoPoint) -> f64 {
        self.location().distance_to(point)
    }

    #[inline(always)]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite() && self.value.is_finite()
    }
}

/// Location at which an estimate is requested.
pub type QueryPoint = GeoPoint;
