use std::fmt;

use serde::{Deserialize, Serialize};

pub mod aabb;
pub mod geodesic;

/// A WGS-84 location in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline(always)]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine distance to `other` in meters.
    #[inline(always)]
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        geodesic::haversine_distance(self.lat, self.lon, other.lat, other.lon)
    }

    #[inline(always)]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
