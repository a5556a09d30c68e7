use super::GeoPoint;

/// Axis aligned lat/lon box.
///
/// Built from the corners of a bounding polygon, membership is tested against the
/// min/max of those corners rather than the polygon itself. For a skewed
/// quadrilateral this accepts a slightly larger area than the polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: GeoPoint,
    pub maxs: GeoPoint,
}

impl Aabb {
    #[inline(always)]
    pub fn from_min_max(mins: GeoPoint, maxs: GeoPoint) -> Self {
        Self { mins, maxs }
    }

    /// Box enclosing every corner. Returns `None` for an empty corner list.
    pub fn from_corners(corners: &[GeoPoint]) -> Option<Self> {
        let (first, rest) = corners.split_first()?;
        let aabb = rest.iter().fold(Self::from_min_max(*first, *first), |acc, p| {
            Self::from_min_max(
                GeoPoint::new(acc.mins.lat.min(p.lat), acc.mins.lon.min(p.lon)),
                GeoPoint::new(acc.maxs.lat.max(p.lat), acc.maxs.lon.max(p.lon)),
            )
        });
        Some(aabb)
    }

    /// Inclusive on every edge.
    #[inline(always)]
    pub fn contains_point(&self, point: &GeoPoint) -> bool {
        self.mins.lat <= point.lat
            && self.mins.lon <= point.lon
            && self.maxs.lat >= point.lat
            && self.maxs.lon >= point.lon
    }

    #[inline(always)]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.mins.lat + self.maxs.lat) / 2.0,
            (self.mins.lon + self.maxs.lon) / 2.0,
        )
    }

    /// Clamp `point` into the box.
    #[inline(always)]
    pub fn clamped(&self, point: GeoPoint) -> GeoPoint {
        GeoPoint::new(
            point.lat.clamp(self.mins.lat, self.maxs.lat),
            point.lon.clamp(self.mins.lon, self.maxs.lon),
        )
    }
}
