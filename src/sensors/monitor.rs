use crate::config::{ConfigError, MonitorConfig};
use crate::estimators::ordinary_kriging::KrigingEngine;
use crate::geometry::aabb::Aabb;
use crate::spatial_database::QueryPoint;

use super::feed::SensorFeed;
use super::severity::Severity;
use super::trail::TrailTracker;

/// The mobile override only applies once the stationary network can krige on its own.
const MIN_KNOWN_FOR_OVERRIDE: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum EstimateSource {
    Kriging { n_cond: usize },
    MobileOverride { sensor_id: String, distance_m: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointEstimate {
    pub value: f64,
    pub severity: Severity,
    pub source: EstimateSource,
}

impl PointEstimate {
    fn new(value: f64, source: EstimateSource) -> Self {
        Self {
            value,
            severity: Severity::from_ppm(value),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Query fell outside the bounding box; nothing was estimated.
    OutOfBounds,
    /// No estimate could be produced. Distinct from a zero estimate.
    Unavailable,
    Estimate(PointEstimate),
}

impl QueryOutcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            QueryOutcome::Estimate(e) => Some(e.value),
            _ => None,
        }
    }
}

/// Answers point queries against live sensor feeds.
#[derive(Debug, Clone)]
pub struct Monitor {
    config: MonitorConfig,
    bounds: Aabb,
    engine: KrigingEngine,
    trails: TrailTracker,
}

impl Monitor {
    pub fn new(config: MonitorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = config.bounding_box()?;
        let engine = KrigingEngine::new(config.variogram);
        Ok(Self {
            config,
            bounds,
            engine,
            trails: TrailTracker::default(),
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn engine(&self) -> &KrigingEngine {
        &self.engine
    }

    pub fn trails(&self) -> &TrailTracker {
        &self.trails
    }

    /// Bounding box test. Uses the min/max of the polygon corners, not the polygon.
    pub fn accepts(&self, query: &QueryPoint) -> bool {
        self.bounds.contains_point(query)
    }

    /// Record mobile sensor positions from a fresh feed.
    pub fn observe(&mut self, feed: &SensorFeed) {
        for (id, _, position) in feed.mobile() {
            self.trails.record(id, position);
        }
    }

    pub fn query(&mut self, feed: &SensorFeed, query: &QueryPoint) -> QueryOutcome {
        if !self.accepts(query) {
            tracing::debug!(%query, "query outside bounds");
            return QueryOutcome::OutOfBounds;
        }

        let known = feed.known_points(&self.config);

        if known.len() >= MIN_KNOWN_FOR_OVERRIDE {
            let nearby_mobile = feed
                .mobile()
                .filter(|(id, r, _)| {
                    r.online && r.value.is_finite() && self.config.is_designated_mobile(id)
                })
                .map(|(id, r, p)| (id, r.value, p.distance_to(query)))
                .find(|(_, _, d)| *d <= self.config.override_radius_m);

            if let Some((id, value, distance_m)) = nearby_mobile {
                tracing::debug!(sensor = id, distance_m, value, "mobile override");
                return QueryOutcome::Estimate(PointEstimate::new(
                    value,
                    EstimateSource::MobileOverride {
                        sensor_id: id.to_string(),
                        distance_m,
                    },
                ));
            }
        }

        match self.engine.interpolate(query, &known) {
            Some(value) => QueryOutcome::Estimate(PointEstimate::new(
                value,
                EstimateSource::Kriging {
                    n_cond: known.len(),
                },
            )),
            None => QueryOutcome::Unavailable,
        }
    }
}
