//! Seeded mock feed.
//!
//! Stationary values drift around a per-sensor baseline with uniform jitter, a slow
//! sinusoid and rare spikes. The mobile sensor random-walks inside the bounding box,
//! reflecting its heading at the edges.

use std::f64::consts::PI;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::config::{ConfigError, MonitorConfig};
use crate::geometry::aabb::Aabb;
use crate::geometry::GeoPoint;

use super::feed::{SensorFeed, SensorReading};

const METERS_PER_DEG_LAT: f64 = 111_320.0;
const MOBILE_STEP_M: f64 = 8.0;
const HEADING_WANDER: f64 = 0.2;
const SPIKE_PROBABILITY: f64 = 0.03;
const SPIKE_MAX: f64 = 30.0;
const DIURNAL_AMPLITUDE: f64 = 5.0;
const DIURNAL_PERIOD_MS: f64 = 60_000.0;
const MIN_PPM: f64 = 1.0;
const MAX_PPM: f64 = 150.0;

const STATIONARY_JITTER: f64 = 6.0;
const MOBILE_BASE: f64 = 15.0;
const MOBILE_JITTER: f64 = 10.0;
const MOBILE_PHASE_MS: f64 = 8888.0;
const STATIONARY_PHASE_MS: f64 = 1234.0;

#[derive(Debug, Clone, Copy)]
struct MobileState {
    position: GeoPoint,
    heading: f64,
}

pub struct MockSensorFeed {
    rng: StdRng,
    stationary_ids: Vec<String>,
    mobile_id: String,
    bounds: Aabb,
    mobile: MobileState,
    phase_ms: f64,
    clock: SystemTime,
    interval: Duration,
    unit: Uniform<f64>,
}

impl MockSensorFeed {
    /// Feed for the sensors in `config`, starting its clock at `start`.
    pub fn new(config: &MonitorConfig, seed: u64, start: SystemTime) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = config.bounding_box()?;
        let mut rng = StdRng::seed_from_u64(seed);

        let phase_ms = rng.gen::<f64>() * 1000.0 * 1000.0;
        let a = config.bounds[0];
        let b = config.bounds[2];
        let mobile = MobileState {
            position: GeoPoint::new((a.lat + b.lat) / 2.0, (a.lon + b.lon) / 2.0),
            heading: rng.gen::<f64>() * 2.0 * PI,
        };

        Ok(Self {
            rng,
            stationary_ids: config.stationary_locations.keys().cloned().collect(),
            mobile_id: config.mobile_sensor_id.clone(),
            bounds,
            mobile,
            phase_ms,
            clock: start,
            interval: config.refresh_interval(),
            unit: Uniform::new(0.0, 1.0),
        })
    }

    pub fn mobile_position(&self) -> GeoPoint {
        self.mobile.position
    }

    /// Advance the mobile sensor and produce a full snapshot stamped `now`.
    pub fn tick(&mut self, now: SystemTime) -> SensorFeed {
        let t = now
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as f64
            + self.phase_ms;

        self.step_mobile();

        let mut feed = SensorFeed::new();
        for idx in 0..self.stationary_ids.len() {
            let base = 12.0 + (idx % 8) as f64 * 2.0;
            let value = self.generate_ppm(base, t + idx as f64 * STATIONARY_PHASE_MS, STATIONARY_JITTER);
            feed.insert(self.stationary_ids[idx].clone(), SensorReading::stationary(value, now));
        }

        let value = self.generate_ppm(MOBILE_BASE, t + MOBILE_PHASE_MS, MOBILE_JITTER);
        feed.insert(
            self.mobile_id.clone(),
            SensorReading::mobile(value, self.mobile.position, now),
        );

        tracing::trace!(sensors = feed.len(), mobile = %self.mobile.position, "mock feed tick");
        feed
    }

    fn generate_ppm(&mut self, base: f64, t: f64, jitter: f64) -> f64 {
        let diurnal = DIURNAL_AMPLITUDE * (t / DIURNAL_PERIOD_MS).sin();
        let noise = (self.unit.sample(&mut self.rng) - 0.5) * jitter;
        let spike = if self.rng.gen_bool(SPIKE_PROBABILITY) {
            SPIKE_MAX * self.unit.sample(&mut self.rng)
        } else {
            0.0
        };
        (base + diurnal + noise + spike).clamp(MIN_PPM, MAX_PPM)
    }

    fn step_mobile(&mut self) {
        let MobileState {
            position,
            mut heading,
        } = self.mobile;

        let meters_per_deg_lon = METERS_PER_DEG_LAT * position.lat.to_radians().cos();
        let next_lat = position.lat + heading.sin() * MOBILE_STEP_M / METERS_PER_DEG_LAT;
        let next_lon = position.lon + heading.cos() * MOBILE_STEP_M / meters_per_deg_lon;

        if next_lat < self.bounds.mins.lat || next_lat > self.bounds.maxs.lat {
            heading = -heading;
        }
        if next_lon < self.bounds.mins.lon || next_lon > self.bounds.maxs.lon {
            heading = PI - heading;
        }
        heading += (self.unit.sample(&mut self.rng) - 0.5) * HEADING_WANDER;

        self.mobile = MobileState {
            position: self.bounds.clamped(GeoPoint::new(next_lat, next_lon)),
            heading,
        };
    }
}

/// Snapshots at the configured refresh interval.
impl Iterator for MockSensorFeed {
    type Item = SensorFeed;

    fn next(&mut self) -> Option<Self::Item> {
        let now = self.clock;
        self.clock += self.interval;
        Some(self.tick(now))
    }
}
