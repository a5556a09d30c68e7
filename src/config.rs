//! Deployment configuration.
//!
//! [`MonitorConfig::default`] describes the reference deployment: eight stationary
//! senders around Yogyakarta, bounded by the quadrilateral through sender1, sender3,
//! sender8 and sender4, with one mobile sensor `mobile1`.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::aabb::Aabb;
use crate::geometry::GeoPoint;
use crate::variography::model_variograms::iso_fitter::FitError;
use crate::variography::model_variograms::VariogramParameters;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("bounding polygon needs at least 3 corners, got {0}")]
    InvalidBounds(usize),

    #[error("invalid override radius: {0}")]
    InvalidRadius(f64),

    #[error("refresh interval must be non-zero")]
    InvalidRefreshInterval,

    #[error("non-finite location for `{0}`")]
    NonFiniteLocation(String),

    #[error(transparent)]
    Variogram(#[from] FitError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Mobile sensor whose live value overrides nearby estimates. Matched case-insensitively.
    pub mobile_sensor_id: String,
    pub override_radius_m: f64,
    pub refresh_interval_ms: u64,
    /// Position used for a stationary sensor missing from the table.
    pub fallback_location: GeoPoint,
    /// Corners of the bounding polygon, in order.
    pub bounds: Vec<GeoPoint>,
    /// Stationary sensor id to fixed position.
    pub stationary_locations: BTreeMap<String, GeoPoint>,
    /// Starting model. Range and sill are refit on every query.
    pub variogram: VariogramParameters,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        let stationary_locations = [
            ("sender1", -7.764729, 110.376655),
            ("sender2", -7.767512, 110.378690),
            ("sender3", -7.768433, 110.382745),
            ("sender4", -7.765948, 110.373671),
            ("sender5", -7.771038, 110.378416),
            ("sender6", -7.771900, 110.381235),
            ("sender7", -7.771218, 110.374818),
            ("sender8", -7.775635, 110.376152),
        ]
        .into_iter()
        .map(|(id, lat, lon)| (id.to_string(), GeoPoint::new(lat, lon)))
        .collect::<BTreeMap<_, _>>();

        let bounds = ["sender1", "sender3", "sender8", "sender4"]
            .iter()
            .map(|id| stationary_locations[*id])
            .collect();

        Self {
            mobile_sensor_id: "mobile1".to_string(),
            override_radius_m: 100.0,
            refresh_interval_ms: 2000,
            fallback_location: GeoPoint::new(-7.7750, 110.3760),
            bounds,
            stationary_locations,
            variogram: VariogramParameters::default(),
        }
    }
}

impl MonitorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading monitor config");
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bounds.len() < 3 {
            return Err(ConfigError::InvalidBounds(self.bounds.len()));
        }
        if let Some(i) = self.bounds.iter().position(|p| !p.is_finite()) {
            return Err(ConfigError::NonFiniteLocation(format!("bounds[{i}]")));
        }
        if let Some((id, _)) = self
            .stationary_locations
            .iter()
            .find(|(_, p)| !p.is_finite())
        {
            return Err(ConfigError::NonFiniteLocation(id.clone()));
        }
        if !self.fallback_location.is_finite() {
            return Err(ConfigError::NonFiniteLocation("fallback_location".to_string()));
        }
        if !(self.override_radius_m.is_finite() && self.override_radius_m >= 0.0) {
            return Err(ConfigError::InvalidRadius(self.override_radius_m));
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidRefreshInterval);
        }
        self.variogram.validate()?;
        Ok(())
    }

    pub fn bounding_box(&self) -> Result<Aabb, ConfigError> {
        Aabb::from_corners(&self.bounds).ok_or(ConfigError::InvalidBounds(self.bounds.len()))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Position of a stationary sensor, or the fallback when unlisted.
    pub fn stationary_location(&self, id: &str) -> GeoPoint {
        self.stationary_locations
            .get(id)
            .copied()
            .unwrap_or(self.fallback_location)
    }

    pub fn is_designated_mobile(&self, id: &str) -> bool {
        id.eq_ignore_ascii_case(&self.mobile_sensor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempdir::TempDir;

    #[test]
    fn default_is_valid() {
        let config = MonitorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.stationary_locations.len(), 8);
        assert_eq!(config.bounds[2], GeoPoint::new(-7.775635, 110.376152));
        assert_eq!(config.refresh_interval(), Duration::from_secs(2));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = MonitorConfig::from_toml_str(
            r#"
            mobile_sensor_id = "bus7"
            override_radius_m = 50.0

            [variogram]
            nugget = 0.0
            sill = 2.0
            range = 300.0
            "#,
        )
        .unwrap();

        assert_eq!(config.mobile_sensor_id, "bus7");
        assert_eq!(config.override_radius_m, 50.0);
        assert_eq!(config.variogram.range, 300.0);
        assert_eq!(config.bounds, MonitorConfig::default().bounds);
    }

    #[test]
    fn custom_locations() {
        let config = MonitorConfig::from_toml_str(
            r#"
            bounds = [
                { lat = 0.0, lon = 0.0 },
                { lat = 0.0, lon = 1.0 },
                { lat = 1.0, lon = 1.0 },
            ]

            [stationary_locations]
            a = { lat = 0.5, lon = 0.5 }
            "#,
        )
        .unwrap();

        assert_eq!(config.stationary_location("a"), GeoPoint::new(0.5, 0.5));
        assert_eq!(config.stationary_location("zzz"), config.fallback_location);
        let aabb = config.bounding_box().unwrap();
        assert_eq!(aabb.maxs, GeoPoint::new(1.0, 1.0));
    }

    #[test]
    fn rejects_degenerate_bounds() {
        let err = MonitorConfig::from_toml_str("bounds = [{ lat = 0.0, lon = 0.0 }]").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds(1)));
    }

    #[test]
    fn rejects_bad_radius_and_variogram() {
        let err = MonitorConfig::from_toml_str("override_radius_m = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRadius(_)));

        let err = MonitorConfig::from_toml_str("[variogram]\nnugget = 0.0\nsill = -1.0\nrange = 5.0")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Variogram(FitError::InvalidSill(_))));

        let err = MonitorConfig::from_toml_str("refresh_interval_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRefreshInterval));
    }

    #[test]
    fn mobile_id_is_case_insensitive() {
        let config = MonitorConfig::default();
        assert!(config.is_designated_mobile("Mobile1"));
        assert!(!config.is_designated_mobile("mobile2"));
    }

    #[test]
    fn loads_from_file() {
        let dir = TempDir::new("config").unwrap();
        let path = dir.path().join("monitor.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(toml::to_string(&MonitorConfig::default()).unwrap().as_bytes())
            .unwrap();
        drop(file);

        assert_eq!(MonitorConfig::from_path(&path).unwrap(), MonitorConfig::default());
    }
}
