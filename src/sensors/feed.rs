use std::collections::btree_map;
use std::collections::BTreeMap;
use std::time::SystemTime;

use crate::config::MonitorConfig;
use crate::geometry::GeoPoint;
use crate::spatial_database::SamplePoint;

/// Latest reading of one sensor. A reading that carries its own position is mobile.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub value: f64,
    pub location: Option<GeoPoint>,
    pub timestamp: SystemTime,
    pub online: bool,
}

impl SensorReading {
    pub fn stationary(value: f64, timestamp: SystemTime) -> Self {
        Self {
            value,
            location: None,
            timestamp,
            online: true,
        }
    }

    pub fn mobile(value: f64, location: GeoPoint, timestamp: SystemTime) -> Self {
        Self {
            value,
            location: Some(location),
            timestamp,
            online: true,
        }
    }

    /// Position if the sensor reports a finite one.
    pub fn gps(&self) -> Option<GeoPoint> {
        self.location.filter(GeoPoint::is_finite)
    }
}

/// Snapshot of every sensor keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorFeed {
    readings: BTreeMap<String, SensorReading>,
}

impl SensorFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, reading: SensorReading) -> Option<SensorReading> {
        self.readings.insert(id.into(), reading)
    }

    pub fn get(&self, id: &str) -> Option<&SensorReading> {
        self.readings.get(id)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SensorReading> {
        self.readings.iter()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// `(online, total)` sensor counts.
    pub fn counts(&self) -> (usize, usize) {
        let online = self.readings.values().filter(|r| r.online).count();
        (online, self.readings.len())
    }

    /// Sensors reporting a finite position.
    pub fn mobile(&self) -> impl Iterator<Item = (&str, &SensorReading, GeoPoint)> {
        self.readings
            .iter()
            .filter_map(|(id, r)| r.gps().map(|p| (id.as_str(), r, p)))
    }

    /// Sensors without a position, excluding any id naming itself mobile.
    pub fn stationary(&self) -> impl Iterator<Item = (&str, &SensorReading)> {
        self.readings
            .iter()
            .filter(|(id, r)| r.location.is_none() && !id.to_ascii_lowercase().contains("mobile"))
            .map(|(id, r)| (id.as_str(), r))
    }

    /// Online stationary readings placed at their configured positions.
    pub fn known_points(&self, config: &MonitorConfig) -> Vec<SamplePoint> {
        self.stationary()
            .filter(|(_, r)| r.online)
            .map(|(id, r)| {
                let p = config.stationary_location(id);
                SamplePoint::new(p.lat, p.lon, r.value)
            })
            .collect()
    }
}

impl FromIterator<(String, SensorReading)> for SensorFeed {
    fn from_iter<I: IntoIterator<Item = (String, SensorReading)>>(iter: I) -> Self {
        Self {
            readings: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SensorFeed {
    type Item = (&'a String, &'a SensorReading);
    type IntoIter = btree_map::Iter<'a, String, SensorReading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> SensorFeed {
        let now = SystemTime::UNIX_EPOCH;
        let mut feed = SensorFeed::new();
        feed.insert("sender1", SensorReading::stationary(12.0, now));
        feed.insert("sender2", SensorReading::stationary(14.0, now));
        feed.insert(
            "sender3",
            SensorReading {
                online: false,
                ..SensorReading::stationary(16.0, now)
            },
        );
        feed.insert("unlisted", SensorReading::stationary(30.0, now));
        feed.insert("mobile1", SensorReading::mobile(42.0, GeoPoint::new(-7.77, 110.378), now));
        // no gps fix yet
        feed.insert(
            "mobile2",
            SensorReading {
                location: Some(GeoPoint::new(f64::NAN, 110.0)),
                ..SensorReading::stationary(5.0, now)
            },
        );
        feed
    }

    #[test]
    fn splits_mobile_and_stationary() {
        let feed = feed();
        let mobile = feed.mobile().map(|(id, _, _)| id).collect::<Vec<_>>();
        let stationary = feed.stationary().map(|(id, _)| id).collect::<Vec<_>>();

        assert_eq!(mobile, vec!["mobile1"]);
        assert_eq!(stationary, vec!["sender1", "sender2", "sender3", "unlisted"]);
    }

    #[test]
    fn known_points_use_configured_positions() {
        let config = MonitorConfig::default();
        let points = feed().known_points(&config);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], SamplePoint::new(-7.764729, 110.376655, 12.0));
        assert_eq!(points[1].value, 14.0);
        // unlisted ids land on the fallback position
        assert_eq!(points[2].location(), config.fallback_location);
    }

    #[test]
    fn counts_online() {
        assert_eq!(feed().counts(), (5, 6));
    }
}
