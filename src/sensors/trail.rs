use std::collections::{BTreeMap, VecDeque};

use crate::geometry::GeoPoint;

pub const DEFAULT_TRAIL_LEN: usize = 50;

/// Recent positions of each mobile sensor, oldest first.
#[derive(Debug, Clone)]
pub struct TrailTracker {
    max_len: usize,
    trails: BTreeMap<String, VecDeque<GeoPoint>>,
}

impl Default for TrailTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_LEN)
    }
}

impl TrailTracker {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len,
            trails: BTreeMap::new(),
        }
    }

    /// Append `position` unless it equals the last recorded one. Returns whether it was appended.
    pub fn record(&mut self, id: &str, position: GeoPoint) -> bool {
        let trail = self.trails.entry(id.to_string()).or_default();
        if trail.back() == Some(&position) {
            return false;
        }
        trail.push_back(position);
        while trail.len() > self.max_len {
            trail.pop_front();
        }
        true
    }

    pub fn trail(&self, id: &str) -> Option<&VecDeque<GeoPoint>> {
        self.trails.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.trails.keys().map(String::as_str)
    }
}
