use std::fmt;

use serde::{Deserialize, Serialize};

/// CO severity band, upper bounds inclusive: `[0, 9]`, `(9, 35]`, `(35, 100]`, `(100, inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Safe,
    Moderate,
    Unhealthy,
    Dangerous,
}

impl Severity {
    pub const SAFE_MAX: f64 = 9.0;
    pub const MODERATE_MAX: f64 = 35.0;
    pub const UNHEALTHY_MAX: f64 = 100.0;

    /// Band for a reading. NaN maps to `Dangerous`; use
    /// [`try_from_ppm`](Self::try_from_ppm) when the reading may not be finite.
    pub fn from_ppm(ppm: f64) -> Self {
        Self::try_from_ppm(ppm).unwrap_or(Severity::Dangerous)
    }

    /// `None` for NaN. Infinities land in the outer bands.
    pub fn try_from_ppm(ppm: f64) -> Option<Self> {
        if ppm.is_nan() {
            return None;
        }
        Some(Self::band(ppm))
    }

    fn band(ppm: f64) -> Self {
        if ppm <= Self::SAFE_MAX {
            Severity::Safe
        } else if ppm <= Self::MODERATE_MAX {
            Severity::Moderate
        } else if ppm <= Self::UNHEALTHY_MAX {
            Severity::Unhealthy
        } else {
            Severity::Dangerous
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Safe => "Safe",
            Severity::Moderate => "Moderate",
            Severity::Unhealthy => "Unhealthy",
            Severity::Dangerous => "Dangerous",
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            Severity::Safe => "#22c55e",
            Severity::Moderate => "#eab308",
            Severity::Unhealthy => "#f97316",
            Severity::Dangerous => "#ef4444",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
