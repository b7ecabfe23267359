//! Runner athletic profile.

use super::AthleteProfile;

/// Athletic profile for running activities.
///
/// Based on typical recreational to competitive runner performance:
/// - Base pace: ~5:00/km (3.5 m/s)
/// - Slows ~0.5% per km once past 10 km
#[derive(Debug, Clone)]
pub struct RunnerProfile {
    /// Base speed in m/s when fresh.
    base_speed: f64,
    /// Performance variance (coefficient of variation).
    variance: f64,
}

impl Default for RunnerProfile {
    fn default() -> Self {
        Self {
            base_speed: 3.5, // ~5:00/km
            variance: 0.08,
        }
    }
}

impl RunnerProfile {
    /// Creates a new runner profile with specified base pace.
    ///
    /// # Arguments
    /// * `pace_min_per_km` - Base pace in minutes per kilometer (e.g., 5.0 for 5:00/km)
    pub fn with_pace(pace_min_per_km: f64) -> Self {
        let base_speed = 1000.0 / (pace_min_per_km * 60.0);
        Self {
            base_speed,
            ..Default::default()
        }
    }

    /// Creates an elite runner profile (~3:00/km base pace).
    pub fn elite() -> Self {
        Self::with_pace(3.0)
    }

    /// Creates a recreational runner profile (~6:00/km base pace).
    pub fn recreational() -> Self {
        Self::with_pace(6.0)
    }
}

impl AthleteProfile for RunnerProfile {
    fn base_speed_mps(&self) -> f64 {
        self.base_speed
    }

    fn fatigue_factor(&self, distance_m: f64) -> f64 {
        let km_past_fresh = (distance_m / 1000.0 - 10.0).max(0.0);
        (1.0 - km_past_fresh * 0.005).max(0.7)
    }

    fn variance(&self) -> f64 {
        self.variance
    }
}
