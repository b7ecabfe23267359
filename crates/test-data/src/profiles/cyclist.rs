//! Cyclist athletic profile.

use super::AthleteProfile;

/// Athletic profile for cycling activities.
///
/// Based on typical recreational to competitive cyclist performance:
/// - Base speed: ~28 km/h (8.0 m/s)
/// - Slows ~0.1% per km once past 40 km
#[derive(Debug, Clone)]
pub struct CyclistProfile {
    /// Base speed in m/s when fresh.
    base_speed: f64,
    /// Performance variance (coefficient of variation).
    variance: f64,
}

impl Default for CyclistProfile {
    fn default() -> Self {
        Self {
            base_speed: 8.0, // ~28 km/h
            variance: 0.10,
        }
    }
}

impl CyclistProfile {
    /// Creates a new cyclist profile with specified base speed.
    ///
    /// # Arguments
    /// * `speed_kmh` - Base speed in km/h
    pub fn with_speed(speed_kmh: f64) -> Self {
        let base_speed = speed_kmh / 3.6;
        Self {
            base_speed,
            ..Default::default()
        }
    }

    /// Creates an elite cyclist profile (~35 km/h base).
    pub fn elite() -> Self {
        Self::with_speed(35.0)
    }

    /// Creates a recreational cyclist profile (~22 km/h base).
    pub fn recreational() -> Self {
        Self::with_speed(22.0)
    }
}

impl AthleteProfile for CyclistProfile {
    fn base_speed_mps(&self) -> f64 {
        self.base_speed
    }

    fn fatigue_factor(&self, distance_m: f64) -> f64 {
        let km_past_fresh = (distance_m / 1000.0 - 40.0).max(0.0);
        (1.0 - km_past_fresh * 0.001).max(0.8)
    }

    fn variance(&self) -> f64 {
        self.variance
    }
}
