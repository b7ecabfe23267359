//! Configuration types for test data generation.

use serde::{Deserialize, Serialize};

/// Shape of a generated activity stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Distance to cover in meters.
    pub distance_meters: f64,
    /// Nominal seconds between samples.
    pub sample_interval_s: f64,
    /// Maximum deviation from the nominal interval in seconds.
    pub interval_jitter_s: f64,
    /// Probability that a sample is recorded while standing still.
    pub pause_probability: f64,
    /// Duration range for pauses (min, max) in seconds.
    pub pause_duration_range: (f64, f64),
    /// Per-sample speed noise as a coefficient of variation.
    pub speed_noise: f64,
    /// Probability of a GPS glitch that makes cumulative distance jump back.
    /// Generated streams are only monotonic when this is zero.
    pub distance_reset_probability: f64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            distance_meters: 5000.0,
            sample_interval_s: 1.0,
            interval_jitter_s: 0.2,
            pause_probability: 0.005,
            pause_duration_range: (5.0, 60.0),
            speed_noise: 0.05,
            distance_reset_probability: 0.0,
        }
    }
}

/// Configuration for seeding operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Number of running activities to generate.
    pub runs: usize,
    /// Number of cycling activities to generate.
    pub rides: usize,
    /// Distance range for runs in meters.
    pub run_distance_range: (f64, f64),
    /// Distance range for rides in meters.
    pub ride_distance_range: (f64, f64),
    /// Number of activities with GPS distance resets.
    pub glitched: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            runs: 20,
            rides: 10,
            run_distance_range: (3000.0, 43000.0),
            ride_distance_range: (20000.0, 80000.0),
            glitched: 2,
        }
    }
}
