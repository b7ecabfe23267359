//! Athletic performance profiles.
//!
//! Profiles define realistic speeds and fatigue for different activity types.
//! They are used by the stream generator to produce realistic distance samples.

mod cyclist;
mod runner;

pub use cyclist::CyclistProfile;
pub use runner::RunnerProfile;

/// Trait for athletic performance profiles.
pub trait AthleteProfile: Send + Sync {
    /// Base speed when fresh, in meters per second.
    fn base_speed_mps(&self) -> f64;

    /// Speed multiplier after covering `distance_m` meters.
    ///
    /// Returns 1.0 when fresh and decreases as the athlete tires.
    fn fatigue_factor(&self, distance_m: f64) -> f64;

    /// Day-to-day performance variance as a coefficient of variation (0.0 - 1.0).
    ///
    /// A value of 0.1 means typical day-to-day variation of ±10%.
    fn variance(&self) -> f64;
}

/// Speed at a point in the activity, never below 0.5 m/s.
pub fn speed_at_distance(profile: &dyn AthleteProfile, distance_m: f64, variance_factor: f64) -> f64 {
    let target = profile.base_speed_mps() * profile.fatigue_factor(distance_m);
    (target * variance_factor).max(0.5)
}

/// Samples a variance factor from normal distribution.
/// Returns a multiplier around 1.0.
pub fn sample_variance(profile: &dyn AthleteProfile, rng: &mut impl rand::Rng) -> f64 {
    use rand_distr::{Distribution, Normal};

    let std_dev = profile.variance();
    match Normal::new(1.0, std_dev) {
        Ok(normal) if std_dev > 0.0 => {
            let sample: f64 = normal.sample(rng);
            sample.clamp(0.7, 1.4)
        }
        _ => 1.0,
    }
}
