//! Activity stream generation from athlete profiles.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use efforts::streams::{RawStreams, join_stream};

use crate::config::StreamConfig;
use crate::profiles::{self, AthleteProfile};

/// Generated activity streams ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedStreams {
    pub name: String,
    /// Elapsed seconds since the first sample.
    pub time: Vec<f64>,
    /// Cumulative distance in meters.
    pub distance: Vec<f64>,
}

impl GeneratedStreams {
    /// Encodes the streams in their stored text form.
    pub fn to_raw(&self) -> RawStreams {
        RawStreams {
            time: join_stream(&self.time),
            distance: join_stream(&self.distance),
        }
    }

    pub fn total_distance(&self) -> f64 {
        match (self.distance.first(), self.distance.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}

/// Generates time/distance streams for one kind of athlete.
pub struct StreamGenerator<P: AthleteProfile> {
    profile: P,
    config: StreamConfig,
}

impl<P: AthleteProfile> StreamGenerator<P> {
    /// Creates a generator with default stream configuration.
    pub fn new(profile: P) -> Self {
        Self {
            profile,
            config: StreamConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(profile: P, config: StreamConfig) -> Self {
        Self { profile, config }
    }

    /// Sets the distance to cover.
    pub fn distance(mut self, meters: f64) -> Self {
        self.config.distance_meters = meters;
        self
    }

    /// Sets the probability of GPS distance resets.
    pub fn distance_resets(mut self, probability: f64) -> Self {
        self.config.distance_reset_probability = probability;
        self
    }

    /// Generates one activity.
    pub fn generate(&self, name: impl Into<String>, rng: &mut impl Rng) -> GeneratedStreams {
        let config = &self.config;
        let day_factor = profiles::sample_variance(&self.profile, rng);
        let noise = Normal::new(1.0, config.speed_noise.max(0.0)).ok();

        let mut time = vec![0.0];
        let mut distance = vec![0.0];
        let mut t = 0.0;
        let mut d = 0.0;

        while d < config.distance_meters {
            let jitter = if config.interval_jitter_s > 0.0 {
                rng.gen_range(-config.interval_jitter_s..config.interval_jitter_s)
            } else {
                0.0
            };
            let dt = (config.sample_interval_s + jitter).max(0.2);

            if rng.gen_bool(config.pause_probability.clamp(0.0, 1.0)) {
                let (min, max) = config.pause_duration_range;
                t += if max > min { rng.gen_range(min..max) } else { min };
                time.push(t);
                distance.push(d);
                continue;
            }

            let sample_factor = noise
                .as_ref()
                .map_or(1.0, |n| n.sample(rng).clamp(0.5, 1.5));
            let speed = profiles::speed_at_distance(&self.profile, d, day_factor * sample_factor);

            t += dt;
            d += speed * dt;

            if rng.gen_bool(config.distance_reset_probability.clamp(0.0, 1.0)) {
                // Receiver briefly reports a much shorter total
                time.push(t);
                distance.push(d * rng.gen_range(0.1..0.9));
                t += dt;
            }

            time.push(t);
            distance.push(d);
        }

        GeneratedStreams {
            name: name.into(),
            time,
            distance,
        }
    }

    /// Generates `count` activities named after their index.
    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedStreams> {
        (0..count)
            .map(|i| self.generate(format!("Activity {}", i + 1), rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{CyclistProfile, RunnerProfile};
    use efforts::{
        effort_finder::{find_segment_extremes, is_reachable},
        models::TargetDistance,
        streams::{ActivityStreams, StreamPolicy},
    };
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_generated_streams_are_monotonic() {
        let mut rng = StdRng::seed_from_u64(42);
        let streams = StreamGenerator::new(RunnerProfile::default())
            .distance(10_000.0)
            .generate("Morning Run", &mut rng);

        assert_eq!(streams.time.len(), streams.distance.len());
        assert!(streams.time.windows(2).all(|w| w[1] > w[0]));
        assert!(streams.distance.windows(2).all(|w| w[1] >= w[0]));
        assert!(streams.total_distance() >= 10_000.0);
    }

    #[test]
    fn test_raw_streams_pass_validation() {
        let mut rng = StdRng::seed_from_u64(7);
        let streams = StreamGenerator::new(CyclistProfile::default())
            .distance(30_000.0)
            .generate("Road Ride", &mut rng);

        let parsed = ActivityStreams::parse(&streams.to_raw(), StreamPolicy::Validate).unwrap();
        assert_eq!(parsed.len(), streams.time.len());
    }

    #[test]
    fn test_resets_break_monotonicity() {
        let mut rng = StdRng::seed_from_u64(3);
        let streams = StreamGenerator::new(RunnerProfile::default())
            .distance(5000.0)
            .distance_resets(0.05)
            .generate("Glitchy Run", &mut rng);

        assert!(streams.distance.windows(2).any(|w| w[1] < w[0]));
        assert!(ActivityStreams::parse(&streams.to_raw(), StreamPolicy::Validate).is_err());
        assert!(ActivityStreams::parse(&streams.to_raw(), StreamPolicy::Trust).is_ok());
    }

    #[test]
    fn test_best_effort_not_slower_than_worst() {
        let mut rng = StdRng::seed_from_u64(2024);
        let generator = StreamGenerator::new(RunnerProfile::recreational()).distance(21_500.0);

        for streams in generator.generate_batch(3, &mut rng) {
            for target in TargetDistance::defaults() {
                if !is_reachable(&streams.distance, target.meters()) {
                    assert!(target.0 > 21_097);
                    continue;
                }
                let extremes =
                    find_segment_extremes(&streams.time, &streams.distance, target.meters())
                        .unwrap();
                assert!(extremes.min_duration <= extremes.max_duration);
            }
        }
    }
}
