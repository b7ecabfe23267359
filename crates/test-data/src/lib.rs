//! Test data generation for efforts.
//!
//! This crate generates realistic activity streams (elapsed time and
//! cumulative distance) for runners and cyclists, optionally with pauses and
//! GPS distance resets, and seeds them into the database.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let generator = StreamGenerator::new(RunnerProfile::default()).distance(10_000.0);
//! let activities = generator.generate_batch(20, &mut rng);
//! let ids = Seeder::new(db).seed_activities(&activities).await?;
//! ```

pub mod config;
pub mod db;
pub mod generators;
pub mod profiles;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{SeedConfig, StreamConfig};
    pub use crate::db::Seeder;
    pub use crate::generators::{GeneratedStreams, StreamGenerator};
    pub use crate::profiles::{AthleteProfile, CyclistProfile, RunnerProfile, sample_variance};
    pub use rand::{SeedableRng, rngs::StdRng};
}
