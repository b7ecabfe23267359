//! Default seed script - creates runs, rides and a few glitched activities
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin seed
//! ```

use rand::Rng;
use sqlx::postgres::PgPoolOptions;
use test_data::prelude::*;
use tracing_subscriber::EnvFilter;

use efforts::database::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://docker:pg@0.0.0.0".to_string());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    let db = Database::new(pool);
    db.migrate().await?;

    tracing::info!("Connected to database");

    // Reproducible data
    let mut rng = StdRng::seed_from_u64(12345);
    let config = SeedConfig::default();
    let mut activities = Vec::new();

    for i in 0..config.runs {
        let (min, max) = config.run_distance_range;
        let distance = rng.gen_range(min..max);
        let generator = StreamGenerator::new(RunnerProfile::default()).distance(distance);
        activities.push(generator.generate(format!("Run {}", i + 1), &mut rng));
    }

    for i in 0..config.rides {
        let (min, max) = config.ride_distance_range;
        let distance = rng.gen_range(min..max);
        let generator = StreamGenerator::new(CyclistProfile::default()).distance(distance);
        activities.push(generator.generate(format!("Ride {}", i + 1), &mut rng));
    }

    for i in 0..config.glitched {
        let generator = StreamGenerator::new(RunnerProfile::recreational())
            .distance(5000.0)
            .distance_resets(0.01);
        activities.push(generator.generate(format!("Glitched Run {}", i + 1), &mut rng));
    }

    let ids = Seeder::new(db).seed_activities(&activities).await?;

    tracing::info!("Seed completed!");
    tracing::info!("  Activities: {}", ids.len());
    if let (Some(first), Some(last)) = (ids.first(), ids.last()) {
        tracing::info!("  IDs: {first}..={last}");
    }

    Ok(())
}
