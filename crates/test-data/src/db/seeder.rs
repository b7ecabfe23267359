//! Database seeding utilities.

use thiserror::Error;
use tracing::info;

use efforts::{database::Database, errors::AppError};

use crate::generators::GeneratedStreams;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] AppError),
    #[error("Streams for {0:?} have fewer than two samples")]
    TooFewSamples(String),
}

/// Database seeder for inserting generated activities.
pub struct Seeder {
    db: Database,
    batch_size: usize,
}

impl Seeder {
    /// Creates a new seeder on top of the given database.
    pub fn new(db: Database) -> Self {
        Self { db, batch_size: 50 }
    }

    /// Sets how often progress is logged.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Seeds activities with their streams, returning the new activity IDs.
    pub async fn seed_activities(
        &self,
        activities: &[GeneratedStreams],
    ) -> Result<Vec<i64>, SeedError> {
        info!("Seeding {} activities...", activities.len());

        let mut ids = Vec::with_capacity(activities.len());
        for (i, activity) in activities.iter().enumerate() {
            if activity.time.len() < 2 {
                return Err(SeedError::TooFewSamples(activity.name.clone()));
            }

            let id = self
                .db
                .create_activity_with_streams(&activity.name, &activity.to_raw())
                .await?;
            ids.push(id);

            if (i + 1) % self.batch_size == 0 {
                info!("  Seeded {}/{} activities", i + 1, activities.len());
            }
        }

        info!("Seeded {} activities", activities.len());
        Ok(ids)
    }
}
