//! Database integration for seeding test data.
//!
//! The [`Seeder`] inserts generated activities and their streams, logging
//! progress for large batches.

mod seeder;

pub use seeder::{SeedError, Seeder};
