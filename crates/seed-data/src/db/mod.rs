//! Database integration for seeding the items collection.
//!
//! The [`Seeder`] works against any [`catalog::database::ItemStore`], so the
//! same check-then-insert pass runs on MongoDB and on the in-memory store.

mod seeder;

pub use seeder::{SeedError, SeedOutcome, Seeder};
