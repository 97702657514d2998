//! Database seeding utilities.

use std::fmt;

use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use catalog::{database::ItemStore, errors::AppError, models::Item};

use crate::datasets::{self, SeedRecord};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Catalog(#[from] AppError),
    #[error("Invalid seed record {name:?}: {reason}")]
    InvalidRecord { name: String, reason: String },
    #[error("Seed dataset is empty")]
    EmptyDataset,
    #[error("Unknown dataset {0:?}, expected `catalog` or `starter`")]
    UnknownDataset(String),
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse seed file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a seeding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Inserted { count: usize },
    Skipped { existing: u64 },
}

impl SeedOutcome {
    pub fn inserted(&self) -> usize {
        match self {
            SeedOutcome::Inserted { count } => *count,
            SeedOutcome::Skipped { .. } => 0,
        }
    }
}

impl fmt::Display for SeedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedOutcome::Inserted { count } => write!(f, "Seeded {count} initial items"),
            SeedOutcome::Skipped { existing } => {
                write!(f, "Items already present ({existing}), skipping seed")
            }
        }
    }
}

/// Idempotent seeder for the items collection.
///
/// The store decides where the items live; the seeder only ever inserts, and
/// only into an empty collection.
pub struct Seeder<S> {
    store: S,
    records: Vec<SeedRecord>,
}

impl<S: ItemStore> Seeder<S> {
    /// Creates a seeder, rejecting invalid seed data up front.
    pub fn new(store: S, records: Vec<SeedRecord>) -> Result<Self, SeedError> {
        datasets::validate(&records)?;
        Ok(Self { store, records })
    }

    /// Ensures the collection and its unique `name` index exist.
    pub async fn ensure_schema(&self) -> Result<(), SeedError> {
        self.store.ensure_schema().await?;
        Ok(())
    }

    /// Inserts the seed records if the collection is empty, timestamped from now.
    pub async fn seed_if_empty(&self) -> Result<SeedOutcome, SeedError> {
        self.seed_if_empty_at(OffsetDateTime::now_utc()).await
    }

    /// Same as [`Seeder::seed_if_empty`] with an explicit reference time.
    pub async fn seed_if_empty_at(&self, now: OffsetDateTime) -> Result<SeedOutcome, SeedError> {
        let existing = self.store.count().await?;
        if existing > 0 {
            info!("Items already present ({existing}), skipping seed");
            return Ok(SeedOutcome::Skipped { existing });
        }

        info!("Seeding {} items...", self.records.len());

        let items: Vec<Item> = self.records.iter().map(|r| r.to_item(now)).collect();
        let count = self.store.insert_many(&items).await?;

        info!("Seeded {} items", count);
        Ok(SeedOutcome::Inserted { count })
    }

    /// Runs the full procedure: schema first, then the conditional insert.
    pub async fn run(&self) -> Result<SeedOutcome, SeedError> {
        self.ensure_schema().await?;
        self.seed_if_empty().await
    }

    pub fn records(&self) -> &[SeedRecord] {
        &self.records
    }

    /// Returns a reference to the store for advanced usage.
    pub fn store(&self) -> &S {
        &self.store
    }
}
