//! Seed data for the items catalog.
//!
//! This crate makes a fresh environment usable: it ensures the `items`
//! collection and its unique `name` index exist, then inserts a fixed list of
//! example items when (and only when) the collection is empty.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let config = SeedConfig::from_env()?;
//! let db = connect(&config.mongo).await?;
//! let store = MongoStore::from_settings(db, &config.mongo);
//!
//! let seeder = Seeder::new(store, config.load_records()?)?;
//! let outcome = seeder.run().await?;
//! println!("{outcome}");
//! ```

pub mod config;
pub mod datasets;
pub mod db;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{Dataset, SeedConfig};
    pub use crate::datasets::SeedRecord;
    pub use crate::db::{SeedError, SeedOutcome, Seeder};
    pub use catalog::database::{ItemStore, MongoStore, connect};
    pub use catalog::models::{FieldNaming, Item};
}
