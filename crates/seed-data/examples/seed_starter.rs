//! Example: Seed the three-item starter set with camelCase timestamps.
//!
//! This mirrors a bare `docker-entrypoint-initdb.d` style setup:
//! - database taken from MONGO_INITDB_DATABASE, falling back to `demo`
//! - Notebook, Coffee and Keyboard, each with a `createdAt` field
//! - nothing inserted if the collection already has documents
//!
//! Run with:
//! ```
//! cargo run --example seed_starter
//! ```

use seed_data::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = SeedConfig::from_env()?.with_dataset(Dataset::Starter);
    config.mongo.naming = FieldNaming::Camel;
    if std::env::var("MONGODB_DB").is_err() && std::env::var("MONGO_INITDB_DATABASE").is_err() {
        config.mongo.database = "demo".to_string();
    }

    // Connect to database
    let db = connect(&config.mongo).await?;
    let store = MongoStore::from_settings(db, &config.mongo);

    let seeder = Seeder::new(store, config.load_records()?)?;
    let outcome = seeder.run().await?;

    tracing::info!("{outcome}");
    for item in seeder.store().list().await? {
        tracing::info!("  {} - {:.2}", item.name, item.price);
    }

    Ok(())
}
