//! Default seed script - prepares the items collection and seeds it once
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! ```
//!
//! Configure with `MONGODB_URI`, `MONGODB_DB`, `SEED_DATASET`,
//! `SEED_FIELD_NAMING` and `SEED_FILE`.

use catalog::database::{MongoStore, connect};
use seed_data::{config::SeedConfig, db::Seeder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env()?;
    let records = config.load_records()?;

    tracing::info!(
        "Seeding {}.{} from {} ({} field names)",
        config.mongo.database,
        config.mongo.collection,
        config.source(),
        config.mongo.naming
    );

    let db = connect(&config.mongo).await?;
    let store = MongoStore::from_settings(db, &config.mongo);

    let seeder = Seeder::new(store, records)?;
    let outcome = seeder.run().await?;

    tracing::info!(
        "{} [{}.{}]",
        outcome,
        seeder.store().database_name(),
        seeder.store().collection_name()
    );

    Ok(())
}
