use std::{env, sync::Arc};

use catalog::{
    config::MongoSettings,
    database::{MongoStore, connect},
    run_server,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let settings = MongoSettings::from_env()?.with_app_name("catalog-api");

    tracing::info!(
        "Connecting to database {} (collection {})",
        settings.database,
        settings.collection
    );

    let db = connect(&settings).await?;
    let store = MongoStore::from_settings(db, &settings);

    let port = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .unwrap_or(8080);

    run_server(Arc::new(store), port).await
}
