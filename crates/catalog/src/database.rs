use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Document, doc},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions},
};
use tracing::{debug, info};

use crate::{
    config::MongoSettings,
    errors::AppError,
    models::{FieldNaming, Item},
};

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Storage operations needed by the seeder and the items API.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Creates the collection and the unique `name` index if missing.
    async fn ensure_schema(&self) -> Result<(), AppError>;

    async fn count(&self) -> Result<u64, AppError>;

    /// Inserts in order, stopping at the first failure. Returns the number inserted.
    async fn insert_many(&self, items: &[Item]) -> Result<usize, AppError>;

    async fn list(&self) -> Result<Vec<Item>, AppError>;
}

#[async_trait]
impl<T: ItemStore + ?Sized> ItemStore for Arc<T> {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        (**self).ensure_schema().await
    }

    async fn count(&self) -> Result<u64, AppError> {
        (**self).count().await
    }

    async fn insert_many(&self, items: &[Item]) -> Result<usize, AppError> {
        (**self).insert_many(items).await
    }

    async fn list(&self) -> Result<Vec<Item>, AppError> {
        (**self).list().await
    }
}

/// Connects to the server and pings the target database.
pub async fn connect(settings: &MongoSettings) -> Result<Database, AppError> {
    let mut options = ClientOptions::parse(&settings.uri).await?;
    options.app_name = Some(settings.app_name.clone());
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

    let client = Client::with_options(options)?;
    let db = client.database(&settings.database);
    db.run_command(doc! { "ping": 1 }).await?;

    info!("Connected to MongoDB database {}", settings.database);
    Ok(db)
}

/// [`ItemStore`] backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
    items: Collection<Document>,
    naming: FieldNaming,
}

impl MongoStore {
    pub fn new(db: Database, collection: &str, naming: FieldNaming) -> Self {
        let items = db.collection::<Document>(collection);
        Self { db, items, naming }
    }

    pub fn from_settings(db: Database, settings: &MongoSettings) -> Self {
        Self::new(db, &settings.collection, settings.naming)
    }

    pub fn collection_name(&self) -> &str {
        self.items.name()
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }

    pub fn naming(&self) -> FieldNaming {
        self.naming
    }
}

#[async_trait]
impl ItemStore for MongoStore {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        // Building the index creates the collection if it is missing.
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let created = self
            .items
            .create_index(index)
            .await
            .map_err(classify_write_error)?;
        debug!("Unique index {} on {}", created.index_name, self.items.name());

        Ok(())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.items.count_documents(doc! {}).await?)
    }

    async fn insert_many(&self, items: &[Item]) -> Result<usize, AppError> {
        if items.is_empty() {
            return Ok(0);
        }

        let docs: Vec<Document> = items
            .iter()
            .map(|item| item.to_document(self.naming))
            .collect();
        let result = self
            .items
            .insert_many(docs)
            .await
            .map_err(classify_write_error)?;

        Ok(result.inserted_ids.len())
    }

    async fn list(&self) -> Result<Vec<Item>, AppError> {
        let docs: Vec<Document> = self.items.find(doc! {}).await?.try_collect().await?;
        docs.iter().map(Item::from_document).collect()
    }
}

/// Maps unique index violations to [`AppError::DuplicateName`].
fn classify_write_error(err: mongodb::error::Error) -> AppError {
    let message = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY => {
            Some(e.message.clone())
        }
        ErrorKind::InsertMany(e) => e
            .write_errors
            .as_ref()
            .and_then(|errors| errors.iter().find(|w| w.code == DUPLICATE_KEY))
            .map(|w| w.message.clone()),
        ErrorKind::Command(e) if e.code == DUPLICATE_KEY => Some(e.message.clone()),
        _ => None,
    };

    match message {
        Some(message) => AppError::DuplicateName(duplicate_key_value(&message)),
        None => AppError::Database(err),
    }
}

/// Pulls the offending value out of an `E11000 ... dup key: { name: "X" }` message.
fn duplicate_key_value(message: &str) -> String {
    message
        .split_once("dup key:")
        .and_then(|(_, rest)| {
            let start = rest.find('"')? + 1;
            let len = rest[start..].find('"')?;
            Some(rest[start..start + len].to_string())
        })
        .unwrap_or_else(|| message.to_string())
}
