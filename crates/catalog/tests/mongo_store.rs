//! Integration tests for the MongoDB-backed item store.
//!
//! To run these tests, you need a reachable MongoDB server and the
//! MONGODB_URI environment variable set to a user allowed to create databases.
//!
//! Run with: `MONGODB_URI=mongodb://localhost:27017 cargo nextest run -p catalog mongo_store`
//!
//! Each test works in its own throwaway database, dropped at the end.

use std::env;

use catalog::{
    config::MongoSettings,
    database::{ItemStore, MongoStore, connect},
    errors::AppError,
    models::{FieldNaming, Item},
};
use mongodb::{Database, bson::doc};
use time::OffsetDateTime;

/// Connect to a fresh database, skipping tests if MONGODB_URI is not set.
async fn get_test_db(test_id: &str) -> Option<Database> {
    let uri = match env::var("MONGODB_URI") {
        Ok(uri) => uri,
        Err(_) => {
            eprintln!("Skipping test: MONGODB_URI not set");
            return None;
        }
    };

    let settings = MongoSettings {
        uri,
        database: format!(
            "catalog_{test_id}_{}",
            OffsetDateTime::now_utc().unix_timestamp_nanos()
        ),
        ..MongoSettings::default()
    };

    match connect(&settings).await {
        Ok(db) => Some(db),
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            None
        }
    }
}

fn item(name: &str, price: f64) -> Item {
    Item::new(name, price, OffsetDateTime::now_utc())
}

#[tokio::test]
async fn test_ensure_schema_is_idempotent() {
    let Some(db) = get_test_db("schema").await else {
        return;
    };
    let store = MongoStore::new(db.clone(), "items", FieldNaming::Snake);

    store.ensure_schema().await.expect("first ensure_schema");
    store.ensure_schema().await.expect("second ensure_schema");

    let names = db.list_collection_names().await.unwrap();
    assert!(names.contains(&"items".to_string()));

    let indexes = db
        .collection::<mongodb::bson::Document>("items")
        .list_index_names()
        .await
        .unwrap();
    assert!(indexes.contains(&"name_1".to_string()));

    db.drop().await.ok();
}

#[tokio::test]
async fn test_concurrent_ensure_schema_on_missing_collection() {
    let Some(db) = get_test_db("concurrent").await else {
        return;
    };
    let first = MongoStore::new(db.clone(), "items", FieldNaming::Snake);
    let second = first.clone();

    let (a, b) = tokio::join!(first.ensure_schema(), second.ensure_schema());
    a.expect("first ensure_schema");
    b.expect("second ensure_schema");

    let names = db.list_collection_names().await.unwrap();
    assert!(names.contains(&"items".to_string()));

    db.drop().await.ok();
}

#[tokio::test]
async fn test_duplicate_name_fails() {
    let Some(db) = get_test_db("duplicate").await else {
        return;
    };
    let store = MongoStore::new(db.clone(), "items", FieldNaming::Camel);
    store.ensure_schema().await.unwrap();

    let inserted = store.insert_many(&[item("Coffee", 3.25)]).await.unwrap();
    assert_eq!(inserted, 1);

    let err = store
        .insert_many(&[item("Coffee", 4.0)])
        .await
        .expect_err("duplicate name must be rejected");
    assert!(
        matches!(&err, AppError::DuplicateName(name) if name == "Coffee"),
        "unexpected error: {err}"
    );
    assert_eq!(store.count().await.unwrap(), 1);

    db.drop().await.ok();
}

#[tokio::test]
async fn test_field_naming_is_persisted() {
    let Some(db) = get_test_db("naming").await else {
        return;
    };
    let store = MongoStore::new(db.clone(), "items", FieldNaming::Camel);
    store.ensure_schema().await.unwrap();
    store.insert_many(&[item("Notebook", 12.5)]).await.unwrap();

    let raw = db
        .collection::<mongodb::bson::Document>("items")
        .find_one(doc! { "name": "Notebook" })
        .await
        .unwrap()
        .expect("document present");
    assert!(raw.contains_key("createdAt"));
    assert!(!raw.contains_key("created_at"));

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].price, 12.5);

    db.drop().await.ok();
}
