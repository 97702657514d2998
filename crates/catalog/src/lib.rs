pub mod config;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod memory;
pub mod models;

use std::sync::Arc;

use axum::{Extension, Router, http::Method, routing::get};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    database::ItemStore,
    handlers::{health_check, list_items},
};

/// Store handle shared across request handlers.
pub type SharedStore = Arc<dyn ItemStore>;

pub fn create_router(store: SharedStore) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/healthz", get(health_check))
        .route("/items", get(list_items))
        .layer(Extension(store))
        .layer(cors)
}

pub async fn run_server(store: SharedStore, port: u16) -> anyhow::Result<()> {
    let app = create_router(store);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    tracing::info!("API listening on http://0.0.0.0:{}", port);
    tracing::info!("Health check: http://localhost:{}/healthz", port);
    tracing::info!("Items API: http://localhost:{}/items", port);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use time::macros::datetime;
    use tower::ServiceExt;

    use crate::{errors::AppError, memory::MemoryStore, models::Item};

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_healthz() {
        let app = create_router(Arc::new(MemoryStore::new()));
        let (status, body) = get_json(app, "/healthz").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_items() {
        let store = MemoryStore::with_items(vec![
            Item::new("Notebook", 12.5, datetime!(2024-05-01 10:00 UTC)),
            Item::new("Coffee", 3.25, datetime!(2024-05-01 10:00 UTC))
                .with_updated_at(datetime!(2024-05-02 08:30 UTC)),
        ]);
        let app = create_router(Arc::new(store));
        let (status, body) = get_json(app, "/items").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "Notebook");
        assert_eq!(items[0]["price"], 12.5);
        assert!(items[0].get("updated_at").is_none());
        assert_eq!(items[1]["updated_at"], "2024-05-02T08:30:00Z");
    }

    #[tokio::test]
    async fn test_list_items_empty() {
        let app = create_router(Arc::new(MemoryStore::new()));
        let (status, body) = get_json(app, "/items").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "items": [], "count": 0 }));
    }

    struct BrokenStore;

    #[async_trait::async_trait]
    impl ItemStore for BrokenStore {
        async fn ensure_schema(&self) -> Result<(), AppError> {
            Ok(())
        }

        async fn count(&self) -> Result<u64, AppError> {
            Ok(0)
        }

        async fn insert_many(&self, _items: &[Item]) -> Result<usize, AppError> {
            Ok(0)
        }

        async fn list(&self) -> Result<Vec<Item>, AppError> {
            Err(AppError::InvalidItem("item \"Ghost\" has no numeric `price`".into()))
        }
    }

    #[tokio::test]
    async fn test_list_items_failure_reports_details() {
        let app = create_router(Arc::new(BrokenStore));
        let (status, body) = get_json(app, "/items").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch items");
        assert!(body["details"].as_str().unwrap().contains("Ghost"));
    }
}
