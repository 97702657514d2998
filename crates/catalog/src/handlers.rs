use axum::{
    Extension, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::error;

use crate::{SharedStore, models::Item};

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
    pub count: usize,
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// List every item in the collection.
pub async fn list_items(Extension(store): Extension<SharedStore>) -> Response {
    match store.list().await {
        Ok(items) => {
            let count = items.len();
            Json(ItemsResponse { items, count }).into_response()
        }
        Err(e) => {
            error!("Failed to fetch items: {e}");
            let body = Json(json!({
                "error": "Failed to fetch items",
                "details": e.to_string(),
            }));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}
