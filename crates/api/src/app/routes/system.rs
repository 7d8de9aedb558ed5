use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};
use chrono::Utc;

use smartgrocer_inventory::InventoryStore;

pub async fn health(Extension(store): Extension<Arc<InventoryStore>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
        "items_count": store.len(),
    }))
}
