use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};
use chrono::Local;

use smartgrocer_core::DomainError;
use smartgrocer_inventory::{InventoryStats, InventoryStore, LOW_STOCK_THRESHOLD};

use crate::app::dto;
use crate::app::errors::ApiError;

pub async fn search_by_name(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(query): Path<String>,
) -> impl IntoResponse {
    Json(store.search_by_name(&query))
}

pub async fn search_by_category(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(category): Path<String>,
) -> impl IntoResponse {
    Json(store.search_by_category(&category))
}

pub async fn low_stock(Extension(store): Extension<Arc<InventoryStore>>) -> impl IntoResponse {
    Json(store.low_stock(LOW_STOCK_THRESHOLD))
}

pub async fn expiring(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(days): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let days: u32 = days.trim().parse().map_err(|_| {
        DomainError::invalid_argument(format!("days must be a non-negative whole number, got '{days}'"))
    })?;

    let today = Local::now().date_naive();
    let report = store.expiring_within(days, today);

    Ok(Json(dto::ExpiryResponse { days, report }).into_response())
}

pub async fn categories(Extension(store): Extension<Arc<InventoryStore>>) -> impl IntoResponse {
    Json(store.categories())
}

pub async fn stats(
    Extension(store): Extension<Arc<InventoryStore>>,
) -> Result<Json<InventoryStats>, ApiError> {
    Ok(Json(store.stats()?))
}
