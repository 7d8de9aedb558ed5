use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use smartgrocer_core::ItemId;
use smartgrocer_inventory::InventoryStore;

use crate::app::dto;
use crate::app::errors::ApiError;

pub(crate) fn parse_id(raw: &str) -> Result<ItemId, ApiError> {
    Ok(raw.parse::<ItemId>()?)
}

pub async fn list_items(Extension(store): Extension<Arc<InventoryStore>>) -> impl IntoResponse {
    Json(store.list())
}

pub async fn get_item(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let item = store.get(parse_id(&id)?)?;
    Ok(Json(item).into_response())
}

pub async fn create_item(
    Extension(store): Extension<Arc<InventoryStore>>,
    body: Result<Json<dto::CreateItemRequest>, JsonRejection>,
) -> Result<axum::response::Response, ApiError> {
    let Json(body) = body?;
    let item = store.create(body.into())?;

    Ok((
        StatusCode::CREATED,
        Json(dto::ItemMutationResponse::new("Item added successfully", item)),
    )
        .into_response())
}

pub async fn update_item(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateItemRequest>, JsonRejection>,
) -> Result<axum::response::Response, ApiError> {
    let id = parse_id(&id)?;
    // An unknown id is reported before any body problem.
    store.get(id)?;
    let Json(body) = body?;
    let item = store.update(id, body.into())?;

    Ok(Json(dto::ItemMutationResponse::new("Item updated successfully", item)).into_response())
}

pub async fn delete_item(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    store.delete(parse_id(&id)?)?;

    Ok(Json(dto::DeletedResponse {
        success: true,
        message: "Item deleted successfully",
    })
    .into_response())
}
