use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use smartgrocer_billing::BillRequest;
use smartgrocer_inventory::InventoryStore;

use crate::app::dto;
use crate::app::errors::ApiError;

pub async fn generate_bill(
    Extension(store): Extension<Arc<InventoryStore>>,
    body: Result<Json<dto::GenerateBillRequest>, JsonRejection>,
) -> Result<axum::response::Response, ApiError> {
    let Json(body) = body?;
    let request = BillRequest::from(body);

    let bill = smartgrocer_billing::generate_bill(&store, &request, Utc::now())?;

    Ok(Json(dto::BillResponse {
        success: true,
        bill,
    })
    .into_response())
}
