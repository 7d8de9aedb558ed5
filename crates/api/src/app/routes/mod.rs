use axum::{
    routing::{get, post},
    Router,
};

pub mod billing;
pub mod items;
pub mod reports;
pub mod system;

/// Router for every `/api` endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/:id",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/search/name/:query", get(reports::search_by_name))
        .route("/search/category/:category", get(reports::search_by_category))
        .route("/low-stock", get(reports::low_stock))
        .route("/expiry/:days", get(reports::expiring))
        .route("/categories", get(reports::categories))
        .route("/stats", get(reports::stats))
        .route("/bill", post(billing::generate_bill))
        .route("/health", get(system::health))
}
