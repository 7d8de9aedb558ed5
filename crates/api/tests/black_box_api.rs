use std::sync::Arc;

use chrono::{Days, Local};
use reqwest::StatusCode;
use serde_json::{json, Value};

use smartgrocer_inventory::{InventoryStore, NewItem};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(store: InventoryStore) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = smartgrocer_api::app::build_app(Arc::new(store));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn seeded() -> Self {
        Self::spawn(InventoryStore::with_sample_catalog()).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn get_json(client: &reqwest::Client, url: String) -> (StatusCode, Value) {
    let res = client.get(url).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn quantity_of(client: &reqwest::Client, srv: &TestServer, id: u64) -> i64 {
    let (status, item) = get_json(client, srv.url(&format!("/items/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    item["quantity"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_item_count() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, srv.url("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["items_count"], 20);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn list_and_get_items() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, srv.url("/items")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 20);
    assert_eq!(items[0]["id"], 1);

    let (status, item) = get_json(&client, srv.url("/items/3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["name"], "Basmati Rice (Dehra Dun)");
    assert_eq!(item["price"].as_f64(), Some(180.0));
    assert_eq!(item["perishable"], false);
    assert!(item["expiry"].is_null());

    let (status, body) = get_json(&client, srv.url("/items/404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Item not found");
    assert_eq!(body["success"], false);

    let (status, body) = get_json(&client, srv.url("/items/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn create_assigns_next_id() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/items"))
        .json(&json!({
            "name": "Apples",
            "category": "Fruits",
            "price": 50,
            "quantity": 10,
            "perishable": true,
            "expiry": "2025-12-01"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Item added successfully");
    assert_eq!(body["item"]["id"], 21);
    assert_eq!(body["item"]["expiry"], "2025-12-01");

    let (_, item) = get_json(&client, srv.url("/items/21")).await;
    assert_eq!(item["name"], "Apples");
}

#[tokio::test]
async fn create_validation_failures_are_400() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let cases = [
        (json!({ "category": "Fruits" }), "Name and category required"),
        (json!({ "name": "Figs", "category": "Fruits", "price": -1 }), "Price cannot be negative"),
        (json!({ "name": "Figs", "category": "Fruits", "quantity": -1 }), "Quantity cannot be negative"),
    ];

    for (payload, message) in cases {
        let res = client.post(srv.url("/items")).json(&payload).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], message);
    }

    let res = client
        .post(srv.url("/items"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "invalid_argument");

    let (_, body) = get_json(&client, srv.url("/health")).await;
    assert_eq!(body["items_count"], 20);
}

#[tokio::test]
async fn partial_update_touches_only_named_fields() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let (_, before) = get_json(&client, srv.url("/items/1")).await;

    let res = client
        .put(srv.url("/items/1"))
        .json(&json!({ "quantity": 40 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["item"]["quantity"], 40);

    let (_, after) = get_json(&client, srv.url("/items/1")).await;
    for field in ["id", "name", "category", "price", "perishable", "expiry"] {
        assert_eq!(after[field], before[field], "field {field} changed");
    }

    let res = client
        .put(srv.url("/items/1"))
        .json(&json!({ "price": -5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .put(srv.url("/items/999"))
        .json(&json!({ "price": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn null_expiry_on_update_clears_it() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let (_, before) = get_json(&client, srv.url("/items/1")).await;
    assert!(before["expiry"].is_string());

    let res = client
        .put(srv.url("/items/1"))
        .json(&json!({ "quantity": 12 }))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["item"]["expiry"], before["expiry"]);

    let res = client
        .put(srv.url("/items/1"))
        .json(&json!({ "expiry": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert!(body["item"]["expiry"].is_null());
    assert_eq!(body["item"]["quantity"], 12);
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client.delete(srv.url("/items/7")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Item deleted successfully");

    let (status, _) = get_json(&client, srv.url("/items/7")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let res = client.delete(srv.url("/items/7")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_endpoints() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, srv.url("/search/name/fresh")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![4, 8, 15]);

    let (_, body) = get_json(&client, srv.url("/search/category/canned%20goods")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], 5);

    let (status, body) = get_json(&client, srv.url("/search/name/durian")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn low_stock_lists_items_at_or_below_five() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, srv.url("/low-stock")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 5);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert!(items.iter().all(|i| i["quantity"].as_i64().unwrap() <= 5));
}

#[tokio::test]
async fn expiry_window_is_relative_to_today() {
    let today = Local::now().date_naive();
    let fmt = |d: chrono::NaiveDate| d.format("%Y-%m-%d").to_string();

    let store = InventoryStore::new();
    store
        .create(
            NewItem::new("Milk", "Dairy")
                .quantity(3)
                .perishable_until(fmt(today.checked_add_days(Days::new(2)).unwrap())),
        )
        .unwrap();
    store
        .create(
            NewItem::new("Cheese", "Dairy")
                .quantity(3)
                .perishable_until(fmt(today.checked_add_days(Days::new(10)).unwrap())),
        )
        .unwrap();
    let mut eggs = NewItem::new("Eggs", "Dairy").quantity(3);
    eggs.perishable = true;
    store.create(eggs).unwrap();

    let srv = TestServer::spawn(store).await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, srv.url("/expiry/3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days"], 3);
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["name"], "Milk");

    let (status, _) = get_json(&client, srv.url("/expiry/soon")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bill_computes_totals_and_decrements_stock() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/bill"))
        .json(&json!({ "cart": [{ "id": 3, "quantity": 5 }], "tax": 5, "discount": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);

    let bill = &body["bill"];
    assert_eq!(bill["subtotal"].as_f64(), Some(900.0));
    assert_eq!(bill["discount_amount"].as_f64(), Some(0.0));
    assert_eq!(bill["tax_amount"].as_f64(), Some(45.0));
    assert_eq!(bill["total"].as_f64(), Some(945.0));
    assert_eq!(bill["items"][0]["name"], "Basmati Rice (Dehra Dun)");
    assert_eq!(bill["items"][0]["quantity"], 5);
    assert!(bill["timestamp"].is_string());

    assert_eq!(quantity_of(&client, &srv, 3).await, 25);
    assert_eq!(quantity_of(&client, &srv, 1).await, 15);
}

#[tokio::test]
async fn bill_defaults_to_five_percent_tax() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/bill"))
        .json(&json!({ "cart": [{ "id": 2, "quantity": 2 }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["bill"]["tax_percent"].as_f64(), Some(5.0));
    assert_eq!(body["bill"]["discount_percent"].as_f64(), Some(0.0));
    assert_eq!(body["bill"]["total"].as_f64(), Some(115.5));
}

#[tokio::test]
async fn rejected_bill_leaves_all_stock_unchanged() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/bill"))
        .json(&json!({ "cart": [{ "id": 1, "quantity": 2 }, { "id": 10, "quantity": 3 }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Insufficient stock for Frooti Orange Juice");
    assert_eq!(body["code"], "insufficient_stock");

    assert_eq!(quantity_of(&client, &srv, 1).await, 15);
    assert_eq!(quantity_of(&client, &srv, 10).await, 2);

    let res = client
        .post(srv.url("/bill"))
        .json(&json!({ "cart": [{ "id": 1, "quantity": 1 }, { "id": 55, "quantity": 1 }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Item 55 not found");
    assert_eq!(quantity_of(&client, &srv, 1).await, 15);

    let res = client
        .post(srv.url("/bill"))
        .json(&json!({ "cart": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Cart is empty");
}

#[tokio::test]
async fn stats_and_categories() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let (status, stats) = get_json(&client, srv.url("/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_items"], 20);
    assert_eq!(stats["perishable_count"], 11);
    assert_eq!(stats["non_perishable_count"], 9);
    assert_eq!(stats["low_stock_count"], 5);

    let (status, categories) = get_json(&client, srv.url("/categories")).await;
    assert_eq!(status, StatusCode::OK);
    let categories: Vec<&str> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    assert_eq!(categories.len(), 12);
    assert_eq!(categories.first(), Some(&"Bakery"));
}

#[tokio::test]
async fn stats_overflow_is_a_json_error() {
    let store = InventoryStore::new();
    store
        .create(NewItem::new("Saffron", "Spices").price(rust_decimal::Decimal::MAX).quantity(3))
        .unwrap();
    let srv = TestServer::spawn(store).await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, srv.url("/stats")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "invalid_argument");

    let (status, body) = get_json(&client, srv.url("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items_count"], 1);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/items"))
        .header("origin", "http://example.test")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
