//! HTTP-level tests for product registration, menu listing, and ordering.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{MailOutcome, TestApp};
use kiosk_core::{Money, NewProduct, ProductSellingStatus, ProductType};

async fn register(app: &TestApp, name: &str, status: &str, price: i64) -> Value {
    let (code, body) = app
        .post_json(
            "/api/v1/products/new",
            json!({"type": "HANDMADE", "sellingStatus": status, "name": name, "price": price}),
        )
        .await;
    assert_eq!(code, StatusCode::OK, "unexpected body {body}");
    body["data"].clone()
}

#[tokio::test]
async fn create_product_wraps_response() {
    let app = TestApp::new(MailOutcome::Accept).await;

    let (status, body) = app
        .post_json(
            "/api/v1/products/new",
            json!({"type": "HANDMADE", "sellingStatus": "SELLING", "name": "Americano", "price": 4000}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "OK");
    assert_eq!(body["data"]["productNumber"], "001");
    assert_eq!(body["data"]["type"], "HANDMADE");
    assert_eq!(body["data"]["sellingStatus"], "SELLING");
    assert_eq!(body["data"]["name"], "Americano");
    assert_eq!(body["data"]["price"], 4000);
}

#[tokio::test]
async fn product_numbers_are_sequential() {
    let app = TestApp::new(MailOutcome::Accept).await;

    let first = register(&app, "Americano", "SELLING", 4000).await;
    let second = register(&app, "Cafe latte", "HOLD", 4500).await;

    assert_eq!(first["productNumber"], "001");
    assert_eq!(second["productNumber"], "002");
}

#[tokio::test]
async fn create_product_reports_every_invalid_field() {
    let app = TestApp::new(MailOutcome::Accept).await;

    let (status, body) = app.post_json("/api/v1/products/new", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Product type is required.");
    assert_eq!(
        body["fieldErrors"],
        json!([
            {"field": "type", "message": "Product type is required."},
            {"field": "sellingStatus", "message": "Product selling status is required."},
            {"field": "name", "message": "Product name is required."},
            {"field": "price", "message": "Product price is required."}
        ])
    );
}

#[tokio::test]
async fn create_product_rejects_blank_name_only() {
    let app = TestApp::new(MailOutcome::Accept).await;

    let (status, body) = app
        .post_json(
            "/api/v1/products/new",
            json!({"type": "BOTTLE", "sellingStatus": "SELLING", "name": "   ", "price": 2000}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fieldErrors"],
        json!([{"field": "name", "message": "Product name is required."}])
    );
}

#[tokio::test]
async fn null_price_is_a_price_field_error() {
    let app = TestApp::new(MailOutcome::Accept).await;

    let (status, body) = app
        .post_json(
            "/api/v1/products/new",
            json!({"type": "HANDMADE", "sellingStatus": "SELLING", "name": "Americano", "price": null}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fieldErrors"],
        json!([{"field": "price", "message": "Product price is required."}])
    );
}

#[tokio::test]
async fn price_above_max_is_a_price_field_error() {
    let app = TestApp::new(MailOutcome::Accept).await;

    for price in ["9223372036854775807", "100000000000000000000", "100000001"] {
        let raw = format!(
            r#"{{"type":"HANDMADE","sellingStatus":"SELLING","name":"Americano","price":{price}}}"#
        );
        let (status, bytes) = app
            .request(Method::POST, "/api/v1/products/new", Some(raw))
            .await;
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST, "price {price}");
        assert_eq!(
            body["fieldErrors"],
            json!([{"field": "price", "message": "price must be at most 100000000."}]),
            "price {price}"
        );
    }
    assert_eq!(app.db.products().count().await.unwrap(), 0);
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = TestApp::new(MailOutcome::Accept).await;

    let (status, bytes) = app
        .request(
            Method::POST,
            "/api/v1/products/new",
            Some("{\"type\": ".to_string()),
        )
        .await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_enum_value_is_a_validation_error() {
    let app = TestApp::new(MailOutcome::Accept).await;

    let (status, body) = app
        .post_json(
            "/api/v1/products/new",
            json!({"type": "SMOOTHIE", "sellingStatus": "SELLING", "name": "Mango", "price": 5000}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn selling_list_shows_selling_and_hold() {
    let app = TestApp::new(MailOutcome::Accept).await;
    register(&app, "Americano", "SELLING", 4000).await;
    register(&app, "Cappuccino", "HOLD", 5000).await;
    register(&app, "Patbingsu", "STOP_SELLING", 9000).await;

    let (status, body) = app.get_json("/api/v1/products/selling").await;

    assert_eq!(status, StatusCode::OK);
    let mut statuses: Vec<(String, String)> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            (
                p["name"].as_str().unwrap().to_string(),
                p["sellingStatus"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    statuses.sort();

    assert_eq!(
        statuses,
        vec![
            ("Americano".to_string(), "SELLING".to_string()),
            ("Cappuccino".to_string(), "HOLD".to_string()),
        ]
    );
}

#[tokio::test]
async fn create_order_sums_line_prices() {
    let app = TestApp::new(MailOutcome::Accept).await;
    register(&app, "Americano", "SELLING", 4000).await;
    register(&app, "Croissant", "SELLING", 3500).await;

    let (status, body) = app
        .post_json(
            "/api/v1/orders/new",
            json!({"productNumbers": ["001", "002", "001"]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "unexpected body {body}");
    let order = &body["data"];
    assert_eq!(order["totalPrice"], 11500);
    assert!(order["registeredDateTime"].is_string());

    let numbers: Vec<&str> = order["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["productNumber"].as_str().unwrap())
        .collect();
    assert_eq!(numbers, vec!["001", "002", "001"]);
}

#[tokio::test]
async fn create_order_with_unknown_product_is_not_found() {
    let app = TestApp::new(MailOutcome::Accept).await;
    register(&app, "Americano", "SELLING", 4000).await;

    let (status, body) = app
        .post_json("/api/v1/orders/new", json!({"productNumbers": ["001", "999"]}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Product not found: 999");
}

#[tokio::test]
async fn order_total_past_money_range_is_rejected() {
    let app = TestApp::new(MailOutcome::Accept).await;
    // stored directly: registration caps the price
    app.db
        .products()
        .insert(&NewProduct {
            product_number: "001".to_string(),
            product_type: ProductType::Bakery,
            selling_status: ProductSellingStatus::Selling,
            name: "Gold cake".to_string(),
            price: Money::from_won(i64::MAX),
        })
        .await
        .unwrap();

    let (status, body) = app
        .post_json("/api/v1/orders/new", json!({"productNumbers": ["001", "001"]}))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "BUSINESS_LOGIC");
    assert_eq!(body["message"], "Order total exceeds the largest supported amount");
    assert!(app.db.orders().find_by_id(1).await.unwrap().is_none());
}

#[tokio::test]
async fn create_order_requires_product_numbers() {
    let app = TestApp::new(MailOutcome::Accept).await;

    let (status, body) = app
        .post_json("/api/v1/orders/new", json!({"productNumbers": []}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fieldErrors"],
        json!([{"field": "productNumbers", "message": "Product numbers are required."}])
    );
}

#[tokio::test]
async fn health_reports_database_state() {
    let app = TestApp::new(MailOutcome::Accept).await;

    let (status, body) = app.request(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");

    app.db.close().await;
    let (status, _) = app.request(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
