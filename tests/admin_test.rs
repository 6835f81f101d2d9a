use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use storefront::auth::Credentials;
use storefront::context::{AppContext, AppState};
use storefront::route::create_app;

fn setup_test_app() -> axum::Router {
    create_app(AppState::new(AppContext::in_memory(Credentials::default())))
}

/// Helper function to parse response body as JSON
async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, response_json(response.into_body()).await)
}

async fn logged_in_app() -> axum::Router {
    let app = setup_test_app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "username": "admin", "password": "najih2025" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    app
}

#[tokio::test]
async fn test_admin_requires_login() {
    let app = setup_test_app();

    let (status, body) = send(&app, "GET", "/api/admin/orders", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "username": "admin", "password": "guess" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_credentials");

    let (status, _) = send(&app, "GET", "/api/admin/orders", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_closes_the_gate() {
    let app = logged_in_app().await;

    let (_, session) = send(&app, "GET", "/api/auth/session", None).await;
    assert_eq!(session["authenticated"], true);

    let (status, _) = send(&app, "GET", "/api/admin/messages", None).await;
    assert_eq!(status, StatusCode::OK);

    send(&app, "POST", "/api/auth/logout", None).await;
    let (status, _) = send(&app, "GET", "/api/admin/messages", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_product_lifecycle() {
    let app = logged_in_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/admin/products",
        Some(json!({
            "name": "Knitted Booties",
            "price": 99,
            "image": "https://images.example.com/booties.jpg",
            "category": "baby",
            "isNew": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 13);
    assert_eq!(created["rating"], 5);

    let (status, edited) = send(
        &app,
        "PATCH",
        "/api/admin/products/13",
        Some(json!({ "price": 89, "isSale": true, "originalPrice": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["id"], 13);
    assert_eq!(edited["name"], "Knitted Booties");
    assert_eq!(edited["price"], 89.0);

    // Storefront sees the same collection
    let (_, sale) = send(&app, "GET", "/api/products/sale", None).await;
    assert!(sale.as_array().unwrap().iter().any(|p| p["id"] == 13));

    let (status, _) = send(&app, "DELETE", "/api/admin/products/13", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/api/products/13", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_product_validation() {
    let app = logged_in_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/products",
        Some(json!({
            "name": "Hat",
            "price": 0,
            "image": "https://images.example.com/hat.jpg",
            "category": "accessories"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "price: Price must be positive");
}

#[tokio::test]
async fn test_admin_takes_product_off_sale() {
    let app = logged_in_app().await;

    let (status, edited) = send(
        &app,
        "PATCH",
        "/api/admin/products/1",
        Some(json!({ "originalPrice": null, "isSale": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(edited.get("originalPrice").is_none());
    assert!(edited.get("isSale").is_none());
    assert_eq!(edited["price"], 249.0);

    let (_, sale) = send(&app, "GET", "/api/products/sale", None).await;
    assert!(!sale.as_array().unwrap().iter().any(|p| p["id"] == 1));
}

#[tokio::test]
async fn test_admin_rejects_original_price_below_price() {
    let app = logged_in_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/products",
        Some(json!({
            "name": "Knitted Booties",
            "price": 299,
            "originalPrice": 99,
            "image": "https://images.example.com/booties.jpg",
            "category": "baby"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "originalPrice: Original price must be higher than the price");

    // Product 1 is 249 down from 299; raising the price alone breaks the pair
    let (status, _) = send(
        &app,
        "PATCH",
        "/api/admin/products/1",
        Some(json!({ "price": 320 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, product) = send(&app, "GET", "/api/products/1", None).await;
    assert_eq!(product["price"], 249.0);
}

#[tokio::test]
async fn test_admin_order_management() {
    let app = logged_in_app().await;

    let (_, orders) = send(&app, "GET", "/api/admin/orders", None).await;
    let ids: Vec<u64> = orders
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/admin/orders/2/status",
        Some(json!({ "status": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order #2 status updated to pending!");
    assert_eq!(body["order"]["status"], "pending");

    let (_, body) = send(&app, "POST", "/api/admin/orders/1/notify", None).await;
    assert_eq!(body["message"], "Notification sent to Ahmed Benali at +212 622 345678!");

    let (status, _) = send(&app, "DELETE", "/api/admin/orders/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/api/admin/orders/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/admin/orders/77/status",
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_viewing_a_message_marks_it_read() {
    let app = logged_in_app().await;

    let (_, inbox) = send(&app, "GET", "/api/admin/messages", None).await;
    assert_eq!(inbox["unreadCount"], 1);

    let (status, message) = send(&app, "GET", "/api/admin/messages/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["read"], true);

    let (_, inbox) = send(&app, "GET", "/api/admin/messages", None).await;
    assert_eq!(inbox["unreadCount"], 0);

    send(&app, "DELETE", "/api/admin/messages/2", None).await;
    let (_, inbox) = send(&app, "GET", "/api/admin/messages", None).await;
    assert_eq!(inbox["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_page_content() {
    let app = logged_in_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/admin/testimonials",
        Some(json!({
            "name": "Salma R.",
            "location": "Fes",
            "image": "https://images.example.com/salma.jpg",
            "rating": 5,
            "text": "Beautiful embroidery."
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 4);

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/admin/testimonials/4",
        Some(json!({ "rating": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let tiles = json!([
        { "id": "1", "image": "https://images.example.com/g.jpg", "title": "Girls", "link": "/girls" },
        { "id": "2", "image": "https://images.example.com/b.jpg", "title": "Boys", "link": "/boys" }
    ]);
    let (status, _) = send(&app, "PUT", "/api/admin/categories", Some(tiles.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (_, public_tiles) = send(&app, "GET", "/api/categories", None).await;
    assert_eq!(public_tiles, tiles);

    let links = json!({
        "facebook": "https://facebook.com/shop",
        "instagram": "https://instagram.com/shop",
        "twitter": ""
    });
    send(&app, "PUT", "/api/admin/social", Some(links.clone())).await;
    let (_, public_links) = send(&app, "GET", "/api/social", None).await;
    assert_eq!(public_links, links);
}
