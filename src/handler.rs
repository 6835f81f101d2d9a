//! HTTP request handlers
//!
//! Thin adapters between the JSON API and the stores in `AppContext`:
//! - Catalog, testimonials and page content for the storefront
//! - Cart, checkout and order tracking for shoppers
//! - The contact form
//! - The admin console (products, orders, messages, testimonials, content)
//!
//! Every handler locks the context once and never holds the lock across
//! an `.await`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::checkout::{self, CheckoutForm};
use crate::context::AppState;
use crate::error::ApiError;
use crate::model::{
    CartItem, CategoryTile, ContactRequest, Id, Message, Order, OrderNumber, OrderStatus, Product,
    ProductDraft, ProductPatch, SocialLinks, StatusUpdate, Testimonial, TestimonialDraft,
    TestimonialPatch,
};
use crate::store::{messages, products, testimonials, CatalogQuery};

const ORDER_NOT_FOUND: &str = "Order not found. Please check your order number and try again.";
const PRODUCT_NOT_FOUND: &str = "Product not found";

// ---------------------------------------------------------------------------
// Storefront
// ---------------------------------------------------------------------------

/// Lists products, optionally filtered and sorted
///
/// `GET /api/products?category=girls&sort=price-low-high`
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<Vec<Product>> {
    Json(state.lock().products.catalog(query))
}

pub async fn list_new_arrivals(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.lock().products.new_arrivals())
}

pub async fn list_sale(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.lock().products.on_sale())
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<Product>, ApiError> {
    let ctx = state.lock();
    let product = ctx.products.get(id).cloned().ok_or(ApiError::NotFound(PRODUCT_NOT_FOUND))?;
    Ok(Json(product))
}

pub async fn list_testimonials(State(state): State<AppState>) -> Json<Vec<Testimonial>> {
    Json(state.lock().testimonials.all().to_vec())
}

pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryTile>> {
    Json(state.lock().categories.categories().to_vec())
}

pub async fn get_social(State(state): State<AppState>) -> Json<SocialLinks> {
    Json(state.lock().social.links().clone())
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: f64,
    pub item_count: u32,
}

impl CartView {
    fn of(cart: &crate::cart::Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub product_id: Id,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

#[derive(Deserialize, Debug)]
pub struct SetQuantity {
    pub quantity: i64,
}

pub async fn get_cart(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::of(&state.lock().cart))
}

/// Adds a product from any listing to the cart
///
/// `POST /api/cart` with `{ "productId": 1, "quantity": 2 }`
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(payload): Json<AddToCart>,
) -> Result<Json<CartView>, ApiError> {
    let mut ctx = state.lock();
    let product = ctx
        .products
        .get(payload.product_id)
        .cloned()
        .ok_or(ApiError::NotFound(PRODUCT_NOT_FOUND))?;
    ctx.cart.add_item(&product, payload.quantity);
    Ok(Json(CartView::of(&ctx.cart)))
}

pub async fn set_cart_quantity(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(payload): Json<SetQuantity>,
) -> Json<CartView> {
    let mut ctx = state.lock();
    ctx.cart.set_quantity(id, payload.quantity);
    Json(CartView::of(&ctx.cart))
}

pub async fn remove_cart_item(State(state): State<AppState>, Path(id): Path<Id>) -> Json<CartView> {
    let mut ctx = state.lock();
    ctx.cart.remove_item(id);
    Json(CartView::of(&ctx.cart))
}

pub async fn clear_cart(State(state): State<AppState>) -> Json<CartView> {
    let mut ctx = state.lock();
    ctx.cart.clear();
    Json(CartView::of(&ctx.cart))
}

// ---------------------------------------------------------------------------
// Checkout & tracking
// ---------------------------------------------------------------------------

/// Entry check of the checkout page
///
/// - **200 OK** - Cart contents to review
/// - **409 Conflict** - Cart is empty; the page sends the shopper back to `/cart`
pub async fn checkout_summary(State(state): State<AppState>) -> Result<Json<CartView>, ApiError> {
    let ctx = state.lock();
    checkout::ensure_cart_ready(&ctx.cart)?;
    Ok(Json(CartView::of(&ctx.cart)))
}

/// Places the order
///
/// # Response
///
/// - **201 Created** - Receipt with the order, its order number and the tracking redirect
/// - **400 Bad Request** - A shipping or payment field failed validation; nothing changed
/// - **409 Conflict** - The cart is empty
pub async fn place_order(
    State(state): State<AppState>,
    Json(form): Json<CheckoutForm>,
) -> Result<impl IntoResponse, ApiError> {
    let receipt = state.lock().checkout(&form)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TrackingView {
    pub order: Order,
    pub status_text: &'static str,
}

impl TrackingView {
    fn of(order: Order) -> Self {
        Self {
            status_text: order.status.description(),
            order,
        }
    }
}

fn parse_order_number(raw: &str) -> Result<OrderNumber, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::InvalidOrderNumber)
}

/// Looks up an order by its customer-facing number
///
/// `GET /api/orders/track/NK-10004`
pub async fn track_order(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<TrackingView>, ApiError> {
    let order_number = parse_order_number(&raw)?;
    let ctx = state.lock();
    let order = ctx
        .orders
        .get_order_by_number(order_number)
        .cloned()
        .ok_or(ApiError::NotFound(ORDER_NOT_FOUND))?;
    Ok(Json(TrackingView::of(order)))
}

/// Status buttons on the tracking page
pub async fn set_tracked_status(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<TrackingView>, ApiError> {
    let order_number = parse_order_number(&raw)?;
    let mut ctx = state.lock();
    let id = ctx
        .orders
        .get_order_by_number(order_number)
        .map(|o| o.id)
        .ok_or(ApiError::NotFound(ORDER_NOT_FOUND))?;
    let order = ctx
        .orders
        .update_order_status(id, update.status)
        .ok_or(ApiError::NotFound(ORDER_NOT_FOUND))?;
    Ok(Json(TrackingView::of(order)))
}

// ---------------------------------------------------------------------------
// Contact & session
// ---------------------------------------------------------------------------

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    messages::validate_contact(&request)?;
    let message = state.lock().submit_contact(request);
    info!(id = message.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(message)))
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.lock().auth.login(&payload.username, &payload.password) {
        return Err(ApiError::InvalidCredentials);
    }
    Ok(Json(json!({ "authenticated": true })))
}

pub async fn logout(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.lock().auth.logout();
    Json(json!({ "authenticated": false }))
}

pub async fn session(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "authenticated": state.lock().auth.is_authenticated() }))
}

// ---------------------------------------------------------------------------
// Admin: products
// ---------------------------------------------------------------------------

pub async fn admin_create_product(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> Result<impl IntoResponse, ApiError> {
    products::validate_draft(&draft)?;
    let product = state.lock().products.add(draft);
    info!(id = product.id, name = %product.name, "Product added");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn admin_update_product(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    let mut ctx = state.lock();
    let current = ctx.products.get(id).ok_or(ApiError::NotFound(PRODUCT_NOT_FOUND))?;
    products::validate_patch(current, &patch)?;
    let product = ctx
        .products
        .update(id, patch)
        .ok_or(ApiError::NotFound(PRODUCT_NOT_FOUND))?;
    Ok(Json(product))
}

pub async fn admin_replace_products(
    State(state): State<AppState>,
    Json(all): Json<Vec<Product>>,
) -> Json<Vec<Product>> {
    let mut ctx = state.lock();
    ctx.products.set_all(all);
    Json(ctx.products.all().to_vec())
}

pub async fn admin_delete_product(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .lock()
        .products
        .remove(id)
        .ok_or(ApiError::NotFound(PRODUCT_NOT_FOUND))?;
    Ok(Json(json!({
        "message": "Product deleted successfully!",
        "deleted_id": id
    })))
}

// ---------------------------------------------------------------------------
// Admin: orders
// ---------------------------------------------------------------------------

pub async fn admin_list_orders(State(state): State<AppState>) -> Json<Vec<Order>> {
    Json(state.lock().orders.all().to_vec())
}

pub async fn admin_get_order(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<Order>, ApiError> {
    let ctx = state.lock();
    let order = ctx.orders.get(id).cloned().ok_or(ApiError::NotFound(ORDER_NOT_FOUND))?;
    Ok(Json(order))
}

pub async fn admin_update_order_status(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let order = state
        .lock()
        .orders
        .update_order_status(id, update.status)
        .ok_or(ApiError::NotFound(ORDER_NOT_FOUND))?;
    Ok(Json(json!({
        "message": format!("Order #{} status updated to {}!", order.id, order.status),
        "order": order
    })))
}

pub async fn admin_delete_order(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .lock()
        .orders
        .delete_order(id)
        .ok_or(ApiError::NotFound(ORDER_NOT_FOUND))?;
    Ok(Json(json!({
        "message": "Order deleted successfully",
        "deleted_id": id
    })))
}

pub async fn admin_notify_order(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let notice = state
        .lock()
        .orders
        .notify(id)
        .ok_or(ApiError::NotFound(ORDER_NOT_FOUND))?;
    Ok(Json(json!({ "message": notice })))
}

/// Status values the admin dialog offers.
pub async fn order_statuses() -> Json<[OrderStatus; 4]> {
    Json(OrderStatus::ALL)
}

// ---------------------------------------------------------------------------
// Admin: messages
// ---------------------------------------------------------------------------

pub async fn admin_list_messages(State(state): State<AppState>) -> Json<serde_json::Value> {
    let ctx = state.lock();
    Json(json!({
        "unreadCount": ctx.messages.unread_count(),
        "messages": ctx.messages.all()
    }))
}

/// Opens a message; viewing it marks it as read
pub async fn admin_view_message(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<Message>, ApiError> {
    let message = state
        .lock()
        .messages
        .mark_as_read(id)
        .ok_or(ApiError::NotFound("Message not found"))?;
    Ok(Json(message))
}

pub async fn admin_delete_message(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .lock()
        .messages
        .remove(id)
        .ok_or(ApiError::NotFound("Message not found"))?;
    Ok(Json(json!({
        "message": "Message deleted successfully",
        "deleted_id": id
    })))
}

// ---------------------------------------------------------------------------
// Admin: testimonials & page content
// ---------------------------------------------------------------------------

pub async fn admin_create_testimonial(
    State(state): State<AppState>,
    Json(draft): Json<TestimonialDraft>,
) -> Result<impl IntoResponse, ApiError> {
    testimonials::validate_draft(&draft)?;
    let testimonial = state.lock().testimonials.add(draft);
    Ok((StatusCode::CREATED, Json(testimonial)))
}

pub async fn admin_update_testimonial(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(patch): Json<TestimonialPatch>,
) -> Result<Json<Testimonial>, ApiError> {
    testimonials::validate_patch(&patch)?;
    let testimonial = state
        .lock()
        .testimonials
        .update(id, patch)
        .ok_or(ApiError::NotFound("Testimonial not found"))?;
    Ok(Json(testimonial))
}

pub async fn admin_delete_testimonial(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .lock()
        .testimonials
        .remove(id)
        .ok_or(ApiError::NotFound("Testimonial not found"))?;
    Ok(Json(json!({
        "message": "Testimonial deleted successfully",
        "deleted_id": id
    })))
}

pub async fn admin_update_categories(
    State(state): State<AppState>,
    Json(tiles): Json<Vec<CategoryTile>>,
) -> Json<Vec<CategoryTile>> {
    let mut ctx = state.lock();
    ctx.categories.update_categories(tiles);
    Json(ctx.categories.categories().to_vec())
}

pub async fn admin_update_social(
    State(state): State<AppState>,
    Json(links): Json<SocialLinks>,
) -> Json<SocialLinks> {
    let mut ctx = state.lock();
    ctx.social.update_links(links);
    Json(ctx.social.links().clone())
}
