//! Route definitions for the storefront API
//!
//! Maps every view-layer interaction onto its handler and puts the admin
//! console behind the Auth Gate middleware.

use axum::routing::{get, patch, post, put};
use axum::{middleware, Router};

use crate::context::AppState;
use crate::handler::*;
use crate::middleware::admin_gate;

/// Creates and configures the application router
///
/// # Route Definitions
///
/// Storefront (public):
/// - `GET /api/products` - Catalog with `category` and `sort` query params
/// - `GET /api/products/new`, `GET /api/products/sale` - New arrivals and sale pages
/// - `GET /api/products/{id}` - Product detail
/// - `GET /api/testimonials`, `GET /api/categories`, `GET /api/social` - Page content
/// - `GET|POST|DELETE /api/cart`, `PUT|DELETE /api/cart/{id}` - Cart
/// - `GET|POST /api/checkout` - Checkout entry check and order placement
/// - `GET /api/orders/track/{order_number}` - Order tracking
/// - `PUT /api/orders/track/{order_number}/status` - Tracking page status controls
/// - `POST /api/contact` - Contact form
/// - `POST /api/auth/login`, `POST /api/auth/logout`, `GET /api/auth/session`
///
/// Admin console (requires login):
/// - `/api/admin/products`, `/api/admin/orders`, `/api/admin/messages`,
///   `/api/admin/testimonials`, `/api/admin/categories`, `/api/admin/social`
///
/// # Example Usage
///
/// ```no_run
/// # use storefront::auth::Credentials;
/// # use storefront::context::{AppContext, AppState};
/// # use storefront::route::create_app;
/// let state = AppState::new(AppContext::in_memory(Credentials::default()));
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/products",
            get(list_products)
                .post(admin_create_product)
                .put(admin_replace_products),
        )
        .route(
            "/products/{id}",
            get(get_product)
                .patch(admin_update_product)
                .delete(admin_delete_product),
        )
        .route("/orders", get(admin_list_orders))
        .route(
            "/orders/{id}",
            get(admin_get_order).delete(admin_delete_order),
        )
        .route("/orders/{id}/status", put(admin_update_order_status))
        .route("/orders/{id}/notify", post(admin_notify_order))
        .route("/messages", get(admin_list_messages))
        .route(
            "/messages/{id}",
            get(admin_view_message).delete(admin_delete_message),
        )
        .route(
            "/testimonials",
            get(list_testimonials).post(admin_create_testimonial),
        )
        .route(
            "/testimonials/{id}",
            patch(admin_update_testimonial).delete(admin_delete_testimonial),
        )
        .route("/categories", put(admin_update_categories))
        .route("/social", put(admin_update_social))
        .layer(middleware::from_fn_with_state(state.clone(), admin_gate));

    let api_routes = Router::new()
        .route("/products", get(list_products))
        .route("/products/new", get(list_new_arrivals))
        .route("/products/sale", get(list_sale))
        .route("/products/{id}", get(get_product))
        .route("/testimonials", get(list_testimonials))
        .route("/categories", get(list_categories))
        .route("/social", get(get_social))
        .route(
            "/cart",
            get(get_cart).post(add_to_cart).delete(clear_cart),
        )
        .route(
            "/cart/{id}",
            put(set_cart_quantity).delete(remove_cart_item),
        )
        .route("/checkout", get(checkout_summary).post(place_order))
        .route("/orders/statuses", get(order_statuses))
        .route("/orders/track/{order_number}", get(track_order))
        .route(
            "/orders/track/{order_number}/status",
            put(set_tracked_status),
        )
        .route("/contact", post(submit_contact))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
        .nest("/admin", admin_routes);

    Router::new().nest("/api", api_routes).with_state(state)
}
