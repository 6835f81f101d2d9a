//! Error types
//!
//! Validation and checkout errors carry the exact text shown to the
//! shopper; `ApiError` maps everything onto the JSON error body returned by
//! the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure reading or writing a persisted store snapshot.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("database error: {0}")]
    Database(#[from] redb::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Checkout submission rejected before any state was touched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),
    #[error("Please enter a valid 16-digit card number")]
    InvalidCardNumber,
    #[error("Please enter the cardholder name")]
    MissingCardholder,
    #[error("Please enter a valid expiry date")]
    InvalidExpiry,
    #[error("Please enter a valid CVV")]
    InvalidCvv,
}

/// Admin or contact-form input that failed a field rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Please enter a valid order number")]
    InvalidOrderNumber,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Admin login required")]
    Unauthorized,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Checkout(CheckoutError::EmptyCart) => StatusCode::CONFLICT,
            ApiError::Checkout(_) | ApiError::Validation(_) | ApiError::InvalidOrderNumber => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Checkout(CheckoutError::EmptyCart) => "empty_cart",
            ApiError::Checkout(_) => "invalid_payment",
            ApiError::Validation(_) => "validation",
            ApiError::InvalidOrderNumber => "invalid_order_number",
            ApiError::NotFound(_) => "not_found",
            ApiError::InvalidCredentials => "invalid_credentials",
            ApiError::Unauthorized => "unauthorized",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
            "code": self.code(),
        }));
        (self.status(), body).into_response()
    }
}
