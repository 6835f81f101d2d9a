//! Library exports for the storefront
//!
//! The stores, cart, checkout and auth gate are plain synchronous Rust;
//! `handler`, `route` and `middleware` expose them over HTTP.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod context;
pub mod database;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod route;
pub mod seed;
pub mod store;
