//! CareScribe Server - AI medical charting API
//!
//! This library provides the CareScribe HTTP server: recording sessions,
//! transcript retention, chart generation and dashboard statistics for
//! multi-tenant hospital use.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use error::*;
pub use server::{CareScribeServer, ServerConfig};

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: CareScribeServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer())
                .layer(from_fn(middleware::request_timing_middleware)),
        )
        .with_state(server)
}
