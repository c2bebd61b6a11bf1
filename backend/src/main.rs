//! Main entry point for the authentication backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, builds the shared authentication facade, and registers all
//! API routes and middleware. It orchestrates the application's startup
//! and defines its overall structure.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use crate::api::common::ApiResponse;
use crate::auth::service::AuthService;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    let pool = db.pool().clone();

    // Single long-lived facade: hasher and signing key are constructed once
    // here and shared across all requests.
    let auth_service = Arc::new(AuthService::new(pool, &config));
    let jwt = auth_service.jwt();

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/api/v1", auth::routes::auth_router())
        .layer(Extension(auth_service))
        .layer(Extension(jwt));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting auth server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Auth Backend",
            "version": "0.1.0"
        }),
        "Welcome to the Auth API",
    ))
}
