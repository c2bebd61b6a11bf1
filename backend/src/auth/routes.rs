//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle registration, login, the two-step password reset
//! flow, and the bearer-protected account endpoints. They are designed to
//! be integrated into the main Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/resetpw/{username}", get(request_password_reset))
        .route("/resetpw/code", post(confirm_password_reset))
        .route("/me", get(me).layer(middleware::from_fn(jwt_auth)))
        .route(
            "/change-password",
            post(change_password).layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/account",
            delete(delete_account).layer(middleware::from_fn(jwt_auth)),
        )
}
