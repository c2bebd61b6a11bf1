//! Data structures for authentication-related entities.
//!
//! This module defines the request and response payloads for the
//! authentication flow: login, password reset, and password change. The
//! registration payload lives with the database models since it doubles as
//! the account-creation DTO.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response containing the session token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always "Bearer"; the token goes into an `Authorization` header.
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Response to a password reset request.
///
/// Carries the code so the boundary can hand it to the delivery
/// collaborator; a production deployment would not echo it to the
/// requester.
#[derive(Debug, Serialize)]
pub struct ResetCodeResponse {
    pub reset_code: String,
}

/// Second step of the reset flow: code plus replacement password.
#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmResetRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Reset code is required"))]
    pub reset_code: String,

    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Password change for an already-authenticated account.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}
