//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for registration, login,
//! and the two-step password reset flow, parse request data, and interact
//! with the `auth::service` facade for core business logic.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::database::models::{AccountInfo, RegisterAccount};
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::Json as ResponseJson,
};
use std::sync::Arc;

/// Handle account registration
#[axum::debug_handler]
pub async fn register(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(payload): Json<RegisterAccount>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<AccountInfo>>), (StatusCode, String)> {
    match auth_service.register(payload).await {
        Ok(account) => Ok((
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(
                AccountInfo::from(account),
                "Account registered",
            )),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, (StatusCode, String)> {
    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle a password reset request, returning the issued code.
///
/// Delivery to the user happens out-of-band through the configured
/// notifier; the code is echoed here so a boundary without one can still
/// complete the flow.
#[axum::debug_handler]
pub async fn request_password_reset(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Path(username): Path<String>,
) -> Result<ResponseJson<ApiResponse<ResetCodeResponse>>, (StatusCode, String)> {
    match auth_service.request_password_reset(&username).await {
        Ok(reset_code) => Ok(ResponseJson(ApiResponse::success(
            ResetCodeResponse { reset_code },
            "Reset code issued",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle the second reset step: redeem a code against a new password
#[axum::debug_handler]
pub async fn confirm_password_reset(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(payload): Json<ConfirmResetRequest>,
) -> Result<ResponseJson<ApiResponse<serde_json::Value>>, (StatusCode, String)> {
    match auth_service
        .confirm_password_reset(&payload.username, &payload.reset_code, &payload.new_password)
        .await
    {
        Ok(true) => Ok(ResponseJson(ApiResponse::success(
            serde_json::json!({ "reset": true }),
            "Password reset",
        ))),
        // Unmatched, expired, and consumed codes all land here.
        Ok(false) => {
            let body = ApiResponse::<()>::error(
                "Reset code is not valid",
                "reset_code_invalid",
                None,
            );
            Err((
                StatusCode::BAD_REQUEST,
                serde_json::to_string(&body).unwrap(),
            ))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Get current account information from the verified token
#[axum::debug_handler]
pub async fn me(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<ApiResponse<AccountInfo>>, (StatusCode, String)> {
    match auth_service.current_account(claims.username()).await {
        Ok(account) => Ok(ResponseJson(ApiResponse::ok(AccountInfo::from(account)))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Change the password of the authenticated account
#[axum::debug_handler]
pub async fn change_password(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<ResponseJson<ApiResponse<serde_json::Value>>, (StatusCode, String)> {
    match auth_service
        .change_password(claims.username(), &payload.new_password)
        .await
    {
        Ok(()) => Ok(ResponseJson(ApiResponse::success(
            serde_json::json!({ "changed": true }),
            "Password changed",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Delete the authenticated account
#[axum::debug_handler]
pub async fn delete_account(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<ApiResponse<serde_json::Value>>, (StatusCode, String)> {
    match auth_service.delete_account(claims.username()).await {
        Ok(()) => Ok(ResponseJson(ApiResponse::success(
            serde_json::json!({ "deleted": true }),
            "Account deleted",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
