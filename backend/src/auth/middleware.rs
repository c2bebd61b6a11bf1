//! Middleware for protecting authenticated routes.
//!
//! Validates bearer session tokens on incoming requests. Any value that is
//! not a well-formed `Bearer <token>` header carrying a token that parses,
//! verifies, and has not expired is rejected with 401; the response does
//! not say which check failed.

use crate::utils::jwt::JwtUtils;
use axum::{
    Extension,
    extract::Request,
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    match jwt_utils.validate_token(token) {
        Ok(claims) => {
            // Add claims to request extensions for use in handlers
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(_) => Err(StatusCode::UNAUTHORIZED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::Claims;
    use axum::{Router, body::Body, http, routing::get};
    use tower::ServiceExt;

    // The handler pulls the claims out of the extensions, so a request that
    // gets through without them fails with a 500 rather than a false pass.
    async fn me_handler(Extension(claims): Extension<Claims>) -> String {
        claims.username().to_string()
    }

    fn protected_app(jwt_utils: Arc<JwtUtils>) -> Router {
        Router::new()
            .route(
                "/me",
                get(me_handler).layer(axum::middleware::from_fn(jwt_auth)),
            )
            .layer(Extension(jwt_utils))
    }

    fn get_me(authorization: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri("/me");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn missing_authorization_header_is_rejected() {
        let app = protected_app(Arc::new(JwtUtils::new("test-secret")));
        let response = app.oneshot(get_me(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_authorization_is_rejected() {
        let jwt_utils = Arc::new(JwtUtils::new("test-secret"));
        let token = jwt_utils.generate_token("a@b.com", 30).unwrap();
        let app = protected_app(jwt_utils);

        // A valid token under the wrong scheme, or with no scheme at all,
        // must not get through.
        for value in [
            format!("Basic {}", token),
            format!("bearer {}", token),
            token.clone(),
        ] {
            let response = app.clone().oneshot(get_me(Some(&value))).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn garbage_bearer_token_is_rejected() {
        let app = protected_app(Arc::new(JwtUtils::new("test-secret")));
        let response = app
            .oneshot(get_me(Some("Bearer not-a-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_bearer_token_reaches_the_handler() {
        let jwt_utils = Arc::new(JwtUtils::new("test-secret"));
        let token = jwt_utils.generate_token("a@b.com", 30).unwrap();
        let app = protected_app(jwt_utils);

        let response = app
            .oneshot(get_me(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
