//! JWT token utilities for authentication.
//!
//! Provides session-token creation and validation. Tokens are
//! self-contained: the server keeps no session state, so a token is valid
//! exactly while its signature checks out and its expiry lies in the
//! future. There is no revocation before natural expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::{ServiceError, ServiceResult};

/// JWT claims carried by a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username of the authenticated account.
    pub sub: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

impl Claims {
    pub fn username(&self) -> &str {
        &self.sub
    }
}

/// JWT token utility for creating and validating tokens.
///
/// Holds the signing key material, read-only after construction and safe
/// for unlimited concurrent use.
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the configured signing secret.
    pub fn new(secret: &str) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generate a token binding `subject` to an absolute expiry of
    /// `now + ttl_minutes`.
    pub fn generate_token(&self, subject: &str, ttl_minutes: i64) -> ServiceResult<String> {
        if ttl_minutes <= 0 {
            return Err(ServiceError::validation(
                "Token TTL must be a positive number of minutes",
            ));
        }

        let now = Utc::now();
        let exp = now + Duration::minutes(ttl_minutes);

        let claims = Claims {
            sub: subject.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            ServiceError::internal_error(format!("Token generation failed: {}", e))
        })
    }

    /// Validate and decode a session token.
    ///
    /// Malformed input, a bad signature, and an expired token all collapse
    /// into the same `AuthenticationFailed`; the caller gets no oracle for
    /// why verification failed.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| ServiceError::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_validates() {
        let jwt = JwtUtils::new("test-secret");
        let token = jwt.generate_token("a@b.com", 30).unwrap();
        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.username(), "a@b.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = JwtUtils::new("test-secret");

        // Forge claims well past the default validation leeway.
        let now = Utc::now();
        let claims = Claims {
            sub: "a@b.com".to_string(),
            exp: (now - Duration::minutes(5)).timestamp() as usize,
            iat: (now - Duration::minutes(35)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            jwt.validate_token(&token),
            Err(ServiceError::AuthenticationFailed)
        ));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let jwt = JwtUtils::new("test-secret");
        let token = jwt.generate_token("a@b.com", 30).unwrap();

        // Flip one character of the payload.
        let mut bytes = token.into_bytes();
        let idx = bytes.len() / 2;
        bytes[idx] = if bytes[idx] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(
            jwt.validate_token(&tampered),
            Err(ServiceError::AuthenticationFailed)
        ));
    }

    #[test]
    fn wrong_key_is_rejected() {
        let token = JwtUtils::new("key-one")
            .generate_token("a@b.com", 30)
            .unwrap();
        assert!(
            JwtUtils::new("key-two")
                .validate_token(&token)
                .is_err()
        );
    }

    #[test]
    fn non_positive_ttl_is_rejected() {
        let jwt = JwtUtils::new("test-secret");
        assert!(jwt.generate_token("a@b.com", 0).is_err());
        assert!(jwt.generate_token("a@b.com", -5).is_err());
    }
}
