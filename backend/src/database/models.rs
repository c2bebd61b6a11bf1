//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models;
//! in particular `Account` carries the password hash and must never be
//! serialized into a response as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A registered user account.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub phone_number: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for account creation, after the password has been hashed.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub username: String,
    pub phone_number: String,
    pub password_hash: String,
}

/// Raw registration input, validated before any hashing or storage I/O.
///
/// The username doubles as the login identifier and the out-of-band contact
/// address, so it must look like an email address.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterAccount {
    #[validate(
        email(message = "Username must be a valid email address"),
        length(max = 255, message = "Username too long")
    )]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
}

/// A pending password reset, at most one per username.
///
/// A row counts as active only while `consumed` is false and `expires_at`
/// lies in the future; everything else is treated exactly like a row that
/// never existed.
#[derive(Debug, Clone, FromRow)]
pub struct ResetRequest {
    pub username: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
    pub created_at: DateTime<Utc>,
}

impl ResetRequest {
    /// Whether this request can still be redeemed at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.consumed && now < self.expires_at
    }
}

/// Public view of an account, safe to serialize into responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: String,
    pub username: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountInfo {
    fn from(account: Account) -> Self {
        AccountInfo {
            id: account.id,
            username: account.username,
            phone_number: account.phone_number,
            created_at: account.created_at,
        }
    }
}
