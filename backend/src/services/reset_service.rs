//! Password reset business logic service.
//!
//! Owns the lifecycle of single-use reset codes: issuance with a fixed
//! validity window, supersession of older codes, and redemption. An
//! expired, consumed, or superseded code behaves exactly like one that was
//! never issued.

use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::account_repository::AccountRepository;
use crate::repositories::reset_repository::ResetRequestRepository;
use crate::services::account_service::AccountService;
use crate::utils::crypto::constant_time_eq;
use crate::utils::generate_reset_code::{RESET_CODE_LENGTH, generate_reset_code};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ResetCodeManager {
    /// Shared database connection pool
    pool: SqlitePool,
    /// Used to re-hash the password once a code redeems
    accounts: AccountService,
    /// Validity window for issued codes
    code_ttl_minutes: i64,
}

impl ResetCodeManager {
    /// Creates a new ResetCodeManager instance.
    pub fn new(pool: SqlitePool, accounts: AccountService, code_ttl_minutes: i64) -> Self {
        Self {
            pool,
            accounts,
            code_ttl_minutes,
        }
    }

    /// Issues a fresh reset code for an account.
    ///
    /// Any previously issued code for the same username is superseded in the
    /// same statement, so at most one code is ever redeemable. The code is
    /// returned to the caller for out-of-band delivery; it is not logged and
    /// not transmitted by this service.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if the account doesn't exist
    pub async fn issue(&self, username: &str) -> ServiceResult<String> {
        let account_repo = AccountRepository::new(&self.pool);
        if account_repo
            .get_account_by_username(username)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Account", username));
        }

        let code = generate_reset_code(RESET_CODE_LENGTH);
        let expires_at = Utc::now() + Duration::minutes(self.code_ttl_minutes);

        let reset_repo = ResetRequestRepository::new(&self.pool);
        reset_repo
            .upsert_superseding(username, &code, expires_at)
            .await?;

        tracing::info!("Issued password reset code for {}", username);
        Ok(code)
    }

    /// Redeems a reset code, setting a new password on success.
    ///
    /// # Returns
    /// `Ok(true)` when the code matched an active request; the request is
    /// marked consumed before the password changes, so a second redemption
    /// with the same code returns `Ok(false)`. Any mismatch — unknown code,
    /// expired window, already consumed — yields the same `Ok(false)`.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if the account doesn't exist, and
    /// `ServiceError::Validation` for an empty new password (checked before
    /// the code is consumed).
    pub async fn redeem(
        &self,
        username: &str,
        code: &str,
        new_password: &str,
    ) -> ServiceResult<bool> {
        let account_repo = AccountRepository::new(&self.pool);
        if account_repo
            .get_account_by_username(username)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Account", username));
        }

        if new_password.is_empty() {
            return Err(ServiceError::validation("Password must not be empty"));
        }

        let reset_repo = ResetRequestRepository::new(&self.pool);
        let request = match reset_repo.find_unconsumed(username).await? {
            Some(request) => request,
            None => return Ok(false),
        };

        if !request.is_active(Utc::now()) {
            return Ok(false);
        }

        if !constant_time_eq(code, &request.code) {
            return Ok(false);
        }

        // Claim the request before touching the password. The claim carries
        // the code we just matched: a concurrent redeem or a reissue that
        // replaced the row leaves nothing for the stale code to claim.
        if !reset_repo.mark_consumed(username, &request.code).await? {
            return Ok(false);
        }

        self.accounts.change_password(username, new_password).await?;

        tracing::info!("Password reset completed for {}", username);
        Ok(true)
    }
}
