//! Database repository for password reset requests.
//!
//! One row per username at most; issuing a new code replaces the previous
//! row in a single upsert so that two concurrent issues can never leave two
//! live codes behind.

use crate::database::models::ResetRequest;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct ResetRequestRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> ResetRequestRepository<'a> {
    /// Creates a new ResetRequestRepository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a reset request for a username, superseding any prior one.
    ///
    /// Atomic: the ON CONFLICT clause overwrites the existing row (code,
    /// expiry, consumed flag) in the same statement, so a previously issued
    /// code is invalidated the instant the new one exists.
    pub async fn upsert_superseding(
        &self,
        username: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reset_requests (username, code, expires_at, consumed, created_at)
            VALUES (?, ?, ?, 0, ?)
            ON CONFLICT(username) DO UPDATE SET
                code = excluded.code,
                expires_at = excluded.expires_at,
                consumed = 0,
                created_at = excluded.created_at
            "#,
        )
        .bind(username)
        .bind(code)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves the unconsumed reset request for a username, if any.
    ///
    /// Expiry is checked by the caller against its own clock; an expired row
    /// returned here must be treated the same as no row.
    pub async fn find_unconsumed(&self, username: &str) -> Result<Option<ResetRequest>> {
        let request = sqlx::query_as::<_, ResetRequest>(
            r#"
            SELECT username, code, expires_at, consumed, created_at
            FROM reset_requests WHERE username = ? AND consumed = 0
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(request)
    }

    /// Marks the reset request holding exactly this code as consumed.
    ///
    /// The code is part of the claim: if a reissue replaced the row between
    /// the caller's read and this update, the stale code matches nothing
    /// and the fresh one stays redeemable.
    ///
    /// # Returns
    /// `true` if an unconsumed row was claimed; `false` means another call
    /// got there first, the row was superseded, or no row exists, so the
    /// code must not redeem.
    pub async fn mark_consumed(&self, username: &str, code: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE reset_requests SET consumed = 1 WHERE username = ? AND code = ? AND consumed = 0",
        )
        .bind(username)
        .bind(code)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
