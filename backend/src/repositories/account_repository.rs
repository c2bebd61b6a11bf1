//! Database repository for account management operations.
//!
//! Provides CRUD operations for user accounts. This is the durable
//! credential store the services depend on; username uniqueness is enforced
//! by the schema and surfaced here as plain errors.

use crate::database::models::{Account, CreateAccount};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Repository for account database operations.
///
/// Handles all persistence operations for the Account entity.
pub struct AccountRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> AccountRepository<'a> {
    /// Creates a new AccountRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new account in the database.
    ///
    /// # Arguments
    /// * `account` - CreateAccount DTO with the already-hashed password
    ///
    /// # Returns
    /// The newly created Account with all fields populated
    pub async fn create_account(&self, account: CreateAccount) -> Result<Account> {
        let now = Utc::now();
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, username, phone_number, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, username, phone_number, password_hash, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(&account.username)
        .bind(&account.phone_number)
        .bind(&account.password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(account)
    }

    /// Retrieves an account by its unique identifier.
    ///
    /// # Returns
    /// `Some(Account)` if found, `None` otherwise
    pub async fn get_account_by_id(&self, id: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, phone_number, password_hash, created_at, updated_at
            FROM accounts WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Retrieves an account by username.
    ///
    /// # Returns
    /// `Some(Account)` if found, `None` otherwise
    pub async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, phone_number, password_hash, created_at, updated_at
            FROM accounts WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Checks if a username already exists in the system.
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE username = ?")
                .bind(username)
                .fetch_one(self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Replaces the stored password hash for a username.
    ///
    /// # Returns
    /// `true` if a row was updated, `false` if the account does not exist
    pub async fn update_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE accounts SET password_hash = ?, updated_at = ? WHERE username = ?",
        )
        .bind(password_hash)
        .bind(Utc::now())
        .bind(username)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Permanently deletes an account. Reset requests for the username are
    /// removed by the schema's ON DELETE CASCADE.
    ///
    /// # Returns
    /// `true` if a row was deleted, `false` if the account does not exist
    pub async fn delete_account(&self, username: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE username = ?")
            .bind(username)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::SCHEMA;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn lookup_by_id_finds_the_created_account() {
        let pool = test_pool().await;
        let repo = AccountRepository::new(&pool);

        let created = repo
            .create_account(CreateAccount {
                username: "a@b.com".to_string(),
                phone_number: "+1234".to_string(),
                password_hash: "stored-hash".to_string(),
            })
            .await
            .unwrap();

        let by_id = repo.get_account_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "a@b.com");
        assert_eq!(by_id.id, created.id);

        assert!(repo.get_account_by_id("no-such-id").await.unwrap().is_none());
    }
}
