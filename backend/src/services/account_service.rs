//! Account business logic service.
//!
//! Handles registration, credential verification, password updates, and
//! account deletion. All validation happens before any hashing or storage
//! I/O is attempted, so a rejected request never leaves partial writes.

use crate::database::models::{Account, CreateAccount, RegisterAccount};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::account_repository::AccountRepository;
use crate::utils::crypto::PasswordHasher;
use sqlx::SqlitePool;
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct AccountService {
    /// Shared database connection pool
    pool: SqlitePool,
    /// Process-wide hasher, constructed once at startup
    hasher: Arc<PasswordHasher>,
}

impl AccountService {
    /// Creates a new AccountService instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool
    /// * `hasher` - Shared password hasher carrying the pepper
    pub fn new(pool: SqlitePool, hasher: Arc<PasswordHasher>) -> Self {
        Self { pool, hasher }
    }

    /// Registers a new account with full validation.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures (username shape, empty password, phone format)
    /// - Duplicate usernames
    pub async fn register(&self, register: RegisterAccount) -> ServiceResult<Account> {
        // Input validation using validator crate
        if let Err(validation_errors) = register.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();

            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        // Business validation
        Self::validate_phone_number(&register.phone_number)?;

        let repo = AccountRepository::new(&self.pool);

        // Check if username is already taken
        if repo.username_exists(&register.username).await? {
            return Err(ServiceError::already_exists("Account", &register.username));
        }

        let password_hash = self.hasher.hash(&register.password)?;

        let data = CreateAccount {
            username: register.username,
            phone_number: register.phone_number,
            password_hash,
        };

        let account = repo.create_account(data.clone()).await.map_err(|e| {
            // Two concurrent registrations can both pass the pre-check; the
            // UNIQUE constraint is the authoritative guard.
            if e.to_string().contains("UNIQUE constraint failed") {
                ServiceError::already_exists("Account", &data.username)
            } else {
                ServiceError::Database { source: e }
            }
        })?;

        tracing::info!("Registered account {}", account.username);
        Ok(account)
    }

    /// Verifies a username/password pair.
    ///
    /// # Returns
    /// `true` if the password matches the stored hash, `false` otherwise
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if no such account exists. The
    /// facade folds that into the same rejection as a wrong password so the
    /// distinction never reaches a login caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> ServiceResult<bool> {
        let repo = AccountRepository::new(&self.pool);
        let account = repo
            .get_account_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", username))?;

        Ok(self.hasher.verify(password, &account.password_hash))
    }

    /// Re-hashes and persists a new password for an existing account.
    pub async fn change_password(&self, username: &str, new_password: &str) -> ServiceResult<()> {
        if new_password.is_empty() {
            return Err(ServiceError::validation("Password must not be empty"));
        }

        let password_hash = self.hasher.hash(new_password)?;

        let repo = AccountRepository::new(&self.pool);
        if !repo.update_password_hash(username, &password_hash).await? {
            return Err(ServiceError::not_found("Account", username));
        }

        tracing::info!("Password changed for {}", username);
        Ok(())
    }

    /// Permanently deletes an account and its pending reset request.
    pub async fn delete_account(&self, username: &str) -> ServiceResult<()> {
        let repo = AccountRepository::new(&self.pool);
        if !repo.delete_account(username).await? {
            return Err(ServiceError::not_found("Account", username));
        }

        tracing::info!("Deleted account {}", username);
        Ok(())
    }

    /// Retrieves an account by username with existence verification.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if the account doesn't exist
    pub async fn get_account_required(&self, username: &str) -> ServiceResult<Account> {
        let repo = AccountRepository::new(&self.pool);
        let account = repo
            .get_account_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", username))?;
        Ok(account)
    }

    /// Phone numbers are digits with an optional leading `+`.
    fn validate_phone_number(phone_number: &str) -> ServiceResult<()> {
        let digits = phone_number.strip_prefix('+').unwrap_or(phone_number);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ServiceError::validation(
                "Phone number must contain only digits with an optional leading +",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::SCHEMA;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_service() -> AccountService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();
        AccountService::new(pool, Arc::new(PasswordHasher::new("test-pepper")))
    }

    fn register_dto(username: &str, password: &str, phone: &str) -> RegisterAccount {
        RegisterAccount {
            username: username.to_string(),
            password: password.to_string(),
            phone_number: phone.to_string(),
        }
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let service = test_service().await;
        let account = service
            .register(register_dto("a@b.com", "pw", "+1234"))
            .await
            .unwrap();

        assert_eq!(account.username, "a@b.com");
        assert!(!account.password_hash.is_empty());
        assert_ne!(account.password_hash, "pw");

        assert!(service.authenticate("a@b.com", "pw").await.unwrap());
        assert!(!service.authenticate("a@b.com", "wrongpw").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let service = test_service().await;
        service
            .register(register_dto("a@b.com", "pw", "+1234"))
            .await
            .unwrap();

        let err = service
            .register(register_dto("a@b.com", "pw2", "+5678"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { .. }));

        // First account's password is unchanged.
        assert!(service.authenticate("a@b.com", "pw").await.unwrap());
        assert!(!service.authenticate("a@b.com", "pw2").await.unwrap());
    }

    #[tokio::test]
    async fn invalid_fields_are_rejected_before_any_write() {
        let service = test_service().await;

        for dto in [
            register_dto("not-an-email", "pw", "+1234"),
            register_dto("a@b.com", "", "+1234"),
            register_dto("a@b.com", "pw", ""),
            register_dto("a@b.com", "pw", "+12a4"),
            register_dto("a@b.com", "pw", "+"),
        ] {
            let err = service.register(dto).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation { .. }));
        }

        let err = service.authenticate("a@b.com", "pw").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn change_password_takes_effect() {
        let service = test_service().await;
        service
            .register(register_dto("a@b.com", "old-pw", "+1234"))
            .await
            .unwrap();

        service.change_password("a@b.com", "new-pw").await.unwrap();

        assert!(!service.authenticate("a@b.com", "old-pw").await.unwrap());
        assert!(service.authenticate("a@b.com", "new-pw").await.unwrap());

        let err = service.change_password("a@b.com", "").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
        let err = service
            .change_password("ghost@b.com", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_account_removes_it() {
        let service = test_service().await;
        service
            .register(register_dto("a@b.com", "pw", "+1234"))
            .await
            .unwrap();

        service.delete_account("a@b.com").await.unwrap();

        let err = service.authenticate("a@b.com", "pw").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));

        let err = service.delete_account("a@b.com").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}
