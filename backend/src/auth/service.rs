//! Core business logic for the authentication system.
//!
//! `AuthService` is the single entry point the HTTP layer calls. It
//! composes the account service, the reset-code manager, and the token
//! service into the registration, login, and password-reset use cases.
//! Constructed once at startup with the process secrets and shared across
//! requests.

use crate::auth::models::{LoginRequest, LoginResponse};
use crate::config::Config;
use crate::database::models::{Account, RegisterAccount};
use crate::errors::{ServiceError, ServiceResult};
use crate::services::account_service::AccountService;
use crate::services::notifier::{LogNotifier, ResetCodeNotifier};
use crate::services::reset_service::ResetCodeManager;
use crate::utils::crypto::PasswordHasher;
use crate::utils::jwt::JwtUtils;
use sqlx::SqlitePool;
use std::sync::Arc;
use validator::Validate;

/// Authentication facade composing the account, reset, and token services.
pub struct AuthService {
    accounts: AccountService,
    resets: ResetCodeManager,
    jwt: Arc<JwtUtils>,
    notifier: Arc<dyn ResetCodeNotifier>,
    token_ttl_minutes: i64,
}

impl AuthService {
    /// Create a new AuthService instance.
    ///
    /// The hasher and the token service receive their secrets here, once;
    /// nothing below this constructor reads the environment.
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        let hasher = Arc::new(PasswordHasher::new(config.pepper.clone()));
        let accounts = AccountService::new(pool.clone(), hasher);
        let resets =
            ResetCodeManager::new(pool, accounts.clone(), config.reset_code_ttl_minutes);

        AuthService {
            accounts,
            resets,
            jwt: Arc::new(JwtUtils::new(&config.jwt_secret)),
            notifier: Arc::new(LogNotifier),
            token_ttl_minutes: config.token_ttl_minutes,
        }
    }

    /// Swap the reset-code delivery channel.
    pub fn with_notifier(mut self, notifier: Arc<dyn ResetCodeNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Shared handle to the token service, for the route-protection
    /// middleware.
    pub fn jwt(&self) -> Arc<JwtUtils> {
        Arc::clone(&self.jwt)
    }

    /// Register a new account.
    pub async fn register(&self, register: RegisterAccount) -> ServiceResult<Account> {
        self.accounts.register(register).await
    }

    /// Authenticate and issue a session token.
    ///
    /// An unknown username and a wrong password produce the identical
    /// `AuthenticationFailed`; no token is issued on either.
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<LoginResponse> {
        if let Err(validation_errors) = login_request.validate() {
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

        match self
            .accounts
            .authenticate(&login_request.username, &login_request.password)
            .await
        {
            Ok(true) => {}
            Ok(false) | Err(ServiceError::NotFound { .. }) => {
                return Err(ServiceError::AuthenticationFailed);
            }
            Err(e) => return Err(e),
        }

        let access_token = self
            .jwt
            .generate_token(&login_request.username, self.token_ttl_minutes)?;

        tracing::info!("Login succeeded for {}", login_request.username);

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_ttl_minutes * 60,
        })
    }

    /// First step of the forgot-password flow: issue a single-use code and
    /// hand it to the delivery collaborator.
    ///
    /// Delivery failures are logged but do not fail the request; the code
    /// is already stored and the caller can retry delivery out-of-band.
    pub async fn request_password_reset(&self, username: &str) -> ServiceResult<String> {
        let code = self.resets.issue(username).await?;

        if let Err(e) = self.notifier.deliver(username, &code).await {
            tracing::warn!("Reset code delivery to {} failed: {}", username, e);
        }

        Ok(code)
    }

    /// Second step of the forgot-password flow: redeem the code.
    ///
    /// Returns `Ok(false)` for any code that does not match an active
    /// request; this is an expected outcome, not an error.
    pub async fn confirm_password_reset(
        &self,
        username: &str,
        code: &str,
        new_password: &str,
    ) -> ServiceResult<bool> {
        self.resets.redeem(username, code, new_password).await
    }

    /// Look up the account behind a verified token subject.
    pub async fn current_account(&self, username: &str) -> ServiceResult<Account> {
        self.accounts.get_account_required(username).await
    }

    /// Change the password of an authenticated account.
    pub async fn change_password(
        &self,
        username: &str,
        new_password: &str,
    ) -> ServiceResult<()> {
        self.accounts.change_password(username, new_password).await
    }

    /// Delete an authenticated account permanently.
    pub async fn delete_account(&self, username: &str) -> ServiceResult<()> {
        self.accounts.delete_account(username).await
    }
}
