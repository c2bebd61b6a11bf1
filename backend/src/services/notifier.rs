//! Out-of-band delivery of password reset codes.
//!
//! The core only produces the code string; transporting it to the user
//! (email, SMS) belongs to an external collaborator behind this trait. The
//! default implementation just records that a delivery would happen, which
//! keeps local development self-contained.

use crate::errors::ServiceResult;
use async_trait::async_trait;

/// Channel that delivers a reset code to the account owner.
#[async_trait]
pub trait ResetCodeNotifier: Send + Sync {
    async fn deliver(&self, username: &str, code: &str) -> ServiceResult<()>;
}

/// Notifier that logs the delivery instead of sending anything.
///
/// Logs the recipient only; the code is a secret and never appears in log
/// output.
pub struct LogNotifier;

#[async_trait]
impl ResetCodeNotifier for LogNotifier {
    async fn deliver(&self, username: &str, _code: &str) -> ServiceResult<()> {
        tracing::info!("Reset code ready for delivery to {}", username);
        Ok(())
    }
}
