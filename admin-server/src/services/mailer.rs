//! Invoice mailer.
//!
//! Delivery is best-effort: a failure is reported in the create-invoice
//! response but never rolls back the persisted invoice.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// Hands the rendered artifact and the customer's address to the mail
/// transport.
#[async_trait]
pub trait InvoiceMailer: Send + Sync {
    async fn send(&self, recipient: &str, artifact: &Path) -> Result<(), MailerError>;
}

/// Default mailer: logs the handoff. The real transport lives outside this
/// core.
pub struct LogMailer;

#[async_trait]
impl InvoiceMailer for LogMailer {
    async fn send(&self, recipient: &str, artifact: &Path) -> Result<(), MailerError> {
        tracing::info!(recipient, artifact = %artifact.display(), "Invoice mail handed off");
        Ok(())
    }
}
