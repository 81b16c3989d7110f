//! Outbound email delivery.

use async_trait::async_trait;

use crate::result::AppResult;

/// A single outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
    /// Optional HTML alternative.
    pub html_body: Option<String>,
}

/// Sends email. Implemented over SMTP in `momentos-service`; tests swap in
/// a recording implementation.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver one message, returning once the transport accepted it.
    async fn send(&self, message: EmailMessage) -> AppResult<()>;
}
