//! SMTP mailer built on lettre. Without a configured host it only logs.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use momentos_core::config::EmailConfig;
use momentos_core::error::AppError;
use momentos_core::result::AppResult;
use momentos_core::traits::mailer::{EmailMessage, Mailer};

/// Delivers mail over SMTP, or logs it when no SMTP host is configured.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from.to_string())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl SmtpMailer {
    /// Build the mailer from configuration.
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let from = format!("{} <{}>", config.from_name, config.from_address)
            .parse::<Mailbox>()
            .map_err(|e| AppError::configuration(format!("Invalid sender address: {e}")))?;

        let host = config
            .smtp_host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty());

        let transport = match host {
            None => {
                warn!("SMTP host not configured; emails will be logged, not sent");
                None
            }
            Some(host) => {
                let builder = if config.use_starttls {
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                } else {
                    AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                }
                .map_err(|e| {
                    AppError::configuration(format!("Failed to configure SMTP transport: {e}"))
                })?
                .port(config.smtp_port);

                let builder = match (&config.smtp_username, &config.smtp_password) {
                    (Some(user), Some(pass)) => {
                        builder.credentials(Credentials::new(user.clone(), pass.clone()))
                    }
                    _ => builder,
                };
                Some(Arc::new(builder.build()))
            }
        };

        Ok(Self { transport, from })
    }

    /// Whether messages actually leave the process.
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    fn build(&self, message: &EmailMessage) -> AppResult<Message> {
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|e| AppError::validation(format!("Invalid recipient address: {e}")))?;

        let builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone());

        let built = match &message.html_body {
            Some(html) => builder.multipart(MultiPart::alternative_plain_html(
                message.text_body.clone(),
                html.clone(),
            )),
            None => builder.singlepart(
                SinglePart::builder()
                    .header(header::ContentType::TEXT_PLAIN)
                    .body(message.text_body.clone()),
            ),
        };

        built.map_err(|e| AppError::internal(format!("Failed to build email: {e}")))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        let email = self.build(&message)?;

        match &self.transport {
            Some(transport) => {
                transport.send(email).await.map_err(|e| {
                    AppError::with_source(
                        momentos_core::error::ErrorKind::ExternalService,
                        "Failed to send email",
                        e,
                    )
                })?;
                info!(subject = %message.subject, "Email sent");
            }
            None => {
                info!(
                    to = %message.to,
                    subject = %message.subject,
                    "SMTP disabled; skipping email delivery"
                );
            }
        }
        Ok(())
    }
}
