//! Outbound email configuration.

use serde::{Deserialize, Serialize};

/// SMTP settings. With no `smtp_host` the mailer only logs messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host.
    #[serde(default)]
    pub smtp_host: Option<String>,
    /// SMTP port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: Option<String>,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: Option<String>,
    /// Use STARTTLS instead of implicit TLS.
    #[serde(default = "default_true")]
    pub use_starttls: bool,
    /// Sender address.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            use_starttls: true,
            from_address: default_from(),
            from_name: default_from_name(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

fn default_from() -> String {
    "noreply@momentos.local".to_string()
}

fn default_from_name() -> String {
    "Momentos".to_string()
}
