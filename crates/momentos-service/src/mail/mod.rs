//! Outbound email: the SMTP transport and message templates.

pub mod smtp;
pub mod templates;

pub use smtp::SmtpMailer;
