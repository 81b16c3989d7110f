//! Double-submit CSRF protection.
//!
//! `GET /auth/csrf` sets a random token in a readable cookie. Browsers send
//! the cookie automatically, but only same-origin script can read it and
//! copy it into the CSRF header, so a matching header proves the request
//! came from the application itself.

use momentos_core::config::AuthConfig;
use momentos_core::error::AppError;

use crate::token::{constant_time_eq, generate_token};

/// Checks CSRF tokens on state-changing requests.
#[derive(Debug, Clone)]
pub struct CsrfGuard {
    enabled: bool,
    cookie_name: String,
    header_name: String,
}

impl CsrfGuard {
    /// Build the guard from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            enabled: config.csrf_enabled,
            cookie_name: config.csrf_cookie_name.clone(),
            header_name: config.csrf_header_name.to_ascii_lowercase(),
        }
    }

    /// Name of the cookie holding the token.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Name of the header that must echo the token.
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Issue a fresh token.
    pub fn issue(&self) -> String {
        generate_token()
    }

    /// Whether `method` changes state and therefore needs a token.
    pub fn requires_token(&self, method: &str) -> bool {
        self.enabled && !matches!(method, "GET" | "HEAD" | "OPTIONS" | "TRACE")
    }

    /// Verify the header echoes the cookie.
    pub fn verify(&self, cookie: Option<&str>, header: Option<&str>) -> Result<(), AppError> {
        match (cookie, header) {
            (Some(cookie), Some(header)) if !cookie.is_empty() && constant_time_eq(cookie, header) => {
                Ok(())
            }
            (None, _) => Err(AppError::authorization("CSRF Failed: CSRF cookie not set")),
            _ => Err(AppError::authorization(
                "CSRF Failed: CSRF token missing or incorrect",
            )),
        }
    }
}
