//! Authentication, session cookie, and password-reset configuration.

use serde::{Deserialize, Serialize};

/// Session and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in hours.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: i64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_session_cookie")]
    pub session_cookie_name: String,
    /// Name of the cookie carrying the CSRF token.
    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie_name: String,
    /// Header that must echo the CSRF cookie on unsafe requests.
    #[serde(default = "default_csrf_header")]
    pub csrf_header_name: String,
    /// Whether CSRF double-submit checking is enforced.
    #[serde(default = "default_true")]
    pub csrf_enabled: bool,
    /// Mark cookies `Secure` (HTTPS only).
    #[serde(default)]
    pub secure_cookies: bool,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl(),
            session_cookie_name: default_session_cookie(),
            csrf_cookie_name: default_csrf_cookie(),
            csrf_header_name: default_csrf_header(),
            csrf_enabled: true,
            secure_cookies: false,
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
        }
    }
}

/// Password-reset code configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetConfig {
    /// Minutes a code stays valid after being sent.
    #[serde(default = "default_code_ttl")]
    pub code_ttl_minutes: i64,
    /// Mismatched verifications allowed before the code is locked.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: default_code_ttl(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_session_ttl() -> i64 {
    24
}

fn default_session_cookie() -> String {
    "sessionid".to_string()
}

fn default_csrf_cookie() -> String {
    "csrftoken".to_string()
}

fn default_csrf_header() -> String {
    "x-csrftoken".to_string()
}

fn default_true() -> bool {
    true
}

fn default_password_min() -> usize {
    6
}

fn default_password_max() -> usize {
    128
}

fn default_code_ttl() -> i64 {
    10
}

fn default_max_attempts() -> i32 {
    5
}
