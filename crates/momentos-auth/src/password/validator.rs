//! Password policy enforcement for new passwords.

use momentos_core::config::AuthConfig;
use momentos_core::error::AppError;

/// Rules a new password must satisfy.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
    max_length: usize,
}

impl PasswordPolicy {
    /// Build the policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length,
        }
    }

    /// Validate `password` for the account identified by `username` and `email`.
    ///
    /// Errors are field errors on `field` so the client can highlight the input.
    pub fn validate(
        &self,
        field: &str,
        password: &str,
        username: &str,
        email: &str,
    ) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < self.min_length {
            return Err(AppError::field(
                field,
                format!(
                    "Password must be at least {} characters long",
                    self.min_length
                ),
            ));
        }
        if length > self.max_length {
            return Err(AppError::field(
                field,
                format!("Password must be at most {} characters long", self.max_length),
            ));
        }
        if password.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::field(field, "Password cannot be entirely numeric"));
        }

        let lowered = password.to_lowercase();
        let local_part = email.split('@').next().unwrap_or_default().to_lowercase();
        if lowered == username.to_lowercase() || (!local_part.is_empty() && lowered == local_part)
        {
            return Err(AppError::field(
                field,
                "Password is too similar to the username or email",
            ));
        }

        Ok(())
    }
}
