//! Password-reset code state machine.
//!
//! A user is in one of three states: no code on record, a live code, or a
//! code that is expired or locked. [`ResetCodeState::check`] decides what a
//! submitted code means without touching storage; the caller persists the
//! returned [`ResetOutcome`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Reset fields as stored on the user row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetCodeState {
    /// The outstanding 6-digit code.
    pub code: Option<String>,
    /// When the code was sent.
    pub sent_at: Option<DateTime<Utc>>,
    /// Mismatched attempts so far.
    pub attempts: i32,
}

/// Limits applied to a reset code.
#[derive(Debug, Clone, Copy)]
pub struct ResetPolicy {
    /// How long a code stays valid.
    pub ttl: Duration,
    /// Mismatches allowed before the code stops working.
    pub max_attempts: i32,
}

impl ResetPolicy {
    /// Build a policy from minutes and attempts.
    pub fn new(ttl_minutes: i64, max_attempts: i32) -> Self {
        Self {
            ttl: Duration::minutes(ttl_minutes),
            max_attempts,
        }
    }
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self::new(10, 5)
    }
}

/// Result of checking a submitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The code matches and is live. Attempts must be reset to zero.
    Valid,
    /// No code has been requested.
    NoCode,
    /// The code is older than the policy allows. State must be cleared.
    Expired,
    /// Too many mismatches. State is kept until a new code is requested.
    Locked,
    /// Wrong code. Attempts must be incremented.
    Mismatch {
        /// Attempts left after this one.
        remaining: i32,
    },
}

impl ResetCodeState {
    /// Decide what `submitted` means at `now`.
    ///
    /// Expiry is checked before the attempt lock so that a stale, locked
    /// code is cleared rather than left locked forever.
    pub fn check(&self, submitted: &str, now: DateTime<Utc>, policy: &ResetPolicy) -> ResetOutcome {
        let (Some(code), Some(sent_at)) = (self.code.as_deref(), self.sent_at) else {
            return ResetOutcome::NoCode;
        };

        if now - sent_at > policy.ttl {
            return ResetOutcome::Expired;
        }

        if self.attempts >= policy.max_attempts {
            return ResetOutcome::Locked;
        }

        if code == submitted.trim() {
            ResetOutcome::Valid
        } else {
            ResetOutcome::Mismatch {
                remaining: (policy.max_attempts - self.attempts - 1).max(0),
            }
        }
    }
}
