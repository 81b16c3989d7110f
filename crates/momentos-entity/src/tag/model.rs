//! Tag entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Longest accepted tag name, in characters.
pub const MAX_TAG_LENGTH: usize = 50;

/// A label attached to moments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Unique tag identifier.
    pub id: Uuid,
    /// Lowercase, trimmed name.
    pub name: String,
    /// URL form of the name.
    pub slug: String,
}

/// A normalized tag name with its slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName {
    /// Lowercase, trimmed name.
    pub name: String,
    /// Name with spaces replaced by `-`. Accented letters are kept, so tag
    /// URLs may carry percent-encoded non-ASCII characters.
    pub slug: String,
}

impl TagName {
    /// Normalize raw user input. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }
        let slug = name.split_whitespace().collect::<Vec<_>>().join("-");
        Some(Self { name, slug })
    }

    /// Normalize a list, dropping blanks and duplicates while keeping order.
    pub fn parse_all<I, S>(raw: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<Self> = Vec::new();
        for tag in raw.into_iter().filter_map(|r| Self::parse(r.as_ref())) {
            if !out.iter().any(|t| t.name == tag.name) {
                out.push(tag);
            }
        }
        out
    }

    /// Whether the name fits the column.
    pub fn is_valid_length(&self) -> bool {
        self.name.chars().count() <= MAX_TAG_LENGTH
    }
}
