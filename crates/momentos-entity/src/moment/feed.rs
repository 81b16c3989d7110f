//! Feed filters and sort modes.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order applied to a feed listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    /// Newest first.
    #[default]
    Recent,
    /// Most viewed first.
    Popular,
    /// Most liked first, then most viewed, then newest.
    Trending,
}

impl FeedSort {
    /// Parse a `sort` query value. Unknown or missing values mean [`FeedSort::Recent`].
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("popular") => Self::Popular,
            Some("trending") => Self::Trending,
            _ => Self::Recent,
        }
    }

    /// `ORDER BY` clause for a query aliasing moments as `m` and exposing
    /// a `total_likes` column. The trailing `m.id` keeps paging stable.
    pub fn order_by_sql(&self) -> &'static str {
        match self {
            Self::Recent => "m.created_at DESC, m.id DESC",
            Self::Popular => "m.views DESC, m.created_at DESC, m.id DESC",
            Self::Trending => "total_likes DESC, m.views DESC, m.created_at DESC, m.id DESC",
        }
    }

    /// Return the sort mode as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Popular => "popular",
            Self::Trending => "trending",
        }
    }
}

impl fmt::Display for FeedSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Filters applied to a feed listing.
#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    /// Only moments carrying the tag with this slug.
    pub tag_slug: Option<String>,
    /// Only moments owned by this username.
    pub owner_username: Option<String>,
    /// Case-insensitive substring on title, description or tag name.
    pub search: Option<String>,
    /// The requesting user, used for visibility and `is_liked`.
    pub viewer: Option<Uuid>,
    /// Sort order.
    pub sort: FeedSort,
}

impl FeedFilter {
    /// Drop blank filter values so they do not constrain the query.
    pub fn normalized(mut self) -> Self {
        fn clean(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        self.tag_slug = clean(self.tag_slug).map(|s| s.to_lowercase());
        self.owner_username = clean(self.owner_username);
        self.search = clean(self.search);
        self
    }

    /// `ILIKE` pattern for the search term with wildcards escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(like_pattern)
    }
}

/// Wrap `term` in `%...%`, escaping `LIKE` metacharacters.
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_falls_back_to_recent() {
        assert_eq!(FeedSort::from_query(None), FeedSort::Recent);
        assert_eq!(FeedSort::from_query(Some("oldest")), FeedSort::Recent);
        assert_eq!(FeedSort::from_query(Some("Trending")), FeedSort::Trending);
        assert_eq!(FeedSort::from_query(Some("popular")), FeedSort::Popular);
    }

    #[test]
    fn trending_breaks_ties_by_views_then_recency() {
        let sql = FeedSort::Trending.order_by_sql();
        let likes = sql.find("total_likes").unwrap();
        let views = sql.find("m.views").unwrap();
        let created = sql.find("m.created_at").unwrap();
        assert!(likes < views && views < created);
    }

    #[test]
    fn popular_orders_by_views() {
        assert!(FeedSort::Popular.order_by_sql().starts_with("m.views DESC"));
    }

    #[test]
    fn normalized_drops_blanks() {
        let filter = FeedFilter {
            tag_slug: Some("  Praia ".into()),
            owner_username: Some("   ".into()),
            search: Some("".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(filter.tag_slug.as_deref(), Some("praia"));
        assert!(filter.owner_username.is_none());
        assert!(filter.search.is_none());
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("sol"), "%sol%");
    }
}
