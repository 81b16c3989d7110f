//! Feed, search, and notification thresholds.

use serde::{Deserialize, Serialize};

/// Listing sizes and engagement thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Moments per feed/profile page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Largest page size a client may ask for.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Users per username-search page.
    #[serde(default = "default_user_search_page_size")]
    pub user_search_page_size: u64,
    /// Maximum related moments returned by suggestions.
    #[serde(default = "default_suggestions_limit")]
    pub suggestions_limit: i64,
    /// View count that triggers the milestone notification.
    #[serde(default = "default_view_milestone")]
    pub view_milestone: i64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            user_search_page_size: default_user_search_page_size(),
            suggestions_limit: default_suggestions_limit(),
            view_milestone: default_view_milestone(),
        }
    }
}

fn default_page_size() -> u64 {
    9
}

fn default_max_page_size() -> u64 {
    50
}

fn default_user_search_page_size() -> u64 {
    5
}

fn default_suggestions_limit() -> i64 {
    10
}

fn default_view_milestone() -> i64 {
    15
}
