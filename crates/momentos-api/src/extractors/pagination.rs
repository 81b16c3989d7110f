//! Pagination query parameter extractor.

use serde::Deserialize;

use momentos_core::types::pagination::PageRequest;

/// Query parameters for paginated endpoints.
///
/// Both values are optional; each endpoint supplies its own default size.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

impl PaginationParams {
    /// Converts to a `PageRequest`, falling back to `default_size` and
    /// capping the size at `max_size`.
    pub fn into_page_request(self, default_size: u64, max_size: u64) -> PageRequest {
        let size = self
            .page_size
            .unwrap_or(default_size)
            .clamp(1, max_size.max(1));
        PageRequest::new(self.page.unwrap_or(1), size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        let page = PaginationParams::default().into_page_request(5, 50);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 5);
    }

    #[test]
    fn size_is_capped() {
        let params = PaginationParams {
            page: Some(2),
            page_size: Some(500),
        };
        let page = params.into_page_request(9, 50);
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 50);
    }
}
