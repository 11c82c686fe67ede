//! Pagination and filtering query parameters.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::config::MAX_PAGE_SIZE;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub page_size: u32,
    pub offset: i64,
    pub limit: i64,
}

impl PaginationParams {
    /// Validates pagination parameters and converts them to offset/limit.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: `default_page_size`
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 1 and 100
    pub fn window(&self, default_page_size: u32) -> Result<PageWindow, String> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(default_page_size);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(format!("Page size must be between 1 and {MAX_PAGE_SIZE}"));
        }

        Ok(PageWindow {
            page,
            page_size,
            offset: i64::from(page - 1) * i64::from(page_size),
            limit: i64::from(page_size),
        })
    }
}

/// Query parameters of entry listings.
#[derive(Debug, Deserialize)]
pub struct EntryListParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    pub tag: Option<String>,

    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

/// Pagination metadata for responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(window: PageWindow, total_items: i64) -> Self {
        let page_size = i64::from(window.page_size);
        let total_pages = (total_items.max(0) + page_size - 1) / page_size;

        Self {
            page: window.page,
            page_size: window.page_size,
            total_items,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<u32>, page_size: Option<u32>) -> PaginationParams {
        PaginationParams { page, page_size }
    }

    #[test]
    fn test_defaults() {
        let window = params(None, None).window(10).unwrap();
        assert_eq!(window.offset, 0);
        assert_eq!(window.limit, 10);
        assert_eq!(window.page, 1);
    }

    #[test]
    fn test_page_2_with_default_size() {
        let window = params(Some(2), None).window(10).unwrap();
        assert_eq!(window.offset, 10);
        assert_eq!(window.limit, 10);
    }

    #[test]
    fn test_custom_page_and_size() {
        let window = params(Some(3), Some(50)).window(10).unwrap();
        assert_eq!(window.offset, 100);
        assert_eq!(window.limit, 50);
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params(Some(0), None).window(10).is_err());
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(params(None, Some(0)).window(10).is_err());
        assert!(params(None, Some(1)).window(10).is_ok());
        assert!(params(None, Some(MAX_PAGE_SIZE)).window(10).is_ok());
        assert!(params(None, Some(MAX_PAGE_SIZE + 1)).window(10).is_err());
    }

    #[test]
    fn test_list_params_from_query_strings() {
        let p: EntryListParams =
            serde_json::from_str(r#"{"page": "2", "page_size": "5", "tag": "rust", "type": "link"}"#)
                .unwrap();
        assert_eq!(p.pagination.page, Some(2));
        assert_eq!(p.pagination.page_size, Some(5));
        assert_eq!(p.tag.as_deref(), Some("rust"));
        assert_eq!(p.entry_type.as_deref(), Some("link"));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let window = params(None, Some(10)).window(10).unwrap();
        assert_eq!(PaginationMeta::new(window, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(window, 10).total_pages, 1);
        assert_eq!(PaginationMeta::new(window, 11).total_pages, 2);
    }
}
