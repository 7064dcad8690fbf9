//! List-query parameters and pagination metadata
//!
//! The parameter names mirror the public query string of the listing
//! endpoint (`_page`, `_limit`, `q`, `_sort`, `_order`, `category`, `brand`).

use serde::{Deserialize, Serialize};

use crate::models::ProductView;

/// Raw query parameters of `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// 1-based page number (default 1)
    #[serde(rename = "_page")]
    pub page: Option<i64>,
    /// Page size (default 5, must be >= 1)
    #[serde(rename = "_limit")]
    pub limit: Option<i64>,
    /// Free-text search over name, brand, category and description
    #[serde(rename = "q")]
    pub search: Option<String>,
    /// One of id | name | brand | category | price | createdAt
    #[serde(rename = "_sort")]
    pub sort: Option<String>,
    /// "asc" or "desc" (default desc)
    #[serde(rename = "_order")]
    pub order: Option<String>,
    /// Case-insensitive exact category filter
    pub category: Option<String>,
    /// Case-insensitive exact brand filter
    pub brand: Option<String>,
}

/// Pagination metadata attached to every product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_products: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub limit: i64,
}

impl Pagination {
    /// Build metadata for a page over `total` matching records.
    ///
    /// `limit` must already be validated to be >= 1. An empty result set
    /// yields `total_pages = 0` with `current_page` unchanged.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        // Ceiling division in a form that cannot overflow for huge limits
        let total_pages = if limit > 0 && total > 0 {
            (total - 1) / limit + 1
        } else {
            0
        };
        Self {
            current_page: page,
            total_pages,
            total_products: total,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
            limit,
        }
    }
}

/// One page of products plus its pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub products: Vec<ProductView>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_metadata() {
        let p = Pagination::new(2, 5, 12);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next_page);
        assert!(p.has_prev_page);

        // ceiling, not truncation
        assert_eq!(Pagination::new(1, 5, 11).total_pages, 3);
        assert_eq!(Pagination::new(1, 5, 10).total_pages, 2);

        let first = Pagination::new(1, 5, 12);
        assert!(!first.has_prev_page);

        let last = Pagination::new(3, 5, 12);
        assert!(!last.has_next_page);
    }

    #[test]
    fn pagination_survives_extreme_limits() {
        let p = Pagination::new(1, i64::MAX, 12);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next_page);

        let p = Pagination::new(i64::MAX, 5, 12);
        assert_eq!(p.total_pages, 3);
        assert!(!p.has_next_page);
        assert!(p.has_prev_page);
    }

    #[test]
    fn pagination_empty_catalog() {
        let p = Pagination::new(1, 5, 0);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.current_page, 1);
        assert!(!p.has_next_page);
        assert!(!p.has_prev_page);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let value = serde_json::to_value(Pagination::new(1, 5, 12)).unwrap();
        assert!(value.get("totalProducts").is_some());
        assert!(value.get("hasNextPage").is_some());
    }

    #[test]
    fn list_params_field_names() {
        let params: ListParams =
            serde_json::from_str(r#"{"_page": 2, "_limit": 8, "q": "apple", "_sort": "price"}"#)
                .unwrap();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.limit, Some(8));
        assert_eq!(params.search.as_deref(), Some("apple"));
        assert_eq!(params.sort.as_deref(), Some("price"));
    }
}
