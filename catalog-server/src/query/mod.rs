//! Listing query engine
//!
//! Runs the product listing pipeline in strict order:
//! filter → search → sort → paginate. Shaping (the derived `imageUrl`) is
//! applied afterwards by the handler.
//!
//! The sort uses `slice::sort_by`, which is stable: records that compare
//! equal keep their catalog order, so page contents are deterministic for a
//! fixed sort.

use shared::models::Product;
use shared::query::{ListParams, Pagination};

use crate::utils::FieldErrors;

/// Default page size of the listing endpoint
pub const DEFAULT_LIMIT: i64 = 5;

/// Sortable columns. Unknown `_sort` values fall back to `Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Name,
    Brand,
    Category,
    Price,
    CreatedAt,
}

impl SortColumn {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("name") => Self::Name,
            Some("brand") => Self::Brand,
            Some("category") => Self::Category,
            Some("price") => Self::Price,
            Some("createdAt") => Self::CreatedAt,
            _ => Self::Id,
        }
    }
}

/// Sort direction, default descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(|r| r.to_lowercase()).as_deref() {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }
}

fn compare(a: &Product, b: &Product, column: SortColumn) -> std::cmp::Ordering {
    match column {
        // Numeric columns
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::Price => a.price.total_cmp(&b.price),
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        // Case-insensitive string columns
        SortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortColumn::Brand => a.brand.to_lowercase().cmp(&b.brand.to_lowercase()),
        SortColumn::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
    }
}

fn matches_search(product: &Product, term: &str) -> bool {
    product.name.to_lowercase().contains(term)
        || product.brand.to_lowercase().contains(term)
        || product.category.to_lowercase().contains(term)
        || product.description.to_lowercase().contains(term)
}

/// Run the listing pipeline over a catalog snapshot.
///
/// Returns the requested page plus pagination metadata, or a field-keyed
/// error map when the paging parameters are out of range (`_page` and
/// `_limit` must both be >= 1; `_limit=0` is rejected rather than treated
/// as "no pagination").
///
/// An out-of-range page is not an error: it yields an empty page with
/// `currentPage` unchanged.
pub fn run(products: &[Product], params: &ListParams) -> Result<(Vec<Product>, Pagination), FieldErrors> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

    let mut errors = FieldErrors::new();
    if page < 1 {
        errors.insert("_page".to_string(), "Page must be at least 1".to_string());
    }
    if limit < 1 {
        errors.insert("_limit".to_string(), "Limit must be at least 1".to_string());
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    // 1. Filter: case-insensitive exact match on category/brand
    let category = params.category.as_ref().map(|c| c.to_lowercase());
    let brand = params.brand.as_ref().map(|b| b.to_lowercase());

    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| {
            category
                .as_ref()
                .is_none_or(|c| p.category.to_lowercase() == *c)
        })
        .filter(|p| brand.as_ref().is_none_or(|b| p.brand.to_lowercase() == *b))
        .collect();

    // 2. Search: case-insensitive substring over the text fields
    if let Some(term) = params.search.as_ref().map(|s| s.to_lowercase())
        && !term.is_empty()
    {
        matched.retain(|p| matches_search(p, &term));
    }

    // 3. Sort (stable)
    let column = SortColumn::parse(params.sort.as_deref());
    let order = SortOrder::parse(params.order.as_deref());
    matched.sort_by(|a, b| {
        let ord = compare(a, b, column);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    // 4. Paginate: total counts are post-filter, pre-slice
    let total = matched.len() as i64;
    let pagination = Pagination::new(page, limit, total);

    // Clamp the start index without overflowing on extreme page/limit values
    let start = (page - 1)
        .checked_mul(limit)
        .map_or(total, |s| s.min(total)) as usize;
    let page_items: Vec<Product> = matched
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect();

    Ok((page_items, pagination))
}
