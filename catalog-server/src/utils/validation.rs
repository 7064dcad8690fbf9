//! Product validation
//!
//! Pure field checks over a submitted [`ProductDraft`]. All violations are
//! collected into a [`FieldErrors`] map instead of short-circuiting, so a
//! client sees every problem at once. An empty map means the draft is
//! acceptable.

use shared::models::ProductDraft;

use crate::utils::FieldErrors;

/// Which fields the validator demands.
///
/// Creation requires the full set; updates only check the fields the request
/// actually carries (partial-merge semantics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

/// Parse a submitted price string. Returns None for non-numeric input.
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

fn check_required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&String>,
    mode: ValidationMode,
    message: &str,
) {
    match value {
        Some(v) if v.trim().is_empty() => {
            errors.insert(field.to_string(), message.to_string());
        }
        None if mode == ValidationMode::Create => {
            errors.insert(field.to_string(), message.to_string());
        }
        _ => {}
    }
}

/// Validate a product draft.
///
/// Rules (all independent):
/// - `name`, `brand`, `category`, `description` must be non-empty after trim
/// - `price` must be present, numeric and >= 1
pub fn validate_product(draft: &ProductDraft, mode: ValidationMode) -> FieldErrors {
    let mut errors = FieldErrors::new();

    check_required_text(&mut errors, "name", draft.name.as_ref(), mode, "Name is required");
    check_required_text(&mut errors, "brand", draft.brand.as_ref(), mode, "Brand is required");
    check_required_text(
        &mut errors,
        "category",
        draft.category.as_ref(),
        mode,
        "Category is required",
    );
    check_required_text(
        &mut errors,
        "description",
        draft.description.as_ref(),
        mode,
        "Description is required",
    );

    match draft.price.as_deref() {
        Some(raw) => match parse_price(raw) {
            Some(price) if price < 1.0 => {
                errors.insert("price".to_string(), "Price must be at least 1".to_string());
            }
            Some(_) => {}
            None => {
                errors.insert("price".to_string(), "Price must be a number".to_string());
            }
        },
        None if mode == ValidationMode::Create => {
            errors.insert("price".to_string(), "Price is required".to_string());
        }
        None => {}
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> ProductDraft {
        ProductDraft {
            name: Some("Honeycrisp Apples".to_string()),
            brand: Some("Orchard Lane".to_string()),
            category: Some("Fruit".to_string()),
            price: Some("3.50".to_string()),
            description: Some("Crisp and sweet".to_string()),
            image_filename: None,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(validate_product(&full_draft(), ValidationMode::Create).is_empty());
    }

    #[test]
    fn empty_name_and_low_price_collects_both() {
        let mut draft = full_draft();
        draft.name = Some("".to_string());
        draft.price = Some("0".to_string());

        let errors = validate_product(&draft, ValidationMode::Create);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["name"], "Name is required");
        assert_eq!(errors["price"], "Price must be at least 1");
    }

    #[test]
    fn create_requires_all_fields() {
        let errors = validate_product(&ProductDraft::default(), ValidationMode::Create);
        for field in ["name", "brand", "category", "price", "description"] {
            assert!(errors.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn update_checks_only_present_fields() {
        let draft = ProductDraft {
            price: Some("12".to_string()),
            ..Default::default()
        };
        assert!(validate_product(&draft, ValidationMode::Update).is_empty());

        let draft = ProductDraft {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        let errors = validate_product(&draft, ValidationMode::Update);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("name"));
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let mut draft = full_draft();
        draft.price = Some("free".to_string());
        let errors = validate_product(&draft, ValidationMode::Create);
        assert_eq!(errors["price"], "Price must be a number");
    }

    #[test]
    fn whitespace_price_parses_after_trim() {
        assert_eq!(parse_price(" 2.5 "), Some(2.5));
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("inf"), None);
    }
}
