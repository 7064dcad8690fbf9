//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product entity as persisted in the catalog document.
///
/// `id` is assigned once at creation and never reused or mutated.
/// Field names on the wire (and on disk) are camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub description: String,
    /// Relative reference to an uploaded asset; the image store owns the bytes
    pub image_filename: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Stamped on every mutation, absent until the first update
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Submitted product fields, as extracted from a multipart form.
///
/// Everything is optional and unparsed: the validator decides which fields
/// are required (all on create, only the present ones on update) and whether
/// `price` parses to an acceptable number.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    /// Filename assigned by the image store for an uploaded image, if any
    pub image_filename: Option<String>,
}

/// Product as returned by the API: the record plus the derived `imageUrl`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Product {
        Product {
            id: 1700000000000,
            name: "Honeycrisp Apples".to_string(),
            brand: "Orchard Lane".to_string(),
            category: "Fruit".to_string(),
            price: 3.5,
            description: "Crisp and sweet".to_string(),
            image_filename: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn product_serializes_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("imageFilename").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("image_filename").is_none());
    }

    #[test]
    fn product_view_flattens_record() {
        let view = ProductView {
            product: sample(),
            image_url: Some("http://localhost:4000/public/images/1.png".to_string()),
        };
        let value = serde_json::to_value(view).unwrap();
        assert_eq!(value["name"], "Honeycrisp Apples");
        assert_eq!(
            value["imageUrl"],
            "http://localhost:4000/public/images/1.png"
        );
    }
}
