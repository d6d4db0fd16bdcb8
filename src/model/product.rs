//! The managed entity and its form-side companions.
//!
//! # Wire Names
//! The external product API speaks `product_*`-prefixed field names
//! (`product_id`, `product_title`, ...). The serde renames below keep the
//! Rust side idiomatic while the gateway relays bodies verbatim.

use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// The `id` is assigned by the gateway on create and immutable afterwards.
/// `title` is non-empty and `price` is non-negative; both are enforced by
/// form validation before anything reaches the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "product_id")]
    pub id: String,
    #[serde(rename = "product_title")]
    pub title: String,
    #[serde(rename = "product_price")]
    pub price: f64,
    #[serde(rename = "product_description", default)]
    pub description: Option<String>,
    #[serde(rename = "product_category", default)]
    pub category: Option<String>,
    #[serde(rename = "product_image", default)]
    pub image_url: Option<String>,
}

impl Product {
    /// Creates a new Product instance.
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            description: None,
            category: None,
            image_url: None,
        }
    }
}

/// In-progress, unsaved form field values.
///
/// Every field is optional: an empty draft backs the create form, and
/// [`ProductDraft::from_product`] seeds the edit form from the entity
/// snapshot. Drafts are validated into [`ProductFields`] on submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

impl ProductDraft {
    /// Seeds a draft from an existing product for editing.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: Some(product.title.clone()),
            price: Some(product.price),
            description: product.description.clone(),
            category: product.category.clone(),
            image_url: product.image_url.clone(),
        }
    }
}

/// The validated payload carried by create and update requests.
///
/// Only form validation produces this type, so a `ProductFields` in hand
/// means `title` is non-empty and `price` is a finite non-negative number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductFields {
    #[serde(rename = "product_title")]
    pub title: String,
    #[serde(rename = "product_price")]
    pub price: f64,
    #[serde(rename = "product_description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "product_category", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "product_image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Truncates `text` for table display, appending an ellipsis past `max`
/// characters. Stored data is never truncated, only its rendering.
pub fn truncate_for_display(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_from_product_copies_every_field() {
        let mut product = Product::new("product_1", "Deck Jacket", 120.0);
        product.description = Some("N-1 style".to_string());
        product.category = Some("outerwear".to_string());

        let draft = ProductDraft::from_product(&product);
        assert_eq!(draft.title.as_deref(), Some("Deck Jacket"));
        assert_eq!(draft.price, Some(120.0));
        assert_eq!(draft.description.as_deref(), Some("N-1 style"));
        assert_eq!(draft.category.as_deref(), Some("outerwear"));
        assert_eq!(draft.image_url, None);
    }

    #[test]
    fn display_truncation_kicks_in_past_the_limit() {
        let short = "fits in the column";
        assert_eq!(truncate_for_display(short, 50), short);

        let long = "x".repeat(60);
        let shown = truncate_for_display(&long, 50);
        assert_eq!(shown.len(), 53);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn product_round_trips_through_wire_names() {
        let json = serde_json::json!({
            "product_id": "product_7",
            "product_title": "Widget",
            "product_price": 29.99,
            "product_category": "tools"
        });
        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.id, "product_7");
        assert_eq!(product.title, "Widget");
        assert_eq!(product.category.as_deref(), Some("tools"));
        assert_eq!(product.description, None);
    }
}
