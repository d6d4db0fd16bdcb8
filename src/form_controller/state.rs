//! Form state, the create/edit mode machine, and local validation.

use crate::model::{Product, ProductDraft, ProductFields};

/// Which form the modal is showing, if any.
///
/// Exactly one variant holds at a time; `Edit` always carries the full
/// prior snapshot of the product being edited.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormMode {
    #[default]
    Closed,
    Create,
    Edit(Product),
}

/// A validation failure tied to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Transient state owned by the form controller.
///
/// Created fresh on every modal open and discarded on close or successful
/// submit. `submitting` guards against duplicate concurrent submits.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub mode: FormMode,
    pub draft: ProductDraft,
    pub field_errors: Vec<FieldError>,
    pub submitting: bool,
}

impl FormState {
    pub fn open_create() -> Self {
        Self {
            mode: FormMode::Create,
            ..Self::default()
        }
    }

    pub fn open_edit(product: Product) -> Self {
        Self {
            draft: ProductDraft::from_product(&product),
            mode: FormMode::Edit(product),
            ..Self::default()
        }
    }
}

/// Validates a draft into the payload sent to the gateway.
///
/// Rules (matching the form's required fields): `title` present and
/// non-empty after trimming, `price` present, finite, and non-negative.
/// All violations are reported at once as field-level errors.
pub fn validate(draft: &ProductDraft) -> Result<ProductFields, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = match draft.title.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => Some(draft.title.clone().unwrap_or_default()),
        _ => {
            errors.push(FieldError::new("title", "Product title is required"));
            None
        }
    };

    let price = match draft.price {
        Some(p) if p.is_finite() && p >= 0.0 => Some(p),
        Some(_) => {
            errors.push(FieldError::new("price", "Price must be a non-negative number"));
            None
        }
        None => {
            errors.push(FieldError::new("price", "Price is required"));
            None
        }
    };

    match (title, price) {
        (Some(title), Some(price)) if errors.is_empty() => Ok(ProductFields {
            title,
            price,
            description: draft.description.clone(),
            category: draft.category.clone(),
            image_url: draft.image_url.clone(),
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: Option<&str>, price: Option<f64>) -> ProductDraft {
        ProductDraft {
            title: title.map(str::to_string),
            price,
            ..ProductDraft::default()
        }
    }

    #[test]
    fn valid_draft_produces_the_full_payload() {
        let mut d = draft(Some("Deck Jacket"), Some(120.0));
        d.category = Some("outerwear".to_string());

        let fields = validate(&d).unwrap();
        assert_eq!(fields.title, "Deck Jacket");
        assert_eq!(fields.price, 120.0);
        assert_eq!(fields.category.as_deref(), Some("outerwear"));
    }

    #[test]
    fn empty_or_blank_title_is_rejected() {
        for d in [draft(None, Some(5.0)), draft(Some("   "), Some(5.0))] {
            let errors = validate(&d).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "title");
        }
    }

    #[test]
    fn negative_and_missing_price_are_rejected() {
        let errors = validate(&draft(Some("X"), Some(-1.0))).unwrap_err();
        assert_eq!(errors[0].field, "price");

        let errors = validate(&draft(Some("X"), None)).unwrap_err();
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn zero_price_is_allowed() {
        assert!(validate(&draft(Some("Freebie"), Some(0.0))).is_ok());
    }

    #[test]
    fn all_violations_are_reported_together() {
        let errors = validate(&draft(None, Some(f64::NAN))).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "price"]);
    }

    #[test]
    fn open_edit_seeds_the_draft_from_the_target() {
        let product = Product::new("product_9", "Scarf", 30.0);
        let state = FormState::open_edit(product.clone());

        assert_eq!(state.mode, FormMode::Edit(product));
        assert_eq!(state.draft.title.as_deref(), Some("Scarf"));
        assert!(!state.submitting);
        assert!(state.field_errors.is_empty());
    }
}
