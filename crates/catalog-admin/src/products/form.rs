//! Add-product form and synthesis of local products

use crate::forms::FieldErrors;
use catalog_core::Product;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Category shown for products created locally
pub const LOCAL_CATEGORY: &str = "—";

/// Raw input of the add-product form
///
/// Values are validated after trimming surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct AddProductForm {
    /// Product title
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// Price as typed
    #[validate(
        length(min = 1, message = "Price is required"),
        custom(function = "validate_positive_price")
    )]
    pub price: String,

    /// Brand (vendor)
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,

    /// Stock keeping unit
    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,
}

/// Which input of the add-product form a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddProductField {
    /// Title input
    Title,
    /// Price input
    Price,
    /// Brand input
    Brand,
    /// SKU input
    Sku,
}

/// Empty prices are reported by the `length` rule instead
fn validate_positive_price(price: &str) -> Result<(), ValidationError> {
    if price.is_empty() {
        return Ok(());
    }
    match price.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(()),
        _ => {
            let mut error = ValidationError::new("price_positive");
            error.message = Some(Cow::Borrowed("Price must be greater than 0"));
            Err(error)
        }
    }
}

impl AddProductForm {
    /// Create a form from raw values
    pub fn new(
        title: impl Into<String>,
        price: impl Into<String>,
        brand: impl Into<String>,
        sku: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
            brand: brand.into(),
            sku: sku.into(),
        }
    }

    /// Replace one input's value
    pub fn set(&mut self, field: AddProductField, value: impl Into<String>) {
        let slot = match field {
            AddProductField::Title => &mut self.title,
            AddProductField::Price => &mut self.price,
            AddProductField::Brand => &mut self.brand,
            AddProductField::Sku => &mut self.sku,
        };
        *slot = value.into();
    }

    fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            price: self.price.trim().to_string(),
            brand: self.brand.trim().to_string(),
            sku: self.sku.trim().to_string(),
        }
    }

    /// Validate and convert into a product with the given id
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any input is invalid.
    pub fn into_product(&self, id: u64) -> Result<Product, FieldErrors> {
        let form = self.trimmed();
        form.validate().map_err(|e| FieldErrors::from(&e))?;

        let price = form.price.parse::<f64>().map_err(|_| {
            let mut errors = FieldErrors::new();
            errors.insert("price", "Price must be greater than 0");
            errors
        })?;

        Ok(Product {
            id,
            title: form.title,
            price,
            rating: 0.0,
            brand: Some(form.brand),
            sku: Some(form.sku),
            category: Some(LOCAL_CATEGORY.to_string()),
            thumbnail: None,
        })
    }
}

/// Issues ids for local products from the wall clock
///
/// Ids are milliseconds since the Unix epoch, bumped when two products are
/// created within the same millisecond.
#[derive(Debug, Default)]
pub struct LocalIdGenerator {
    last: u64,
}

impl LocalIdGenerator {
    /// Next strictly increasing id
    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
        self.last = now.max(self.last + 1);
        self.last
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_valid_form_becomes_product() {
        let form = AddProductForm::new("  Wireless Mouse ", "1299.50", " Logi ", "LG-001");
        let product = form.into_product(42).unwrap();

        assert_eq!(product.id, 42);
        assert_eq!(product.title, "Wireless Mouse");
        assert_eq!(product.price, 1299.5);
        assert_eq!(product.rating, 0.0);
        assert_eq!(product.brand.as_deref(), Some("Logi"));
        assert_eq!(product.sku.as_deref(), Some("LG-001"));
        assert_eq!(product.category.as_deref(), Some(LOCAL_CATEGORY));
        assert!(product.thumbnail.is_none());
    }

    #[rstest]
    #[case::negative("-5", "Price must be greater than 0")]
    #[case::zero("0", "Price must be greater than 0")]
    #[case::not_a_number("abc", "Price must be greater than 0")]
    #[case::comma_decimal("12,5", "Price must be greater than 0")]
    #[case::infinite("inf", "Price must be greater than 0")]
    #[case::empty("", "Price is required")]
    #[case::blank("   ", "Price is required")]
    fn test_invalid_price(#[case] price: &str, #[case] expected: &str) {
        let form = AddProductForm::new("Mouse", price, "Logi", "LG-001");
        let errors = form.into_product(1).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("price"), Some(expected));
    }

    #[test]
    fn test_empty_title_is_required() {
        let form = AddProductForm::new("", "10", "Logi", "LG-001");
        let errors = form.into_product(1).unwrap_err();

        assert_eq!(errors.get("title"), Some("Title is required"));
    }

    #[test]
    fn test_all_fields_reported_together() {
        let errors = AddProductForm::default().into_product(1).unwrap_err();

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("brand"), Some("Brand is required"));
        assert_eq!(errors.get("sku"), Some("SKU is required"));
        assert_eq!(errors.get("price"), Some("Price is required"));
    }

    #[test]
    fn test_set_replaces_single_field() {
        let mut form = AddProductForm::default();
        form.set(AddProductField::Sku, "SKU-9");

        assert_eq!(form.sku, "SKU-9");
        assert!(form.title.is_empty());
    }

    #[test]
    fn test_local_ids_strictly_increase() {
        let mut ids = LocalIdGenerator::default();
        let first = ids.next_id();
        let second = ids.next_id();
        let third = ids.next_id();

        assert!(first > 1_600_000_000_000);
        assert!(second > first);
        assert!(third > second);
    }
}
