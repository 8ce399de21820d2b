//! Catalog rows and insert payloads.
//!
//! `Category` and `Product` mirror the two catalog tables one-to-one.
//! `NewCategory` / `NewProduct` are what the shell hands to a
//! [`CatalogStore`](crate::store::CatalogStore) for inserts; both are
//! validated before any store call so a rejected payload never reaches the
//! database.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Store-assigned row identifier (PostgreSQL `SERIAL`)
pub type RowId = i32;

/// Total digits of a stored unit price
pub const PRICE_PRECISION: u32 = 12;

/// Decimal places of a stored unit price
pub const PRICE_SCALE: u32 = 2;

/// A product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: RowId,
    pub name: String,
    pub description: Option<String>,
}

/// A stocked product
///
/// `category_id` is a weak reference: it may point at a category that no
/// longer exists in the snapshot being rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: RowId,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub category_id: Option<RowId>,
}

/// Insert payload for a category
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Rejects blank names.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` describing the first violation.
    pub fn validate(&self) -> Result<(), StoreError> {
        require_name("category", &self.name)
    }
}

/// Insert payload for a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub category_id: Option<RowId>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into(),
            description: None,
            unit_price,
            quantity,
            category_id: None,
        }
    }

    pub fn in_category(mut self, category_id: RowId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Rejects blank names and prices the `NUMERIC(12,2)` column can't hold
    /// exactly: negative, more than two decimal places, or too large.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` describing the first violation.
    pub fn validate(&self) -> Result<(), StoreError> {
        require_name("product", &self.name)?;
        let price = self.unit_price;
        if price < Decimal::ZERO {
            return Err(StoreError::Validation(format!(
                "product unit price must not be negative, got {price}"
            )));
        }
        // trailing zeros don't count: 3.500 is stored as 3.50
        if price.normalize().scale() > PRICE_SCALE {
            return Err(StoreError::Validation(format!(
                "product unit price must have at most {PRICE_SCALE} decimal places, got {price}"
            )));
        }
        if price >= Decimal::from(10_i64.pow(PRICE_PRECISION - PRICE_SCALE)) {
            return Err(StoreError::Validation(format!(
                "product unit price must have at most {} integer digits, got {price}",
                PRICE_PRECISION - PRICE_SCALE
            )));
        }
        Ok(())
    }
}

fn require_name(kind: &str, name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation(format!("{kind} name must not be empty")));
    }
    Ok(())
}

/// Full copy of both tables taken at one point in time
///
/// Every aggregation and every render works from a snapshot; nothing is
/// cached between shell actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl Snapshot {
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            categories,
            products,
        }
    }

    pub fn product(&self, id: RowId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Case-insensitive lookup by category name
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        let wanted = name.trim().to_lowercase();
        self.categories
            .iter()
            .find(|c| c.name.trim().to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_rejects_blank_name() {
        let err = NewProduct::new("   ", Decimal::new(100, 2), 1).validate().unwrap_err();
        assert!(err.to_string().contains("product name must not be empty"));
    }

    #[test]
    fn test_new_product_rejects_negative_price() {
        let err = NewProduct::new("Mleko", Decimal::new(-1, 2), 1).validate().unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_new_product_rejects_sub_cent_price() {
        let err = NewProduct::new("Gwóźdź", Decimal::new(5, 3), 1).validate().unwrap_err();
        assert!(err.to_string().contains("decimal places"));
        // scale alone isn't the test, the value is
        assert!(NewProduct::new("Cukier", Decimal::new(3100, 3), 1).validate().is_ok());
    }

    #[test]
    fn test_new_product_rejects_price_beyond_column_range() {
        assert!(NewProduct::new("Sejf", Decimal::new(999_999_999_999, 2), 1).validate().is_ok());
        let err = NewProduct::new("Sejf", Decimal::from(10_000_000_000_i64), 1).validate().unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_new_product_accepts_zero_price() {
        assert!(NewProduct::new("Gratis", Decimal::ZERO, 0).validate().is_ok());
    }

    #[test]
    fn test_new_category_validation() {
        assert!(NewCategory::new("Nabiał").validate().is_ok());
        assert!(NewCategory::new("").validate().is_err());
    }

    #[test]
    fn test_snapshot_category_by_name_is_case_insensitive() {
        let snapshot = Snapshot::new(
            vec![Category {
                id: 3,
                name: "Pieczywo".into(),
                description: None,
            }],
            vec![],
        );
        assert_eq!(snapshot.category_by_name(" pieczywo ").map(|c| c.id), Some(3));
        assert!(snapshot.category_by_name("Nabiał").is_none());
    }
}
