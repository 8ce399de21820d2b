//! Per-product stock status and quantity arithmetic.

use serde::Serialize;
use std::fmt;

use super::settings::{InventorySettings, LOW_STOCK_THRESHOLD};
use crate::model::Product;

/// Stock status of a single product
///
/// Variants are declared in ascending severity, so the derived `Ord` sorts
/// `OutOfStock` last and `max()` picks the most urgent status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Classify a raw quantity against `threshold`
    pub fn for_quantity(quantity: u32, threshold: u32) -> Self {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity < threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Stable label used in serialized output and CSV exports
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "IN_STOCK",
            StockStatus::LowStock => "LOW_STOCK",
            StockStatus::OutOfStock => "OUT_OF_STOCK",
        }
    }

    pub fn needs_reorder(&self) -> bool {
        !matches!(self, StockStatus::InStock)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status of `product` under the default threshold
pub fn classify_status(product: &Product) -> StockStatus {
    StockStatus::for_quantity(product.quantity, LOW_STOCK_THRESHOLD)
}

/// New quantity after applying `delta`, clamped at zero
///
/// Decrementing past zero is silently absorbed. The upper end saturates at
/// `u32::MAX`, which the store column can't reach anyway.
pub fn adjust_quantity(product: &Product, delta: i64) -> u32 {
    let next = i64::from(product.quantity).saturating_add(delta);
    // clamp keeps the value inside u32, so the cast is lossless
    next.clamp(0, i64::from(u32::MAX)) as u32
}

/// Names of products with `quantity < threshold`, in input order
///
/// Membership is decided by [`StockStatus::needs_reorder`], so the list always
/// agrees with the status badge; an empty product is listed even when
/// `threshold` is zero.
pub fn low_stock_list(products: &[Product], threshold: u32) -> Vec<&str> {
    products
        .iter()
        .filter(|p| StockStatus::for_quantity(p.quantity, threshold).needs_reorder())
        .map(|p| p.name.as_str())
        .collect()
}

impl InventorySettings {
    pub fn classify(&self, product: &Product) -> StockStatus {
        StockStatus::for_quantity(product.quantity, self.low_stock_threshold())
    }

    pub fn low_stock_list<'a>(&self, products: &'a [Product]) -> Vec<&'a str> {
        low_stock_list(products, self.low_stock_threshold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers;

    fn product(name: &str, quantity: u32) -> Product {
        test_helpers::product(1, name, "1.00", quantity)
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify_status(&product("a", 0)), StockStatus::OutOfStock);
        for q in 1..5 {
            assert_eq!(classify_status(&product("a", q)), StockStatus::LowStock, "quantity {q}");
        }
        assert_eq!(classify_status(&product("a", 5)), StockStatus::InStock);
        assert_eq!(classify_status(&product("a", 500)), StockStatus::InStock);
    }

    #[test]
    fn test_severity_order() {
        assert!(StockStatus::OutOfStock > StockStatus::LowStock);
        assert!(StockStatus::LowStock > StockStatus::InStock);
        let worst = [StockStatus::LowStock, StockStatus::OutOfStock, StockStatus::InStock]
            .into_iter()
            .max();
        assert_eq!(worst, Some(StockStatus::OutOfStock));
    }

    #[test]
    fn test_adjust_quantity_clamps_at_zero() {
        assert_eq!(adjust_quantity(&product("a", 0), -1), 0);
        assert_eq!(adjust_quantity(&product("a", 3), -10), 0);
        assert_eq!(adjust_quantity(&product("a", 3), -1), 2);
        assert_eq!(adjust_quantity(&product("a", 3), 1), 4);
        assert_eq!(adjust_quantity(&product("a", 3), i64::MIN), 0);
        assert_eq!(adjust_quantity(&product("a", u32::MAX), 1), u32::MAX);
    }

    #[test]
    fn test_low_stock_list_preserves_order() {
        let products = vec![
            product("Mleko", 0),
            product("Ser", 10),
            product("Chleb", 3),
            product("Masło", 5),
            product("Jajka", 4),
        ];
        assert_eq!(low_stock_list(&products, 5), vec!["Mleko", "Chleb", "Jajka"]);
    }

    #[test]
    fn test_zero_threshold_still_lists_empty_products() {
        let products = vec![product("Mleko", 0), product("Ser", 1)];
        assert_eq!(StockStatus::for_quantity(0, 0), StockStatus::OutOfStock);
        assert_eq!(low_stock_list(&products, 0), vec!["Mleko"]);
    }

    #[test]
    fn test_settings_share_threshold_between_status_and_reorder_list() {
        let settings = InventorySettings::new(1000, 10).unwrap();
        let products = vec![product("Kawa", 7)];
        assert_eq!(settings.classify(&products[0]), StockStatus::LowStock);
        assert_eq!(settings.low_stock_list(&products), vec!["Kawa"]);
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"OUT_OF_STOCK\"");
        assert_eq!(StockStatus::LowStock.to_string(), "LOW_STOCK");
    }
}
