//! Snapshot-wide totals.

use rust_decimal::Decimal;
use serde::Serialize;

use super::settings::{InventorySettings, DEFAULT_CAPACITY};
use crate::model::Product;

/// Totals over a product snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InventorySummary {
    pub total_quantity: u64,
    /// Σ quantity × unit_price, accumulated in `Decimal`
    pub total_value: Decimal,
    /// `total_quantity / capacity`, clamped to `[0, 1]`
    pub fill_percent: f64,
}

impl InventorySummary {
    pub fn empty() -> Self {
        Self {
            total_quantity: 0,
            total_value: Decimal::ZERO,
            fill_percent: 0.0,
        }
    }
}

/// Summary against the default capacity
pub fn compute_summary(products: &[Product]) -> InventorySummary {
    summarize(products, DEFAULT_CAPACITY)
}

fn summarize(products: &[Product], capacity: u64) -> InventorySummary {
    let mut total_quantity: u64 = 0;
    let mut total_value = Decimal::ZERO;
    for product in products {
        total_quantity = total_quantity.saturating_add(u64::from(product.quantity));
        let line = product
            .unit_price
            .saturating_mul(Decimal::from(product.quantity));
        total_value = total_value.saturating_add(line);
    }

    InventorySummary {
        total_quantity,
        total_value,
        fill_percent: fill_percent(total_quantity, capacity),
    }
}

/// Fraction of `capacity` in use, never above 1.0
///
/// A zero capacity can't come out of `InventorySettings`, but this still
/// answers 0.0 for it rather than dividing by zero.
pub fn fill_percent(total_quantity: u64, capacity: u64) -> f64 {
    if capacity == 0 || total_quantity == 0 {
        return 0.0;
    }
    if total_quantity >= capacity {
        return 1.0;
    }
    (total_quantity as f64 / capacity as f64).min(1.0)
}

impl InventorySettings {
    pub fn summarize(&self, products: &[Product]) -> InventorySummary {
        summarize(products, self.capacity())
    }
}
