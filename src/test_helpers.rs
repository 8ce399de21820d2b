//! Fixture builders shared by unit tests, `tests/` and the integration crate.
//!
//! Enabled under `cfg(test)` and with the `test-helpers` feature.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::model::{Category, NewProduct, Product, RowId};
use crate::store::{CatalogStore, StoreError};

/// Parse a decimal literal such as `"3.50"`
///
/// # Panics
///
/// Panics if `value` is not a decimal literal; fixtures only.
pub fn price(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| panic!("bad price literal {value:?}: {e}"))
}

pub fn product(id: RowId, name: &str, unit_price: &str, quantity: u32) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: None,
        unit_price: price(unit_price),
        quantity,
        category_id: None,
    }
}

pub fn category(id: RowId, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        description: None,
    }
}

/// The three-product catalog used across the crate's scenario tests:
/// milk (out of stock), bread (low), cheese (in stock)
pub fn grocery_products() -> Vec<Product> {
    vec![
        product(1, "Mleko", "3.50", 0),
        product(2, "Chleb", "4.20", 3),
        product(3, "Ser", "12.00", 10),
    ]
}

/// Insert [`grocery_products`] (without ids) into `store`
///
/// # Errors
///
/// Returns the first `StoreError` raised by the store.
pub fn seed_grocery<S: CatalogStore>(store: &S) -> Result<Vec<Product>, StoreError> {
    grocery_products()
        .into_iter()
        .map(|p| store.insert_product(&NewProduct::new(p.name, p.unit_price, p.quantity)))
        .collect()
}
