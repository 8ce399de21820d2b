//! PostgreSQL catalog store.
//!
//! Plain parameterised SQL over a [`SqlExecutor`]. Each call is a single
//! autocommitted statement; inserts use `RETURNING` so the caller gets the
//! store-assigned id back without a second round trip.

use may_postgres::Row;
use rust_decimal::Decimal;

use super::{CatalogStore, StoreError};
use crate::executor::SqlExecutor;
use crate::metrics::instrument_store_call;
use crate::model::{Category, NewCategory, NewProduct, Product, RowId};

pub(crate) const CATEGORIES_TABLE: &str = "categories";
pub(crate) const PRODUCTS_TABLE: &str = "products";

const LIST_CATEGORIES: &str = "SELECT id, name, description FROM categories ORDER BY id";
const INSERT_CATEGORY: &str =
    "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING id, name, description";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = $1";

const LIST_PRODUCTS: &str =
    "SELECT id, name, description, unit_price, quantity, category_id FROM products ORDER BY id";
const INSERT_PRODUCT: &str = "INSERT INTO products (name, description, unit_price, quantity, category_id) \
     VALUES ($1, $2, $3, $4, $5) \
     RETURNING id, name, description, unit_price, quantity, category_id";
const UPDATE_PRODUCT_QUANTITY: &str = "UPDATE products SET quantity = $1 WHERE id = $2";
const DELETE_PRODUCT: &str = "DELETE FROM products WHERE id = $1";

/// Catalog store backed by PostgreSQL
pub struct PostgresCatalogStore<E> {
    executor: E,
}

impl<E: SqlExecutor> PostgresCatalogStore<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Create the catalog tables if they don't exist yet
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if a DDL statement fails.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        super::schema::ensure_schema(&self.executor)
    }

    fn expect_affected(&self, affected: u64, table: &'static str, id: RowId) -> Result<(), StoreError> {
        if affected == 0 {
            return Err(StoreError::NotFound { table, id });
        }
        Ok(())
    }
}

fn quantity_param(quantity: u32) -> Result<i32, StoreError> {
    i32::try_from(quantity)
        .map_err(|_| StoreError::Validation(format!("quantity {quantity} exceeds the INTEGER column range")))
}

fn decode<T>(row: &Row, column: &str) -> Result<T, StoreError>
where
    T: for<'a> may_postgres::types::FromSql<'a>,
{
    row.try_get(column)
        .map_err(|e| StoreError::InvalidRow(format!("column {column}: {e}")))
}

fn category_from_row(row: &Row) -> Result<Category, StoreError> {
    Ok(Category {
        id: decode(row, "id")?,
        name: decode(row, "name")?,
        description: decode(row, "description")?,
    })
}

fn product_from_row(row: &Row) -> Result<Product, StoreError> {
    let id: RowId = decode(row, "id")?;
    let quantity: i32 = decode(row, "quantity")?;
    let quantity = u32::try_from(quantity)
        .map_err(|_| StoreError::InvalidRow(format!("product {id} has negative quantity {quantity}")))?;
    let unit_price: Decimal = decode(row, "unit_price")?;
    Ok(Product {
        id,
        name: decode(row, "name")?,
        description: decode(row, "description")?,
        unit_price,
        quantity,
        category_id: decode(row, "category_id")?,
    })
}

impl<E: SqlExecutor> CatalogStore for PostgresCatalogStore<E> {
    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        instrument_store_call("list_categories", || {
            let rows = self.executor.query_all(LIST_CATEGORIES, &[])?;
            rows.iter().map(category_from_row).collect()
        })
    }

    fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        instrument_store_call("list_products", || {
            let rows = self.executor.query_all(LIST_PRODUCTS, &[])?;
            rows.iter().map(product_from_row).collect()
        })
    }

    fn insert_category(&self, category: &NewCategory) -> Result<Category, StoreError> {
        instrument_store_call("insert_category", || {
            category.validate()?;
            let row = self
                .executor
                .query_one(INSERT_CATEGORY, &[&category.name, &category.description])?;
            let inserted = category_from_row(&row)?;
            log::info!("inserted category {} ({})", inserted.id, inserted.name);
            Ok(inserted)
        })
    }

    fn delete_category(&self, id: RowId) -> Result<(), StoreError> {
        instrument_store_call("delete_category", || {
            let affected = self.executor.execute(DELETE_CATEGORY, &[&id])?;
            self.expect_affected(affected, CATEGORIES_TABLE, id)?;
            log::info!("deleted category {id}");
            Ok(())
        })
    }

    fn insert_product(&self, product: &NewProduct) -> Result<Product, StoreError> {
        instrument_store_call("insert_product", || {
            product.validate()?;
            let quantity = quantity_param(product.quantity)?;
            let row = self.executor.query_one(
                INSERT_PRODUCT,
                &[
                    &product.name,
                    &product.description,
                    &product.unit_price,
                    &quantity,
                    &product.category_id,
                ],
            )?;
            let inserted = product_from_row(&row)?;
            log::info!("inserted product {} ({})", inserted.id, inserted.name);
            Ok(inserted)
        })
    }

    fn update_product_quantity(&self, id: RowId, quantity: u32) -> Result<(), StoreError> {
        instrument_store_call("update_product_quantity", || {
            let quantity = quantity_param(quantity)?;
            let affected = self.executor.execute(UPDATE_PRODUCT_QUANTITY, &[&quantity, &id])?;
            self.expect_affected(affected, PRODUCTS_TABLE, id)?;
            log::debug!("product {id} quantity set to {quantity}");
            Ok(())
        })
    }

    fn delete_product(&self, id: RowId) -> Result<(), StoreError> {
        instrument_store_call("delete_product", || {
            let affected = self.executor.execute(DELETE_PRODUCT, &[&id])?;
            self.expect_affected(affected, PRODUCTS_TABLE, id)?;
            log::info!("deleted product {id}");
            Ok(())
        })
    }
}
