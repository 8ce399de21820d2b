//! Catalog store: persistence for categories and products.
//!
//! [`CatalogStore`] is the whole persistence surface the shell needs: list,
//! insert, update quantity and delete over the two catalog tables. Calls are
//! made one at a time and every mutation is followed by a full re-fetch, so
//! implementations hold no cache and give no transactional guarantees across
//! calls.
//!
//! Two implementations ship with the crate:
//!
//! - [`MemoryCatalogStore`] - process-local tables, used by tests and demos
//! - [`PostgresCatalogStore`] - parameterised SQL over any [`SqlExecutor`](crate::executor::SqlExecutor)
//!
//! Deleting a category leaves its products in place with `category_id`
//! cleared (PostgreSQL does this via `ON DELETE SET NULL`, see [`schema`]).

pub mod error;
pub mod memory;
pub mod postgres;
pub mod schema;

pub use error::StoreError;
pub use memory::MemoryCatalogStore;
pub use postgres::PostgresCatalogStore;

use crate::model::{Category, NewCategory, NewProduct, Product, RowId, Snapshot};

/// Persistence operations over the catalog tables
pub trait CatalogStore {
    /// All categories, ordered by id
    fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// All products, ordered by id
    fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Insert a category and return it with its assigned id
    fn insert_category(&self, category: &NewCategory) -> Result<Category, StoreError>;

    /// Delete a category; products referencing it lose their category
    fn delete_category(&self, id: RowId) -> Result<(), StoreError>;

    /// Insert a product and return it with its assigned id
    fn insert_product(&self, product: &NewProduct) -> Result<Product, StoreError>;

    /// Overwrite a product's quantity
    fn update_product_quantity(&self, id: RowId, quantity: u32) -> Result<(), StoreError>;

    fn delete_product(&self, id: RowId) -> Result<(), StoreError>;

    /// Fetch both tables, categories first
    fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let categories = self.list_categories()?;
        let products = self.list_products()?;
        Ok(Snapshot::new(categories, products))
    }
}

impl<S: CatalogStore + ?Sized> CatalogStore for &S {
    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        (**self).list_categories()
    }

    fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list_products()
    }

    fn insert_category(&self, category: &NewCategory) -> Result<Category, StoreError> {
        (**self).insert_category(category)
    }

    fn delete_category(&self, id: RowId) -> Result<(), StoreError> {
        (**self).delete_category(id)
    }

    fn insert_product(&self, product: &NewProduct) -> Result<Product, StoreError> {
        (**self).insert_product(product)
    }

    fn update_product_quantity(&self, id: RowId, quantity: u32) -> Result<(), StoreError> {
        (**self).update_product_quantity(id, quantity)
    }

    fn delete_product(&self, id: RowId) -> Result<(), StoreError> {
        (**self).delete_product(id)
    }
}
