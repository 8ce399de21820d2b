//! In-process catalog store.

use std::cell::RefCell;

use super::{CatalogStore, StoreError};
use crate::executor::ExecError;
use crate::model::{Category, NewCategory, NewProduct, Product, RowId};

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    products: Vec<Product>,
    next_category_id: RowId,
    next_product_id: RowId,
    injected_failure: Option<String>,
}

impl Tables {
    fn take_failure(&mut self) -> Result<(), StoreError> {
        match self.injected_failure.take() {
            Some(reason) => Err(StoreError::Database(ExecError::Other(reason))),
            None => Ok(()),
        }
    }
}

/// Catalog tables held in memory
///
/// Ids are assigned sequentially from 1 and never reused. Rows are kept in
/// insertion order, which is also id order.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    tables: RefCell<Tables>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next store call fail with a database error carrying `reason`
    pub fn fail_next_call(&self, reason: impl Into<String>) {
        self.tables.borrow_mut().injected_failure = Some(reason.into());
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut tables = self.tables.borrow_mut();
        tables.take_failure()?;
        Ok(tables.categories.clone())
    }

    fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut tables = self.tables.borrow_mut();
        tables.take_failure()?;
        Ok(tables.products.clone())
    }

    fn insert_category(&self, category: &NewCategory) -> Result<Category, StoreError> {
        category.validate()?;
        let mut tables = self.tables.borrow_mut();
        tables.take_failure()?;
        tables.next_category_id += 1;
        let row = Category {
            id: tables.next_category_id,
            name: category.name.clone(),
            description: category.description.clone(),
        };
        tables.categories.push(row.clone());
        log::debug!("inserted category {} ({})", row.id, row.name);
        Ok(row)
    }

    fn delete_category(&self, id: RowId) -> Result<(), StoreError> {
        let mut tables = self.tables.borrow_mut();
        tables.take_failure()?;
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        if tables.categories.len() == before {
            return Err(StoreError::NotFound { table: "categories", id });
        }
        let mut orphaned = 0;
        for product in tables.products.iter_mut().filter(|p| p.category_id == Some(id)) {
            product.category_id = None;
            orphaned += 1;
        }
        log::debug!("deleted category {id}, cleared category on {orphaned} product(s)");
        Ok(())
    }

    fn insert_product(&self, product: &NewProduct) -> Result<Product, StoreError> {
        product.validate()?;
        let mut tables = self.tables.borrow_mut();
        tables.take_failure()?;
        tables.next_product_id += 1;
        let row = Product {
            id: tables.next_product_id,
            name: product.name.clone(),
            description: product.description.clone(),
            unit_price: product.unit_price,
            quantity: product.quantity,
            category_id: product.category_id,
        };
        tables.products.push(row.clone());
        log::debug!("inserted product {} ({})", row.id, row.name);
        Ok(row)
    }

    fn update_product_quantity(&self, id: RowId, quantity: u32) -> Result<(), StoreError> {
        let mut tables = self.tables.borrow_mut();
        tables.take_failure()?;
        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound { table: "products", id })?;
        product.quantity = quantity;
        Ok(())
    }

    fn delete_product(&self, id: RowId) -> Result<(), StoreError> {
        let mut tables = self.tables.borrow_mut();
        tables.take_failure()?;
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        if tables.products.len() == before {
            return Err(StoreError::NotFound { table: "products", id });
        }
        Ok(())
    }
}
