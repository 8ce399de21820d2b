//! Presentation shell session.
//!
//! [`InventoryShell`] is the glue between user actions and the catalog store.
//! Every action follows the same cycle:
//!
//! 1. call the store (one statement at a time, never concurrently)
//! 2. on success, re-fetch the full snapshot and re-render
//! 3. on failure, record a [`Notice::Error`] and keep the previous view
//!
//! No snapshot data survives between actions except the last rendered
//! [`ViewModel`], which is only ever replaced wholesale by a fresh render.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::{adjust_quantity, InventorySettings, Palette};
use crate::model::{NewCategory, NewProduct, RowId, Snapshot};
use crate::store::{CatalogStore, StoreError};
use crate::view::{render, ViewModel};

/// Outcome message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }
}

/// Single-user session over a catalog store
pub struct InventoryShell<S> {
    store: S,
    settings: InventorySettings,
    palette: Palette,
    filter: String,
    snapshot: Snapshot,
    view: Option<ViewModel>,
    notice: Option<Notice>,
}

impl<S: CatalogStore> InventoryShell<S> {
    pub fn new(store: S, settings: InventorySettings, palette: Palette) -> Self {
        Self {
            store,
            settings,
            palette,
            filter: String::new(),
            snapshot: Snapshot::default(),
            view: None,
            notice: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Last successfully rendered view, if any
    pub fn view(&self) -> Option<&ViewModel> {
        self.view.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Fetch both tables and re-render
    ///
    /// Returns `false` (and records an error notice) if the fetch fails; the
    /// previous view stays in place.
    pub fn refresh(&mut self) -> bool {
        match self.store.snapshot() {
            Ok(snapshot) => {
                self.view = Some(render(&snapshot, &self.filter, &self.settings, &self.palette));
                self.snapshot = snapshot;
                true
            }
            Err(e) => {
                self.fail("Could not load the catalog", &e);
                false
            }
        }
    }

    /// Change the name filter and re-render from a fresh snapshot
    pub fn set_filter(&mut self, filter: impl Into<String>) -> bool {
        self.filter = filter.into();
        self.refresh()
    }

    pub fn add_category(&mut self, category: NewCategory) -> bool {
        let result = self.store.insert_category(&category);
        self.settle(result.map(|c| format!("Added category \"{}\"", c.name)), "Could not add category")
    }

    pub fn delete_category(&mut self, id: RowId) -> bool {
        let result = self.store.delete_category(id);
        self.settle(result.map(|()| format!("Deleted category {id}")), "Could not delete category")
    }

    pub fn add_product(&mut self, product: NewProduct) -> bool {
        let result = self.store.insert_product(&product);
        self.settle(result.map(|p| format!("Added product \"{}\"", p.name)), "Could not add product")
    }

    /// Add `product` under the category called `category_name`, creating the
    /// category first when no category of that name exists
    ///
    /// The name is matched case-insensitively against the current snapshot.
    /// The two inserts are independent: if the product insert fails, a
    /// category created by this call is kept.
    pub fn add_product_in_category(&mut self, product: NewProduct, category_name: &str) -> bool {
        let category_id = match self.snapshot.category_by_name(category_name) {
            Some(category) => category.id,
            None => match self.store.insert_category(&NewCategory::new(category_name.trim())) {
                Ok(category) => {
                    log::info!("created category \"{}\" for new product", category.name);
                    category.id
                }
                Err(e) => {
                    self.fail("Could not add category", &e);
                    return false;
                }
            },
        };
        self.add_product(product.in_category(category_id))
    }

    pub fn delete_product(&mut self, id: RowId) -> bool {
        let result = self.store.delete_product(id);
        self.settle(result.map(|()| format!("Deleted product {id}")), "Could not delete product")
    }

    pub fn increment(&mut self, id: RowId) -> bool {
        self.adjust(id, 1)
    }

    /// Decrement by one; at zero this writes zero again rather than failing
    pub fn decrement(&mut self, id: RowId) -> bool {
        self.adjust(id, -1)
    }

    /// Apply `delta` to the quantity in the current snapshot and store the result
    pub fn adjust(&mut self, id: RowId, delta: i64) -> bool {
        let Some(product) = self.snapshot.product(id) else {
            self.notice = Some(Notice::Error(format!("Product {id} is not in the current catalog")));
            log::warn!("quantity change for unknown product {id}");
            return false;
        };
        let quantity = adjust_quantity(product, delta);
        self.set_quantity(id, quantity)
    }

    pub fn set_quantity(&mut self, id: RowId, quantity: u32) -> bool {
        let result = self.store.update_product_quantity(id, quantity);
        self.settle(
            result.map(|()| format!("Product {id} quantity set to {quantity}")),
            "Could not update quantity",
        )
    }

    fn settle(&mut self, result: Result<String, StoreError>, context: &str) -> bool {
        match result {
            Ok(message) => {
                log::info!("{message}");
                self.notice = Some(Notice::Success(message));
                // a failed refresh replaces the success notice with the fetch error
                self.refresh()
            }
            Err(e) => {
                self.fail(context, &e);
                false
            }
        }
    }

    fn fail(&mut self, context: &str, error: &StoreError) {
        log::warn!("{context}: {error}");
        self.notice = Some(Notice::Error(format!("{context}: {error}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StockStatus;
    use crate::store::MemoryCatalogStore;

    fn shell() -> InventoryShell<MemoryCatalogStore> {
        InventoryShell::new(MemoryCatalogStore::new(), InventorySettings::default(), Palette::default())
    }

    #[test]
    fn test_add_then_view_reflects_store() {
        let mut shell = shell();
        assert!(shell.add_product(NewProduct::new("Chleb", Decimal::new(420, 2), 3)));
        let view = shell.view().unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].status, StockStatus::LowStock);
        assert_eq!(shell.notice(), Some(&Notice::Success("Added product \"Chleb\"".into())));
    }

    #[test]
    fn test_decrement_clamps_at_zero() {
        let mut shell = shell();
        shell.add_product(NewProduct::new("Mleko", Decimal::new(350, 2), 0));
        let id = shell.view().unwrap().rows[0].id;
        assert!(shell.decrement(id));
        assert_eq!(shell.view().unwrap().rows[0].quantity, 0);
        assert!(shell.increment(id));
        assert!(shell.increment(id));
        assert_eq!(shell.view().unwrap().rows[0].quantity, 2);
    }

    #[test]
    fn test_store_failure_keeps_stale_view() {
        let mut shell = shell();
        shell.add_product(NewProduct::new("Ser", Decimal::new(1200, 2), 10));
        let before = shell.view().cloned();

        shell.store().fail_next_call("connection reset");
        assert!(!shell.delete_product(1));

        assert_eq!(shell.view().cloned(), before);
        let notice = shell.notice().unwrap();
        assert!(notice.is_error());
        assert!(notice.message().contains("connection reset"));

        // next action works normally
        assert!(shell.delete_product(1));
        assert!(shell.view().unwrap().rows.is_empty());
    }

    #[test]
    fn test_adjust_unknown_product_is_reported() {
        let mut shell = shell();
        shell.refresh();
        assert!(!shell.increment(99));
        assert!(shell.notice().unwrap().message().contains("99"));
    }

    #[test]
    fn test_add_product_in_category_reuses_existing_category() {
        let mut shell = shell();
        shell.add_category(NewCategory::new("Nabiał"));
        assert!(shell.add_product_in_category(NewProduct::new("Jogurt", Decimal::new(250, 2), 6), "nabiał"));
        let view = shell.view().unwrap();
        assert_eq!(view.categories.len(), 1);
        assert_eq!(view.rows[0].category, "Nabiał");
    }

    #[test]
    fn test_add_product_in_new_category_keeps_description() {
        let mut shell = shell();
        shell.refresh();
        let product = NewProduct::new("Sok jabłkowy", Decimal::new(599, 2), 8).with_description("1 l, tłoczony");
        assert!(shell.add_product_in_category(product, "Napoje"));

        let view = shell.view().unwrap();
        assert_eq!(view.categories[0].name, "Napoje");
        assert_eq!(view.rows[0].category, "Napoje");
        assert_eq!(view.rows[0].description.as_deref(), Some("1 l, tłoczony"));
    }

    #[test]
    fn test_add_product_in_category_keeps_category_when_product_fails() {
        let mut shell = shell();
        shell.refresh();
        // blank product name fails validation after the category insert
        assert!(!shell.add_product_in_category(NewProduct::new(" ", Decimal::ONE, 1), "Napoje"));
        assert!(shell.notice().unwrap().is_error());
        assert!(shell.refresh());
        let view = shell.view().unwrap();
        assert_eq!(view.categories.len(), 1);
        assert_eq!(view.categories[0].name, "Napoje");
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_filter_is_applied_on_refresh() {
        let mut shell = shell();
        shell.add_product(NewProduct::new("Mleko", Decimal::ONE, 1));
        shell.add_product(NewProduct::new("Chleb", Decimal::ONE, 1));
        assert!(shell.set_filter("MLE"));
        let view = shell.view().unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.summary.total_quantity, 2);
        assert_eq!(shell.filter(), "MLE");
    }
}
