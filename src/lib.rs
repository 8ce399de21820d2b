//! # Stockroom
//!
//! Inventory aggregation and stock-status derivation over a two-table
//! catalog (categories, products), with a PostgreSQL catalog store on
//! `may_postgres`.
//!
//! - [`engine`] - pure summary / status / color / filter functions
//! - [`view`] - renders a snapshot into a [`ViewModel`]
//! - [`store`] - the [`CatalogStore`] trait, in-memory and PostgreSQL stores
//! - [`shell`] - action → store → re-fetch → render session
//!
//! ```
//! use rust_decimal::Decimal;
//! use stockroom::{InventoryShell, InventorySettings, MemoryCatalogStore, NewProduct, Palette};
//!
//! let mut shell = InventoryShell::new(MemoryCatalogStore::new(), InventorySettings::default(), Palette::default());
//! shell.add_product(NewProduct::new("Chleb", Decimal::new(420, 2), 3));
//! let view = shell.view().unwrap();
//! assert_eq!(view.low_stock, vec!["Chleb"]);
//! ```

pub mod config;
pub mod connection;
pub mod engine;
pub mod executor;
pub mod metrics;
pub mod model;
pub mod shell;
pub mod store;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod view;

pub use config::{DatabaseConfig, StockroomConfig};
pub use connection::{connect, ConnectionError};
pub use engine::{
    adjust_quantity, classify_status, compute_summary, filter_by_name, low_stock_list, resolve_category_name,
    tag_color, InventorySettings, InventorySummary, Palette, StockStatus,
};
pub use executor::{ExecError, MayPostgresExecutor, SqlExecutor};
pub use model::{Category, NewCategory, NewProduct, Product, RowId, Snapshot};
pub use shell::{InventoryShell, Notice};
pub use store::{CatalogStore, MemoryCatalogStore, PostgresCatalogStore, StoreError};
pub use view::{render, ProductRow, ViewModel};
