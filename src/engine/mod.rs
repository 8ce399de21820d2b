//! Aggregation & status engine.
//!
//! Pure, synchronous functions over an already-fetched [`Snapshot`](crate::model::Snapshot):
//!
//! - [`compute_summary`] - total quantity, total value, fill percentage
//! - [`classify_status`] - out of stock / low stock / in stock
//! - [`tag_color`] - keyword-driven tag color for a product name
//! - [`filter_by_name`] - stable case-insensitive name filter
//! - [`resolve_category_name`] - category label with a placeholder for misses
//! - [`adjust_quantity`] - quantity delta clamped at zero
//! - [`low_stock_list`] - reorder list
//!
//! The free functions use the default constants; [`InventorySettings`] offers
//! the same operations with configured values.

pub mod lookup;
pub mod palette;
pub mod settings;
pub mod status;
pub mod summary;

pub use lookup::{filter_by_name, resolve_category_name, UNCATEGORIZED_LABEL};
pub use palette::{tag_color, ColorRule, Palette, DEFAULT_TAG_COLOR};
pub use settings::{InventorySettings, SettingsError, DEFAULT_CAPACITY, LOW_STOCK_THRESHOLD};
pub use status::{adjust_quantity, classify_status, low_stock_list, StockStatus};
pub use summary::{compute_summary, fill_percent, InventorySummary};
