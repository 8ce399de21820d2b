//! View model rendering.
//!
//! [`render`] is called anew after every shell action with the freshly
//! fetched snapshot; it holds no state of its own.

use rust_decimal::Decimal;
use serde::Serialize;
use std::io;

use crate::engine::{filter_by_name, resolve_category_name, InventorySettings, InventorySummary, Palette, StockStatus};
use crate::model::{Category, RowId, Snapshot};

/// One product line as displayed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub id: RowId,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub status: StockStatus,
    pub color: String,
}

/// Everything the presentation layer needs for one screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    /// Totals over the whole snapshot, not just the filtered rows
    pub summary: InventorySummary,
    /// Filtered products in snapshot order
    pub rows: Vec<ProductRow>,
    /// Reorder list over the whole snapshot
    pub low_stock: Vec<String>,
    pub categories: Vec<Category>,
    pub filter: String,
}

/// Render `snapshot` narrowed by `filter`
pub fn render(snapshot: &Snapshot, filter: &str, settings: &InventorySettings, palette: &Palette) -> ViewModel {
    let rows = filter_by_name(&snapshot.products, filter)
        .into_iter()
        .map(|product| ProductRow {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            category: resolve_category_name(&snapshot.categories, product.category_id).to_string(),
            unit_price: product.unit_price,
            quantity: product.quantity,
            status: settings.classify(product),
            color: palette.tag_color(&product.name).to_string(),
        })
        .collect();

    ViewModel {
        summary: settings.summarize(&snapshot.products),
        rows,
        low_stock: settings
            .low_stock_list(&snapshot.products)
            .into_iter()
            .map(str::to_string)
            .collect(),
        categories: snapshot.categories.clone(),
        filter: filter.to_string(),
    }
}

impl ViewModel {
    /// Rows whose status needs attention, most severe first
    ///
    /// Ties keep snapshot order.
    pub fn alerts(&self) -> Vec<&ProductRow> {
        let mut alerts: Vec<&ProductRow> = self.rows.iter().filter(|r| r.status.needs_reorder()).collect();
        alerts.sort_by(|a, b| b.status.cmp(&a.status));
        alerts
    }

    /// Write the rows as CSV with a header line
    ///
    /// # Errors
    ///
    /// Returns `csv::Error` if writing to `out` fails.
    pub fn write_csv<W: io::Write>(&self, out: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(["id", "name", "category", "unit_price", "quantity", "status"])?;
        for row in &self.rows {
            writer.write_record([
                row.id.to_string(),
                row.name.clone(),
                row.category.clone(),
                row.unit_price.to_string(),
                row.quantity.to_string(),
                row.status.label().to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}
