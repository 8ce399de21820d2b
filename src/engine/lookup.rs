//! Name filtering and category resolution.

use crate::model::{Category, Product, RowId};

/// Label shown for products without a resolvable category
pub const UNCATEGORIZED_LABEL: &str = "(no category)";

/// Products whose name contains `query`, case-insensitively
///
/// Stable: matches keep their input order. A blank query (empty or only
/// whitespace) returns every product; any other query is matched as given,
/// surrounding whitespace included.
pub fn filter_by_name<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if query.trim().is_empty() {
        return products.iter().collect();
    }
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Name of `category_id` in `categories`, or [`UNCATEGORIZED_LABEL`]
pub fn resolve_category_name(categories: &[Category], category_id: Option<RowId>) -> &str {
    category_id
        .and_then(|id| categories.iter().find(|c| c.id == id))
        .map_or(UNCATEGORIZED_LABEL, |c| c.name.as_str())
}
