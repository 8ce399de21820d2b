//! Catalog table definitions.
//!
//! Both tables are created with `IF NOT EXISTS`, so [`ensure_schema`] is safe
//! to run on every start. `products.category_id` is declared
//! `ON DELETE SET NULL`: deleting a category keeps its products and clears
//! their category.

use sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, PostgresQueryBuilder, Table, TableCreateStatement};

use super::postgres::{CATEGORIES_TABLE, PRODUCTS_TABLE};
use super::StoreError;
use crate::executor::SqlExecutor;
use crate::model::{PRICE_PRECISION, PRICE_SCALE};

/// `CREATE TABLE categories`
pub fn categories_table() -> TableCreateStatement {
    Table::create()
        .table(CATEGORIES_TABLE)
        .if_not_exists()
        .col(ColumnDef::new("id").integer().not_null().auto_increment().primary_key())
        .col(ColumnDef::new("name").text().not_null())
        .col(ColumnDef::new("description").text().null())
        .to_owned()
}

/// `CREATE TABLE products`
pub fn products_table() -> TableCreateStatement {
    Table::create()
        .table(PRODUCTS_TABLE)
        .if_not_exists()
        .col(ColumnDef::new("id").integer().not_null().auto_increment().primary_key())
        .col(ColumnDef::new("name").text().not_null())
        .col(ColumnDef::new("description").text().null())
        .col(ColumnDef::new("unit_price").decimal_len(PRICE_PRECISION, PRICE_SCALE).not_null().default(0))
        .col(ColumnDef::new("quantity").integer().not_null().default(0))
        .col(ColumnDef::new("category_id").integer().null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_products_category")
                .from(PRODUCTS_TABLE, "category_id")
                .to(CATEGORIES_TABLE, "id")
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

/// DDL statements in dependency order
pub fn schema_statements() -> Vec<String> {
    vec![
        categories_table().build(PostgresQueryBuilder),
        products_table().build(PostgresQueryBuilder),
        // sea-query has no portable CHECK builder; keep the invariant in the database too
        format!(
            "DO $$ BEGIN \
             ALTER TABLE {PRODUCTS_TABLE} ADD CONSTRAINT ck_products_stock \
             CHECK (quantity >= 0 AND unit_price >= 0); \
             EXCEPTION WHEN duplicate_object THEN NULL; END $$"
        ),
    ]
}

/// Create the catalog tables if missing
///
/// # Errors
///
/// Returns `StoreError::Database` if any statement fails; statements already
/// applied stay applied.
pub fn ensure_schema<E: SqlExecutor>(executor: &E) -> Result<(), StoreError> {
    for statement in schema_statements() {
        executor.execute(&statement, &[])?;
    }
    log::info!("catalog schema is in place");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_ddl() {
        let sql = categories_table().build(PostgresQueryBuilder);
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"categories\""), "{sql}");
        assert!(sql.to_lowercase().contains("\"name\" text not null"), "{sql}");
    }

    #[test]
    fn test_products_ddl_nullifies_on_category_delete() {
        let sql = products_table().build(PostgresQueryBuilder);
        assert!(sql.contains("\"products\""), "{sql}");
        assert!(sql.contains("REFERENCES \"categories\" (\"id\")"), "{sql}");
        assert!(sql.contains("ON DELETE SET NULL"), "{sql}");
    }

    #[test]
    fn test_statement_order() {
        let statements = schema_statements();
        assert_eq!(statements.len(), 3);
        assert!(statements[0].contains("\"categories\""));
        assert!(statements[1].contains("\"products\""));
        assert!(statements[2].contains("ck_products_stock"));
    }
}
