use async_trait::async_trait;

use modelforge_core::{ColumnDescriptor, Error, Result};

/// Trait implemented by anything that can report column metadata for a table.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Returns the engine identifier (e.g. `postgres`, `static`).
    fn engine(&self) -> &'static str;

    /// Whether the table exists in the connected data source.
    async fn table_exists(&self, table: &str) -> Result<bool>;

    /// Column metadata in table order. May be empty.
    async fn column_metadata(&self, table: &str) -> Result<Vec<ColumnDescriptor>>;
}

/// Describe `table`, treating a missing table and empty metadata alike as
/// [`Error::SchemaNotFound`]. Read-only.
pub async fn describe_table(
    source: &dyn SchemaSource,
    table: &str,
) -> Result<Vec<ColumnDescriptor>> {
    let not_found = || Error::SchemaNotFound {
        table: table.to_string(),
    };

    if !source.table_exists(table).await? {
        return Err(not_found());
    }

    let columns = source.column_metadata(table).await?;
    if columns.is_empty() {
        return Err(not_found());
    }

    Ok(columns)
}
