use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use modelforge_core::{ColumnDescriptor, Error, Result};

use crate::adapter::SchemaSource;

/// Schema file contents: column lists keyed by table name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SchemaDocument {
    #[serde(default)]
    pub tables: BTreeMap<String, Vec<ColumnDescriptor>>,
}

/// Schema source backed by an in-memory document, usually read from a JSON
/// or TOML schema file.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaSource {
    document: SchemaDocument,
}

impl StaticSchemaSource {
    pub fn new(document: SchemaDocument) -> Self {
        Self { document }
    }

    /// A source that knows no tables.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        self.document.tables.insert(name.into(), columns);
        self
    }

    /// Load a schema file. `.json` files are parsed as JSON, everything else
    /// as TOML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            Error::InvalidSchema(format!("reading {}: {err}", path.display()))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let document: SchemaDocument = serde_json::from_str(contents)
            .map_err(|err| Error::InvalidSchema(format!("schema json: {err}")))?;
        Ok(Self::new(document))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let document: SchemaDocument = toml::from_str(contents)
            .map_err(|err| Error::InvalidSchema(format!("schema toml: {err}")))?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }
}

#[async_trait]
impl SchemaSource for StaticSchemaSource {
    fn engine(&self) -> &'static str {
        "static"
    }

    async fn table_exists(&self, table: &str) -> Result<bool> {
        Ok(self.document.tables.contains_key(table))
    }

    async fn column_metadata(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        Ok(self.document.tables.get(table).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml_documents_in_column_order() {
        let source = StaticSchemaSource::from_toml_str(
            r#"
            [[tables.users]]
            name = "id"
            sql_type = "int"
            is_primary_key = true

            [[tables.users]]
            name = "email"
            sql_type = "varchar"
            max_length = 255
            "#,
        )
        .expect("parse toml");

        let users = &source.document().tables["users"];
        assert_eq!(
            users,
            &vec![
                ColumnDescriptor::new("id", "int").primary(),
                ColumnDescriptor::new("email", "varchar").with_max_length(255),
            ]
        );
    }

    #[test]
    fn rejects_malformed_documents() {
        let err = StaticSchemaSource::from_json_str(r#"{"tables": {"users": [{"name": 1}]}}"#)
            .expect_err("malformed column");
        assert!(matches!(err, Error::InvalidSchema(_)));
    }
}
