use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Normalized metadata for one physical table column.
///
/// `sql_type` holds the column-type family (`int`, `varchar`, `date`, ...)
/// exactly as the rule mapping expects it; adapters are responsible for
/// translating engine-specific type names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnDescriptor {
    pub name: String,
    pub sql_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub is_primary_key: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            max_length: None,
            is_primary_key: false,
        }
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn primary(mut self) -> Self {
        self.is_primary_key = true;
        self
    }
}

/// Name of the first column flagged as primary key, in table order.
pub fn primary_key_column(columns: &[ColumnDescriptor]) -> Option<&str> {
    columns
        .iter()
        .find(|column| column.is_primary_key)
        .map(|column| column.name.as_str())
}
