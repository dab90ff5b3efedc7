use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::rules::ValidationRule;
use crate::schema::ColumnDescriptor;

/// Storage format for the created/modified timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    #[default]
    Datetime,
    Date,
    Int,
}

impl DateFormat {
    pub const CHOICES: [&'static str; 3] = ["datetime", "date", "int"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateFormat::Datetime => "datetime",
            DateFormat::Date => "date",
            DateFormat::Int => "int",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "datetime" => Ok(DateFormat::Datetime),
            "date" => Ok(DateFormat::Date),
            "int" => Ok(DateFormat::Int),
            other => Err(Error::InvalidOption(format!(
                "date format must be one of datetime, date, int (got `{other}`)"
            ))),
        }
    }
}

/// Shape of rows returned by the generated model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnType {
    #[default]
    Object,
    Array,
}

impl ReturnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnType::Object => "object",
            ReturnType::Array => "array",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "object" => Ok(ReturnType::Object),
            "array" => Ok(ReturnType::Array),
            other => Err(Error::InvalidOption(format!(
                "return type must be object or array (got `{other}`)"
            ))),
        }
    }
}

/// Lowest-precedence option values. Every field may be overridden from the
/// `[defaults]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionDefaults {
    pub primary_key: String,
    pub set_created: bool,
    pub set_modified: bool,
    pub created_field: String,
    pub modified_field: String,
    pub date_format: DateFormat,
    pub log_user: bool,
    pub created_by_field: String,
    pub modified_by_field: String,
    pub deleted_by_field: String,
    pub use_soft_deletes: bool,
    pub soft_delete_key: String,
    pub return_type: ReturnType,
    pub return_insert_id: bool,
}

impl Default for OptionDefaults {
    fn default() -> Self {
        Self {
            primary_key: "id".to_string(),
            set_created: true,
            set_modified: true,
            created_field: "created_on".to_string(),
            modified_field: "modified_on".to_string(),
            date_format: DateFormat::Datetime,
            log_user: false,
            created_by_field: "created_by".to_string(),
            modified_by_field: "modified_by".to_string(),
            deleted_by_field: "deleted_by".to_string(),
            use_soft_deletes: true,
            soft_delete_key: "deleted".to_string(),
            return_type: ReturnType::Object,
            return_insert_id: true,
        }
    }
}

/// Values supplied by the caller (command arguments). Highest precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplicitOptions {
    pub table: Option<String>,
    pub primary_key: Option<String>,
    pub set_created: Option<bool>,
    pub set_modified: Option<bool>,
    pub date_format: Option<DateFormat>,
    pub log_user: Option<bool>,
    pub soft_delete: Option<bool>,
    pub return_type: Option<ReturnType>,
    pub return_insert_id: Option<bool>,
}

impl ExplicitOptions {
    /// Explicit table name, ignoring blank values.
    pub fn table(&self) -> Option<&str> {
        non_blank(self.table.as_deref())
    }

    /// Explicit primary key, ignoring blank values.
    pub fn primary_key(&self) -> Option<&str> {
        non_blank(self.primary_key.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Fully resolved generation options.
///
/// `protected` always equals `[primary_key]`; both are only writable through
/// [`GenerationOptions::set_primary_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOptions {
    pub table_name: String,
    primary_key: String,
    protected: Vec<String>,
    pub set_created: bool,
    pub set_modified: bool,
    pub created_field: String,
    pub modified_field: String,
    pub date_format: DateFormat,
    pub log_user: bool,
    pub created_by_field: String,
    pub modified_by_field: String,
    pub deleted_by_field: String,
    pub use_soft_deletes: bool,
    pub soft_delete_key: String,
    pub return_type: ReturnType,
    pub return_insert_id: bool,
    pub fields: Vec<ColumnDescriptor>,
    pub rules: Vec<ValidationRule>,
}

impl GenerationOptions {
    /// Options for `table_name` carrying every default value.
    pub fn from_defaults(table_name: impl Into<String>, defaults: &OptionDefaults) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key: defaults.primary_key.clone(),
            protected: vec![defaults.primary_key.clone()],
            set_created: defaults.set_created,
            set_modified: defaults.set_modified,
            created_field: defaults.created_field.clone(),
            modified_field: defaults.modified_field.clone(),
            date_format: defaults.date_format,
            log_user: defaults.log_user,
            created_by_field: defaults.created_by_field.clone(),
            modified_by_field: defaults.modified_by_field.clone(),
            deleted_by_field: defaults.deleted_by_field.clone(),
            use_soft_deletes: defaults.use_soft_deletes,
            soft_delete_key: defaults.soft_delete_key.clone(),
            return_type: defaults.return_type,
            return_insert_id: defaults.return_insert_id,
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    pub fn protected(&self) -> &[String] {
        &self.protected
    }

    pub fn set_primary_key(&mut self, primary_key: impl Into<String>) {
        let primary_key = primary_key.into();
        self.protected = vec![primary_key.clone()];
        self.primary_key = primary_key;
    }
}
