//! Core contracts for modelforge.
//!
//! This crate defines the column and option types, the rule derivation and
//! the naming helpers shared by the introspection adapters, the generator and
//! the CLI.

pub mod error;
pub mod naming;
pub mod options;
pub mod rules;
pub mod schema;

pub use error::{Error, Result};
pub use naming::{
    EnglishInflector, Inflector, MODEL_SUFFIX, default_table_name, field_label,
    normalize_entity_name,
};
pub use options::{DateFormat, ExplicitOptions, GenerationOptions, OptionDefaults, ReturnType};
pub use rules::{Constraint, ValidationRule, derive_rule, derive_rules, type_constraints};
pub use schema::{ColumnDescriptor, primary_key_column};
