//! Derivation of field-validation rules from column metadata.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::naming::field_label;
use crate::schema::ColumnDescriptor;

/// A single validation constraint token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Integer,
    Decimal,
    Numeric,
    AlphaNumericSpaces,
    XssClean,
    MaxLength(u32),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Integer => f.write_str("integer"),
            Constraint::Decimal => f.write_str("decimal"),
            Constraint::Numeric => f.write_str("numeric"),
            Constraint::AlphaNumericSpaces => f.write_str("alpha_numeric_spaces"),
            Constraint::XssClean => f.write_str("xss_clean"),
            Constraint::MaxLength(length) => write!(f, "max_length[{length}]"),
        }
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Validation rule for one field, derived from one column.
///
/// `rules` is the pipe-joined form of `constraints`; both are fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRule {
    pub field: String,
    pub label: String,
    constraints: Vec<Constraint>,
    rules: String,
}

impl ValidationRule {
    pub fn new(field: impl Into<String>, constraints: Vec<Constraint>) -> Self {
        let field = field.into();
        let rules = join_tokens(&constraints);
        Self {
            label: field_label(&field),
            field,
            constraints,
            rules,
        }
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Constraint tokens in order.
    pub fn tokens(&self) -> Vec<String> {
        self.constraints.iter().map(ToString::to_string).collect()
    }

    /// Tokens joined with `|`, the form validation libraries consume.
    pub fn rule_string(&self) -> &str {
        &self.rules
    }
}

fn join_tokens(constraints: &[Constraint]) -> String {
    constraints
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|")
}

/// Type constraints for a column-type family. Matching is case-sensitive and
/// unknown families (dates, booleans, json, ...) get none.
pub fn type_constraints(sql_type: &str) -> &'static [Constraint] {
    match sql_type {
        "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" => {
            &[Constraint::Integer]
        }
        "decimal" | "dec" | "numeric" | "fixed" => &[Constraint::Decimal],
        "float" | "double" => &[Constraint::Numeric],
        "char" | "varchar" | "text" => &[Constraint::AlphaNumericSpaces, Constraint::XssClean],
        _ => &[],
    }
}

/// Derive the rule for a single column.
pub fn derive_rule(column: &ColumnDescriptor) -> ValidationRule {
    let mut constraints = type_constraints(&column.sql_type).to_vec();
    if let Some(length) = column.max_length.filter(|length| *length > 0) {
        constraints.push(Constraint::MaxLength(length));
    }
    ValidationRule::new(column.name.clone(), constraints)
}

/// Derive validation rules for every column, in column order.
///
/// Returns `None` when there are no columns or when a column is malformed
/// (blank name). A non-empty, well-formed input always yields one rule per
/// column, even if a rule carries no constraints.
pub fn derive_rules(columns: &[ColumnDescriptor]) -> Option<Vec<ValidationRule>> {
    if columns.is_empty() || columns.iter().any(|column| column.name.trim().is_empty()) {
        return None;
    }

    Some(columns.iter().map(derive_rule).collect())
}
