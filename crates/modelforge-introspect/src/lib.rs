//! Schema sources that describe one table as a list of column descriptors.

pub mod adapter;
pub mod options;
pub mod postgres;
pub mod static_source;

pub use adapter::{SchemaSource, describe_table};
pub use options::IntrospectOptions;
pub use postgres::PostgresAdapter;
pub use static_source::{SchemaDocument, StaticSchemaSource};

pub use modelforge_core::ColumnDescriptor;
