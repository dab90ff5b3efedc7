use async_trait::async_trait;
use sqlx::PgPool;

use modelforge_core::{ColumnDescriptor, Result};

use crate::adapter::SchemaSource;
use crate::options::IntrospectOptions;

mod mapper;
mod queries;

pub use mapper::type_family;

/// Adapter for PostgreSQL databases.
#[derive(Debug, Clone)]
pub struct PostgresAdapter {
    pool: PgPool,
    opts: IntrospectOptions,
}

impl PostgresAdapter {
    /// Create a new adapter using a pre-configured pool.
    pub fn new(pool: PgPool) -> Self {
        Self::with_options(pool, IntrospectOptions::default())
    }

    pub fn with_options(pool: PgPool, opts: IntrospectOptions) -> Self {
        Self { pool, opts }
    }
}

#[async_trait]
impl SchemaSource for PostgresAdapter {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn table_exists(&self, table: &str) -> Result<bool> {
        queries::table_exists(&self.pool, &self.opts.schema, table).await
    }

    async fn column_metadata(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let raw = queries::list_columns(&self.pool, &self.opts.schema, table).await?;
        Ok(mapper::map_columns(raw))
    }
}
