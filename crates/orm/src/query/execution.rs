//! Query Builder execution against a `DatabasePool`

use crate::backends::{DatabasePool, DatabaseRow};
use crate::error::ModelResult;

use super::builder::QueryBuilder;

impl QueryBuilder {
    /// Render for the pool's dialect and fetch every row
    pub async fn fetch_all(&self, pool: &dyn DatabasePool) -> ModelResult<Vec<Box<dyn DatabaseRow>>> {
        let (sql, params) = self.to_sql_with_params(pool.sql_dialect())?;
        tracing::trace!(sql = %sql, params = params.len(), "executing query");
        pool.fetch_all(&sql, &params).await
    }
}
