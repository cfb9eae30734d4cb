//! Query Builder ORDER BY operations

use crate::security::ColumnRef;

use super::builder::QueryBuilder;

impl QueryBuilder {
    /// Add ORDER BY column ASC
    pub fn order_by(mut self, column: ColumnRef) -> Self {
        self.order_by.push(column);
        self
    }
}
