//! Query Builder JOIN operations

use crate::security::{ColumnRef, Identifier};

use super::builder::QueryBuilder;
use super::types::*;

impl QueryBuilder {
    /// Add INNER JOIN to the query
    pub fn join(mut self, table: &Identifier, left_col: ColumnRef, right_col: ColumnRef) -> Self {
        self.joins.push(JoinClause {
            table: table.clone(),
            on_conditions: vec![(left_col, right_col)],
        });
        self
    }
}
