//! Query Builder - Core builder implementation

use crate::security::{ColumnRef, Identifier};

use super::types::*;

/// Builder for read-only SELECT queries.
///
/// Every table and column is an already-validated [`Identifier`]; every
/// value ends up as a bound parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    pub(crate) select_items: Vec<SelectItem>,
    pub(crate) from_table: Option<Identifier>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) where_conditions: Vec<WhereCondition>,
    pub(crate) order_by: Vec<ColumnRef>,
}

impl QueryBuilder {
    /// Create a new query builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the FROM table
    pub fn from(mut self, table: &Identifier) -> Self {
        self.from_table = Some(table.clone());
        self
    }

    /// Select a column
    pub fn select(mut self, column: ColumnRef) -> Self {
        self.select_items.push(SelectItem::Column { column, alias: None });
        self
    }

    /// Select a column under an alias
    pub fn select_as(mut self, column: ColumnRef, alias: &Identifier) -> Self {
        self.select_items.push(SelectItem::Column {
            column,
            alias: Some(alias.clone()),
        });
        self
    }

    /// Select every column of `table`
    pub fn select_all_from(mut self, table: &Identifier) -> Self {
        self.select_items.push(SelectItem::AllFrom(table.clone()));
        self
    }
}
