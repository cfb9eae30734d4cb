//! Query Builder Types - Core types and enums for query building

use std::fmt;

use crate::backends::DatabaseValue;
use crate::security::{ColumnRef, Identifier};

/// Query operator types
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOperator {
    Equal,
    In,
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOperator::Equal => write!(f, "="),
            QueryOperator::In => write!(f, "IN"),
        }
    }
}

/// Item of a SELECT list
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// `"table"."column" [AS "alias"]`
    Column {
        column: ColumnRef,
        alias: Option<Identifier>,
    },
    /// `"table".*`
    AllFrom(Identifier),
}

/// Where clause condition; `values` holds one value except for IN
#[derive(Debug, Clone, PartialEq)]
pub struct WhereCondition {
    pub column: ColumnRef,
    pub operator: QueryOperator,
    pub values: Vec<DatabaseValue>,
}

/// INNER JOIN clause
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub table: Identifier,
    pub on_conditions: Vec<(ColumnRef, ColumnRef)>, // (left_column, right_column)
}
