//! Query Builder SQL generation

use crate::backends::{DatabaseValue, SqlDialect};
use crate::error::QueryError;

use super::builder::QueryBuilder;
use super::types::*;

impl QueryBuilder {
    /// Generate SQL with dialect placeholders and return the bound parameters
    pub fn to_sql_with_params(&self, dialect: SqlDialect) -> Result<(String, Vec<DatabaseValue>), QueryError> {
        let from_table = self
            .from_table
            .as_ref()
            .ok_or_else(|| QueryError::MissingClause("SELECT query has no FROM table".to_string()))?;

        let mut sql = String::new();
        let mut params = Vec::new();

        // SELECT clause
        sql.push_str("SELECT ");

        if self.select_items.is_empty() {
            sql.push('*');
        } else {
            let items: Vec<String> = self
                .select_items
                .iter()
                .map(|item| match item {
                    SelectItem::Column { column, alias: None } => column.quoted(dialect),
                    SelectItem::Column { column, alias: Some(alias) } => {
                        format!("{} AS {}", column.quoted(dialect), alias.quoted(dialect))
                    }
                    SelectItem::AllFrom(table) => format!("{}.*", table.quoted(dialect)),
                })
                .collect();
            sql.push_str(&items.join(", "));
        }

        // FROM clause
        sql.push_str(" FROM ");
        sql.push_str(&from_table.quoted(dialect));

        // JOIN clauses
        for join in &self.joins {
            sql.push_str(" INNER JOIN ");
            sql.push_str(&join.table.quoted(dialect));
            sql.push_str(" ON ");
            for (i, (left, right)) in join.on_conditions.iter().enumerate() {
                if i > 0 {
                    sql.push_str(" AND ");
                }
                sql.push_str(&format!("{} = {}", left.quoted(dialect), right.quoted(dialect)));
            }
        }

        self.build_where_clause(&mut sql, &mut params, dialect)?;
        self.build_order_clause(&mut sql, dialect);

        Ok((sql, params))
    }

    /// Helper method to build WHERE clauses
    fn build_where_clause(
        &self,
        sql: &mut String,
        params: &mut Vec<DatabaseValue>,
        dialect: SqlDialect,
    ) -> Result<(), QueryError> {
        if self.where_conditions.is_empty() {
            return Ok(());
        }

        sql.push_str(" WHERE ");
        for (i, condition) in self.where_conditions.iter().enumerate() {
            if i > 0 {
                sql.push_str(" AND ");
            }

            sql.push_str(&condition.column.quoted(dialect));
            sql.push(' ');
            sql.push_str(&condition.operator.to_string());

            match condition.operator {
                QueryOperator::In => {
                    if condition.values.is_empty() {
                        return Err(QueryError::InvalidParameter(format!(
                            "IN list for {} is empty",
                            condition.column.column
                        )));
                    }
                    sql.push_str(" (");
                    for (j, value) in condition.values.iter().enumerate() {
                        if j > 0 {
                            sql.push_str(", ");
                        }
                        sql.push_str(&dialect.parameter_placeholder(params.len()));
                        params.push(value.clone());
                    }
                    sql.push(')');
                }
                QueryOperator::Equal => {
                    let value = condition.values.first().ok_or_else(|| {
                        QueryError::InvalidParameter(format!(
                            "no value bound for {}",
                            condition.column.column
                        ))
                    })?;
                    sql.push(' ');
                    sql.push_str(&dialect.parameter_placeholder(params.len()));
                    params.push(value.clone());
                }
            }
        }

        Ok(())
    }

    /// Helper method to build the ORDER BY clause
    fn build_order_clause(&self, sql: &mut String, dialect: SqlDialect) {
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            let clauses: Vec<String> = self
                .order_by
                .iter()
                .map(|column| format!("{} ASC", column.quoted(dialect)))
                .collect();
            sql.push_str(&clauses.join(", "));
        }
    }
}
