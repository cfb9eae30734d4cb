use pagelinks_orm::{Identifier, OrmResult, QueryBuilder};

use super::RelatedPagesResolver;
use crate::models::ActiveRelation;
use crate::schema::column;

impl RelatedPagesResolver {
    /// Page types whose stream has one of `matching_field_ids` assigned.
    ///
    /// A field that exists but is assigned nowhere contributes nothing.
    pub async fn resolve_active_relations(&self, matching_field_ids: &[i64]) -> OrmResult<Vec<ActiveRelation>> {
        if matching_field_ids.is_empty() {
            return Ok(Vec::new());
        }

        let assignments = &self.tables.assignments;
        let page_types = &self.tables.page_types;
        let streams = &self.tables.streams;

        let query = QueryBuilder::new()
            .select_as(column(page_types, "id")?, &Identifier::new("type_id")?)
            .select_as(column(page_types, "slug")?, &Identifier::new("type_slug")?)
            .select_as(column(page_types, "title")?, &Identifier::new("type_title")?)
            .select(column(page_types, "stream_id")?)
            .select(column(streams, "stream_slug")?)
            .select(column(streams, "stream_prefix")?)
            .select(column(assignments, "field_id")?)
            .from(assignments)
            .join(page_types, column(assignments, "stream_id")?, column(page_types, "stream_id")?)
            .join(streams, column(streams, "id")?, column(page_types, "stream_id")?)
            .where_in(column(assignments, "field_id")?, matching_field_ids.iter().copied())
            .where_eq(column(streams, "stream_namespace")?, self.config.namespace.as_str())
            .order_by(column(page_types, "id")?)
            .order_by(column(assignments, "field_id")?);

        let rows = query.fetch_all(self.pool.as_ref()).await?;
        let relations = rows
            .iter()
            .map(|row| ActiveRelation::from_row(row.as_ref()))
            .collect::<OrmResult<Vec<_>>>()?;

        tracing::debug!(fields = matching_field_ids.len(), relations = relations.len(), "resolved active relations");
        Ok(relations)
    }
}
