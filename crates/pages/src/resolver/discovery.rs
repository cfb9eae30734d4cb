use pagelinks_orm::{DatabaseRow, OrmResult, QueryBuilder};

use super::{RelatedPagesResolver, RELATIONSHIP_FIELD_TYPE};
use crate::field_data::FieldData;
use crate::models::{int_column, text_column, FieldDefinition};
use crate::schema::column;

impl RelatedPagesResolver {
    /// Relationship fields of `namespace` whose configuration names a target
    /// stream. Fields with unreadable configuration are logged and skipped.
    pub async fn discover_relationship_fields(&self, namespace: &str) -> OrmResult<Vec<FieldDefinition>> {
        let fields = &self.tables.fields;
        let query = QueryBuilder::new()
            .select(column(fields, "id")?)
            .select(column(fields, "field_name")?)
            .select(column(fields, "field_slug")?)
            .select(column(fields, "field_namespace")?)
            .select(column(fields, "field_type")?)
            .select(column(fields, "field_data")?)
            .from(fields)
            .where_eq(column(fields, "field_type")?, RELATIONSHIP_FIELD_TYPE)
            .where_eq(column(fields, "field_namespace")?, namespace)
            .order_by(column(fields, "id")?);

        let rows = query.fetch_all(self.pool.as_ref()).await?;

        let mut definitions = Vec::with_capacity(rows.len());
        for row in &rows {
            if let Some(definition) = read_field(row.as_ref())? {
                definitions.push(definition);
            }
        }

        tracing::debug!(
            namespace,
            rows = rows.len(),
            usable = definitions.len(),
            "discovered relationship fields"
        );
        Ok(definitions)
    }
}

/// `Ok(None)` for a field whose configuration cannot be used
fn read_field(row: &dyn DatabaseRow) -> OrmResult<Option<FieldDefinition>> {
    let id = int_column(row, "id")?;
    let slug = text_column(row, "field_slug")?;

    let data = match FieldData::from_database_value(&row.get_by_name("field_data")?) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(field_id = id, field_slug = %slug, error = %e, "skipping field with unreadable configuration");
            return Ok(None);
        }
    };

    if data.choose_stream().is_none() {
        tracing::warn!(field_id = id, field_slug = %slug, "skipping relationship field without a target stream");
        return Ok(None);
    }

    Ok(Some(FieldDefinition {
        id,
        name: text_column(row, "field_name")?,
        slug,
        namespace: text_column(row, "field_namespace")?,
        field_type: text_column(row, "field_type")?,
        data,
    }))
}
