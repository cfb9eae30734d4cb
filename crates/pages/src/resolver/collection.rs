use std::collections::HashMap;

use futures::{stream, StreamExt, TryStreamExt};
use pagelinks_orm::{DatabasePool, OrmResult, QueryBuilder};

use super::RelatedPagesResolver;
use crate::models::{ActiveRelation, Page, RelatedPageSet};
use crate::schema::column;

/// One storage-table read, built before anything is executed
struct PageLookup<'a> {
    relation: &'a ActiveRelation,
    field_name: String,
    field_slug: String,
    query: QueryBuilder,
}

impl PageLookup<'_> {
    async fn run(self, pool: &dyn DatabasePool) -> OrmResult<Option<RelatedPageSet>> {
        let rows = self.query.fetch_all(pool).await?;
        if rows.is_empty() {
            return Ok(None);
        }

        let related_pages = rows
            .iter()
            .map(|row| Page::from_row(row.as_ref()))
            .collect::<OrmResult<Vec<_>>>()?;

        Ok(Some(RelatedPageSet {
            relation: self.relation.clone(),
            field_name: self.field_name,
            field_slug: self.field_slug,
            related_pages,
        }))
    }
}

impl RelatedPagesResolver {
    /// For every relation, the pages of its page type whose entry references
    /// `page_id` through the relation's field. Relations without referencing
    /// entries are left out; the rest keep the order of `relations`.
    pub async fn collect_related_pages(
        &self,
        relations: &[ActiveRelation],
        slug_by_id: &HashMap<i64, String>,
        name_by_id: &HashMap<i64, String>,
        page_id: i64,
    ) -> OrmResult<Vec<RelatedPageSet>> {
        let lookups: Vec<PageLookup<'_>> = relations
            .iter()
            .filter_map(|relation| self.lookup_for(relation, slug_by_id, name_by_id, page_id))
            .collect();

        let pool = self.pool.as_ref();
        let sets: Vec<Option<RelatedPageSet>> = stream::iter(lookups)
            .map(|lookup| lookup.run(pool))
            .buffered(self.config.fan_out.max(1))
            .try_collect()
            .await?;

        Ok(sets.into_iter().flatten().collect())
    }

    fn lookup_for<'a>(
        &self,
        relation: &'a ActiveRelation,
        slug_by_id: &HashMap<i64, String>,
        name_by_id: &HashMap<i64, String>,
        page_id: i64,
    ) -> Option<PageLookup<'a>> {
        let Some(field_slug) = slug_by_id.get(&relation.field_id) else {
            tracing::warn!(field_id = relation.field_id, type_id = relation.type_id, "no slug for assigned field, skipping");
            return None;
        };

        match self.page_query(relation, field_slug, page_id) {
            Ok(query) => Some(PageLookup {
                relation,
                field_name: name_by_id.get(&relation.field_id).cloned().unwrap_or_default(),
                field_slug: field_slug.clone(),
                query,
            }),
            Err(e) => {
                tracing::warn!(
                    stream_prefix = %relation.stream_prefix,
                    stream_slug = %relation.stream_slug,
                    field_slug = %field_slug,
                    error = %e,
                    "unusable storage table or column, skipping relation"
                );
                None
            }
        }
    }

    fn page_query(&self, relation: &ActiveRelation, field_slug: &str, page_id: i64) -> OrmResult<QueryBuilder> {
        let pages = &self.tables.pages;
        let storage = self
            .tables
            .stream_table(&relation.stream_prefix, &relation.stream_slug)?;

        Ok(QueryBuilder::new()
            .select_all_from(pages)
            .from(&storage)
            .join(pages, column(pages, "entry_id")?, column(&storage, "id")?)
            .where_eq(column(&storage, field_slug)?, page_id)
            .where_eq(column(pages, "type_id")?, relation.type_id)
            .order_by(column(pages, "id")?))
    }
}
