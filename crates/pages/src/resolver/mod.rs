//! The related-pages resolver
//!
//! Resolution runs in three stages, each one query (the last one query per
//! active relation):
//!
//! 1. discover relationship fields in the namespace and keep those that
//!    point at the current page's stream ([`filter_matching`]);
//! 2. find which page types actually have those fields assigned;
//! 3. read each page type's storage table for entries referencing the page.
//!
//! Any stage coming back empty ends resolution with `Ok(None)`. Finding no
//! relations is the common case, not a failure.

mod collection;
mod discovery;
mod matching;
mod targets;


use std::sync::Arc;

use pagelinks_core::{AppConfigTrait, ResolverConfig};
use pagelinks_orm::{DatabasePool, ModelError, OrmResult};

use crate::models::RelatedPageSet;
use crate::schema::SchemaTables;

pub use matching::filter_matching;

/// Field type whose configuration names a target stream
pub const RELATIONSHIP_FIELD_TYPE: &str = "relationship";

/// Resolves pages that reference a page through relationship fields.
///
/// Holds no state between calls beyond its pool handle and settings.
pub struct RelatedPagesResolver {
    pool: Arc<dyn DatabasePool>,
    config: ResolverConfig,
    tables: SchemaTables,
}

impl RelatedPagesResolver {
    pub fn new(pool: Arc<dyn DatabasePool>, config: ResolverConfig) -> OrmResult<Self> {
        config
            .validate()
            .map_err(|e| ModelError::Configuration(e.to_string()))?;
        let tables = SchemaTables::new(&config.table_prefix)?;

        Ok(Self { pool, config, tables })
    }

    /// Pages related to `page_id`, a page whose page type uses stream
    /// `stream_id`.
    ///
    /// Returns `Ok(None)` without touching the database when either id is
    /// missing or not positive, and `Ok(None)` when nothing relates to the
    /// page. Database failures are returned as errors.
    pub async fn get_related_pages(
        &self,
        page_id: Option<i64>,
        stream_id: Option<i64>,
    ) -> OrmResult<Option<Vec<RelatedPageSet>>> {
        let (Some(page_id), Some(stream_id)) = (
            page_id.filter(|id| *id > 0),
            stream_id.filter(|id| *id > 0),
        ) else {
            tracing::debug!(?page_id, ?stream_id, "missing page or stream id, nothing to resolve");
            return Ok(None);
        };

        let fields = self.discover_relationship_fields(&self.config.namespace).await?;
        if fields.is_empty() {
            tracing::debug!(namespace = %self.config.namespace, "no relationship fields");
            return Ok(None);
        }

        let matching = filter_matching(&fields, stream_id);
        if matching.is_empty() {
            tracing::debug!(stream_id, fields = fields.len(), "no relationship field targets this stream");
            return Ok(None);
        }

        let relations = self.resolve_active_relations(&matching.ids).await?;
        if relations.is_empty() {
            tracing::debug!(fields = matching.ids.len(), "matching fields are not assigned to any page type");
            return Ok(None);
        }

        let sets = self
            .collect_related_pages(&relations, &matching.slug_by_id, &matching.name_by_id, page_id)
            .await?;
        if sets.is_empty() {
            tracing::debug!(page_id, relations = relations.len(), "no entries reference this page");
            return Ok(None);
        }

        tracing::debug!(page_id, sets = sets.len(), "resolved related pages");
        Ok(Some(sets))
    }
}
