//! Names of the metadata tables and of per-stream storage tables

use pagelinks_orm::{ColumnRef, Identifier, OrmResult};

/// Validated names of the tables the resolver reads, with the site prefix
/// already applied
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaTables {
    prefix: String,
    pub fields: Identifier,
    pub assignments: Identifier,
    pub page_types: Identifier,
    pub streams: Identifier,
    pub pages: Identifier,
}

impl SchemaTables {
    pub fn new(prefix: &str) -> OrmResult<Self> {
        Ok(Self {
            prefix: prefix.to_string(),
            fields: Identifier::concat(&[prefix, "data_fields"])?,
            assignments: Identifier::concat(&[prefix, "data_field_assignments"])?,
            page_types: Identifier::concat(&[prefix, "page_types"])?,
            streams: Identifier::concat(&[prefix, "data_streams"])?,
            pages: Identifier::concat(&[prefix, "pages"])?,
        })
    }

    /// Storage table of a stream: site prefix, stream prefix, stream slug
    pub fn stream_table(&self, stream_prefix: &str, stream_slug: &str) -> OrmResult<Identifier> {
        Identifier::concat(&[&self.prefix, stream_prefix, stream_slug])
    }
}

/// `table.column`, validating the column name
pub fn column(table: &Identifier, name: &str) -> OrmResult<ColumnRef> {
    Ok(table.column(&Identifier::new(name)?))
}
