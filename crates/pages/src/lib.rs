//! # pagelinks-pages
//!
//! Finds the pages that point at a given page through relationship fields.
//!
//! A relationship field lives in a stream's storage table and holds the id
//! of a page. Its configuration blob names the stream the referenced page
//! belongs to. Given a page and its stream, [`RelatedPagesResolver`] returns
//! one [`RelatedPageSet`] per page type whose entries reference the page.

pub mod field_data;
pub mod models;
pub mod resolver;
pub mod schema;

pub use field_data::{FieldData, FieldDataError, FieldValue, CHOOSE_STREAM};
pub use models::{ActiveRelation, FieldDefinition, MatchingFields, Page, RelatedPageSet};
pub use resolver::{filter_matching, RelatedPagesResolver, RELATIONSHIP_FIELD_TYPE};
pub use schema::SchemaTables;
