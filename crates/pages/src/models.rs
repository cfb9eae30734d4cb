//! Rows read by the resolver and the sets it returns

use std::collections::HashMap;

use pagelinks_orm::{DatabaseRow, DatabaseRowExt, ModelError, OrmResult};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::field_data::FieldData;

/// Read an integer column, accepting numeric text
pub(crate) fn int_column(row: &dyn DatabaseRow, column: &str) -> OrmResult<i64> {
    let value = row.get_by_name(column)?;
    value.as_i64().ok_or_else(|| {
        ModelError::Serialization(format!("Column '{}' is not an integer: {:?}", column, value))
    })
}

/// Read a text column; NULL reads as an empty string
pub(crate) fn text_column(row: &dyn DatabaseRow, column: &str) -> OrmResult<String> {
    Ok(row.try_get::<String>(column)?.unwrap_or_default())
}

/// A relationship field definition with its decoded configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub namespace: String,
    pub field_type: String,
    pub data: FieldData,
}

impl FieldDefinition {
    /// Stream id this field relates entries to
    pub fn choose_stream(&self) -> Option<i64> {
        self.data.choose_stream()
    }
}

/// Fields that point at the current page's stream, with lookups by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchingFields {
    pub ids: Vec<i64>,
    pub slug_by_id: HashMap<i64, String>,
    pub name_by_id: HashMap<i64, String>,
}

impl MatchingFields {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A matching field that is assigned to a page type's stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveRelation {
    pub type_id: i64,
    pub type_slug: String,
    pub type_title: String,
    pub stream_id: i64,
    pub stream_slug: String,
    pub stream_prefix: String,
    pub field_id: i64,
}

impl ActiveRelation {
    pub fn from_row(row: &dyn DatabaseRow) -> OrmResult<Self> {
        Ok(Self {
            type_id: int_column(row, "type_id")?,
            type_slug: text_column(row, "type_slug")?,
            type_title: text_column(row, "type_title")?,
            stream_id: int_column(row, "stream_id")?,
            stream_slug: text_column(row, "stream_slug")?,
            stream_prefix: text_column(row, "stream_prefix")?,
            field_id: int_column(row, "field_id")?,
        })
    }
}

/// A canonical page row. Columns beyond the three the resolver joins on
/// are kept verbatim in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub entry_id: i64,
    pub type_id: i64,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, JsonValue>,
}

impl Page {
    pub fn from_row(row: &dyn DatabaseRow) -> OrmResult<Self> {
        let id = int_column(row, "id")?;
        let entry_id = int_column(row, "entry_id")?;
        let type_id = int_column(row, "type_id")?;

        let mut attributes = match row.to_json()? {
            JsonValue::Object(map) => map,
            other => {
                return Err(ModelError::Serialization(format!(
                    "Page row did not convert to an object: {}",
                    other
                )))
            }
        };
        for key in ["id", "entry_id", "type_id"] {
            attributes.remove(key);
        }

        Ok(Self {
            id,
            entry_id,
            type_id,
            attributes,
        })
    }

    /// A retained column, if the page table has it
    pub fn attribute(&self, column: &str) -> Option<&JsonValue> {
        self.attributes.get(column)
    }
}

/// Pages relating to the current page through one field of one page type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedPageSet {
    #[serde(flatten)]
    pub relation: ActiveRelation,
    pub field_name: String,
    pub field_slug: String,
    pub related_pages: Vec<Page>,
}
