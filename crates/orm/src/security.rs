//! Identifier validation for runtime-resolved table and column names
//!
//! Table and column names read from metadata rows never reach SQL as raw
//! strings. They are wrapped in [`Identifier`], which validates on
//! construction and always renders quoted.

use crate::backends::SqlDialect;
use crate::error::ModelError;
use std::fmt;

/// Characters allowed in SQL identifiers (alphanumeric, underscore, dollar)
const ALLOWED_IDENTIFIER_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_$";

/// PostgreSQL truncates identifiers beyond this many bytes
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Escape a SQL identifier (table name, column name, etc.)
///
/// Doubles any embedded quote character and wraps the identifier in the
/// dialect's quote character.
///
/// # Examples
/// ```
/// use pagelinks_orm::backends::SqlDialect;
/// use pagelinks_orm::security::escape_identifier;
///
/// assert_eq!(escape_identifier("user_table", SqlDialect::PostgreSQL), "\"user_table\"");
/// assert_eq!(escape_identifier("table\"name", SqlDialect::PostgreSQL), "\"table\"\"name\"");
/// assert_eq!(escape_identifier("pages", SqlDialect::MySQL), "`pages`");
/// ```
pub fn escape_identifier(identifier: &str, dialect: SqlDialect) -> String {
    let quote = dialect.identifier_quote();
    let escaped = identifier.replace(quote, &format!("{}{}", quote, quote));
    format!("{}{}{}", quote, escaped, quote)
}

/// Validate that an identifier is safe for use in SQL.
///
/// Identifiers are always rendered quoted, so reserved words are fine and
/// only the character set is checked. Length is handled by [`Identifier`].
pub fn validate_identifier(identifier: &str) -> Result<(), ModelError> {
    let first = identifier
        .chars()
        .next()
        .ok_or_else(|| ModelError::Validation("Identifier cannot be empty".to_string()))?;

    if let Some(c) = identifier.chars().find(|c| !ALLOWED_IDENTIFIER_CHARS.contains(*c)) {
        return Err(ModelError::Validation(format!(
            "Identifier '{}' contains invalid character '{}'",
            identifier, c
        )));
    }

    if first.is_ascii_digit() {
        return Err(ModelError::Validation(format!(
            "Identifier '{}' cannot start with a number",
            identifier
        )));
    }

    Ok(())
}

/// A validated table or column name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validate `name` and wrap it. Names longer than
    /// [`MAX_IDENTIFIER_LEN`] are cut to that length, which is the table or
    /// column PostgreSQL itself resolves them to.
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let mut name = name.into();
        validate_identifier(&name)?;
        if name.len() > MAX_IDENTIFIER_LEN {
            tracing::debug!(identifier = %name, "truncating identifier to {} bytes", MAX_IDENTIFIER_LEN);
            // validated names are ASCII, so any byte index is a char boundary
            name.truncate(MAX_IDENTIFIER_LEN);
        }
        Ok(Self(name))
    }

    /// Build an identifier by concatenating parts, validating the result.
    /// Used for dynamic storage tables named `prefix + slug`.
    pub fn concat(parts: &[&str]) -> Result<Self, ModelError> {
        Self::new(parts.concat())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render quoted for `dialect`
    pub fn quoted(&self, dialect: SqlDialect) -> String {
        escape_identifier(&self.0, dialect)
    }

    /// Qualify a column of this table
    pub fn column(&self, column: &Identifier) -> ColumnRef {
        ColumnRef {
            table: Some(self.clone()),
            column: column.clone(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A column reference, optionally qualified by its table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: Option<Identifier>,
    pub column: Identifier,
}

impl ColumnRef {
    /// Parse `"table.column"` or `"column"`, validating each part
    pub fn parse(reference: &str) -> Result<Self, ModelError> {
        match reference.split_once('.') {
            Some((table, column)) => Ok(Self {
                table: Some(Identifier::new(table)?),
                column: Identifier::new(column)?,
            }),
            None => Ok(Self {
                table: None,
                column: Identifier::new(reference)?,
            }),
        }
    }

    /// Render as `"table"."column"` for `dialect`
    pub fn quoted(&self, dialect: SqlDialect) -> String {
        match &self.table {
            Some(table) => format!("{}.{}", table.quoted(dialect), self.column.quoted(dialect)),
            None => self.column.quoted(dialect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_identifier() {
        assert_eq!(escape_identifier("user_table", SqlDialect::PostgreSQL), "\"user_table\"");
        assert_eq!(escape_identifier("table\"name", SqlDialect::PostgreSQL), "\"table\"\"name\"");
        assert_eq!(escape_identifier("odd`name", SqlDialect::MySQL), "`odd``name`");
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("data_articles").is_ok());
        assert!(validate_identifier("table1").is_ok());
        assert!(validate_identifier("_private").is_ok());
        // quoted on output, so ordinary column names stay usable
        assert!(validate_identifier("user").is_ok());

        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1table").is_err());
        assert!(validate_identifier("table-name").is_err());
        assert!(validate_identifier("table name").is_err());
        assert!(validate_identifier("update").is_ok());
        assert!(validate_identifier("CREATE").is_ok());
    }

    #[test]
    fn test_reserved_words_render_quoted() {
        let column = Identifier::new("update").unwrap();
        assert_eq!(column.quoted(SqlDialect::PostgreSQL), "\"update\"");
    }

    #[test]
    fn test_long_names_truncate_like_postgres() {
        let slug = "a_very_long_stream_slug_that_goes_on_past_the_postgres_name_limit";
        let table = Identifier::concat(&["default_", "data_", slug]).unwrap();

        assert_eq!(table.as_str().len(), MAX_IDENTIFIER_LEN);
        assert!(table.as_str().starts_with("default_data_a_very_long"));
        assert_eq!(Identifier::new("x".repeat(63)).unwrap().as_str().len(), 63);
    }

    #[test]
    fn test_concat_rejects_injection_through_slug() {
        assert!(Identifier::concat(&["data_", "articles"]).is_ok());
        assert!(Identifier::concat(&["data_", "articles; DROP TABLE pages"]).is_err());
        assert!(Identifier::concat(&["data_", "x\" OR 1=1 --"]).is_err());
    }

    #[test]
    fn test_column_ref_parse_and_quote() {
        let column = ColumnRef::parse("pages.type_id").unwrap();
        assert_eq!(column.quoted(SqlDialect::PostgreSQL), "\"pages\".\"type_id\"");

        let bare = ColumnRef::parse("slug").unwrap();
        assert_eq!(bare.quoted(SqlDialect::PostgreSQL), "\"slug\"");

        assert!(ColumnRef::parse("pages.type id").is_err());
    }

    #[test]
    fn test_qualified_column_from_table() {
        let table = Identifier::new("data_articles").unwrap();
        let column = Identifier::new("related").unwrap();
        assert_eq!(
            table.column(&column).quoted(SqlDialect::PostgreSQL),
            "\"data_articles\".\"related\""
        );
    }
}
