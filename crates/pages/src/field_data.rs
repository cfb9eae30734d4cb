//! Field configuration blobs
//!
//! Field definitions carry their type-specific settings as an opaque blob.
//! Older installs store it in PHP `serialize()` format, newer ones as a JSON
//! object. Both decode into [`FieldData`], a loosely typed map whose keys are
//! looked up with explicit presence checks.

use std::collections::BTreeMap;

use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_till1},
    character::complete::{char, digit1, one_of},
    combinator::{map, map_res, opt, recognize, value},
    error::{Error as NomError, ErrorKind},
    multi::count,
    sequence::{delimited, pair, terminated},
    IResult, Parser,
};
use pagelinks_orm::DatabaseValue;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Key naming the stream a relationship field points at
pub const CHOOSE_STREAM: &str = "choose_stream";

/// Deepest array/object nesting accepted in a serialized blob
pub const MAX_DEPTH: usize = 32;

/// Errors raised while decoding a configuration blob
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldDataError {
    #[error("field data is empty")]
    Empty,

    #[error("field data is not valid JSON: {0}")]
    Json(String),

    #[error("malformed serialized field data at byte {offset}")]
    Malformed { offset: usize },

    #[error("serialized field data nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("field data decoded to a {found} instead of a map")]
    NotAMap { found: &'static str },
}

/// A single decoded value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::String(_) => "string",
            FieldValue::Map(_) => "map",
        }
    }

    /// Integer view; numeric strings count, since forms post ids as text
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn from_json(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => FieldValue::Null,
            JsonValue::Bool(b) => FieldValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => n.as_f64().map(FieldValue::Float).unwrap_or(FieldValue::Null),
            },
            JsonValue::String(s) => FieldValue::String(s),
            JsonValue::Array(items) => FieldValue::Map(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), FieldValue::from_json(item)))
                    .collect(),
            ),
            JsonValue::Object(entries) => FieldValue::Map(
                entries
                    .into_iter()
                    .map(|(key, item)| (key, FieldValue::from_json(item)))
                    .collect(),
            ),
        }
    }
}

/// Decoded configuration of one field definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldData {
    entries: BTreeMap<String, FieldValue>,
}

impl FieldData {
    /// Decode a stored blob, JSON or PHP-serialized
    pub fn decode(blob: &str) -> Result<Self, FieldDataError> {
        let trimmed = blob.trim();
        if trimmed.is_empty() {
            return Err(FieldDataError::Empty);
        }

        let decoded = if trimmed.starts_with('{') || trimmed.starts_with('[') {
            let json: JsonValue =
                serde_json::from_str(trimmed).map_err(|e| FieldDataError::Json(e.to_string()))?;
            FieldValue::from_json(json)
        } else {
            decode_serialized(trimmed.as_bytes())?
        };

        Self::from_value(decoded)
    }

    /// Decode whatever the driver handed back for the blob column
    pub fn from_database_value(value: &DatabaseValue) -> Result<Self, FieldDataError> {
        match value {
            DatabaseValue::Null => Err(FieldDataError::Empty),
            DatabaseValue::String(blob) => Self::decode(blob),
            DatabaseValue::Bytes(bytes) => Self::decode(&String::from_utf8_lossy(bytes)),
            DatabaseValue::Json(json) => Self::from_value(FieldValue::from_json(json.clone())),
            _ => Err(FieldDataError::NotAMap { found: "scalar" }),
        }
    }

    fn from_value(value: FieldValue) -> Result<Self, FieldDataError> {
        match value {
            FieldValue::Map(entries) => Ok(Self { entries }),
            other => Err(FieldDataError::NotAMap { found: other.kind() }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Target stream id of a relationship field. `None` when the key is
    /// absent or holds something that is not an id.
    pub fn choose_stream(&self) -> Option<i64> {
        self.get(CHOOSE_STREAM).and_then(FieldValue::as_i64)
    }
}

/// Decode PHP `serialize()` output, requiring the whole input to be consumed
fn decode_serialized(input: &[u8]) -> Result<FieldValue, FieldDataError> {
    match php_value(input, 0) {
        Ok((rest, decoded)) if rest.is_empty() => Ok(decoded),
        Ok((rest, _)) => Err(FieldDataError::Malformed {
            offset: input.len() - rest.len(),
        }),
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => {
            Err(FieldDataError::TooDeep { limit: MAX_DEPTH })
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(FieldDataError::Malformed {
            offset: input.len() - e.input.len(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(FieldDataError::Malformed { offset: input.len() }),
    }
}

fn php_value(input: &[u8], depth: usize) -> IResult<&[u8], FieldValue> {
    if depth > MAX_DEPTH {
        return Err(nom::Err::Failure(NomError::new(input, ErrorKind::TooLarge)));
    }

    alt((
        value(FieldValue::Null, tag("N;")),
        php_bool,
        php_int,
        php_float,
        map(php_string, FieldValue::String),
        |i| php_array(i, depth),
        |i| php_object(i, depth),
    ))
    .parse(input)
}

fn unsigned(input: &[u8]) -> IResult<&[u8], usize> {
    map_res(digit1, |digits: &[u8]| {
        std::str::from_utf8(digits)
            .map_err(|_| ())
            .and_then(|s| s.parse::<usize>().map_err(|_| ()))
    })
    .parse(input)
}

fn signed(input: &[u8]) -> IResult<&[u8], i64> {
    map_res(recognize(pair(opt(one_of("+-")), digit1)), |digits: &[u8]| {
        std::str::from_utf8(digits)
            .map_err(|_| ())
            .and_then(|s| s.parse::<i64>().map_err(|_| ()))
    })
    .parse(input)
}

/// `<len>:"<len bytes>"`
fn quoted_bytes(input: &[u8]) -> IResult<&[u8], &[u8]> {
    let (input, len) = terminated(unsigned, tag(":\"")).parse(input)?;
    terminated(take(len), char('"')).parse(input)
}

fn php_bool(input: &[u8]) -> IResult<&[u8], FieldValue> {
    map(delimited(tag("b:"), one_of("01"), char(';')), |flag| {
        FieldValue::Bool(flag == '1')
    })
    .parse(input)
}

fn php_int(input: &[u8]) -> IResult<&[u8], FieldValue> {
    map(delimited(tag("i:"), signed, char(';')), FieldValue::Int).parse(input)
}

fn php_float(input: &[u8]) -> IResult<&[u8], FieldValue> {
    let number = map_res(take_till1(|b: u8| b == b';'), |raw: &[u8]| {
        std::str::from_utf8(raw)
            .map_err(|_| ())
            .and_then(|s| s.parse::<f64>().map_err(|_| ()))
    });
    map(delimited(tag("d:"), number, char(';')), FieldValue::Float).parse(input)
}

fn php_string(input: &[u8]) -> IResult<&[u8], String> {
    map(delimited(tag("s:"), quoted_bytes, char(';')), |bytes: &[u8]| {
        String::from_utf8_lossy(bytes).into_owned()
    })
    .parse(input)
}

fn php_key(input: &[u8]) -> IResult<&[u8], String> {
    alt((
        map(delimited(tag("i:"), signed, char(';')), |i: i64| i.to_string()),
        php_string,
    ))
    .parse(input)
}

/// `{` followed by `len` key/value pairs and `}`
fn php_entries(
    input: &[u8],
    len: usize,
    depth: usize,
) -> IResult<&[u8], BTreeMap<String, FieldValue>> {
    let entry = pair(php_key, |i| php_value(i, depth + 1));
    let (input, entries) = delimited(char('{'), count(entry, len), char('}')).parse(input)?;
    Ok((input, entries.into_iter().collect()))
}

fn php_array(input: &[u8], depth: usize) -> IResult<&[u8], FieldValue> {
    let (input, len) = delimited(tag("a:"), unsigned, char(':')).parse(input)?;
    let (input, entries) = php_entries(input, len, depth)?;
    Ok((input, FieldValue::Map(entries)))
}

/// Objects decode like arrays; the class name is dropped and private or
/// protected property names lose their `\0Class\0` / `\0*\0` marker.
fn php_object(input: &[u8], depth: usize) -> IResult<&[u8], FieldValue> {
    let (input, _class) = delimited(tag("O:"), quoted_bytes, char(':')).parse(input)?;
    let (input, len) = terminated(unsigned, char(':')).parse(input)?;
    let (input, entries) = php_entries(input, len, depth)?;

    let properties = entries
        .into_iter()
        .map(|(key, item)| {
            let name = match key.strip_prefix('\0') {
                Some(scoped) => scoped
                    .split_once('\0')
                    .map(|(_, name)| name.to_string())
                    .unwrap_or_else(|| scoped.to_string()),
                None => key,
            };
            (name, item)
        })
        .collect();

    Ok((input, FieldValue::Map(properties)))
}
