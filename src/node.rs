//! Parsed JSON tree with typed numeric subtypes.
//!
//! `serde_json::Value` collapses numbers into a single `Number` type. Field
//! extraction needs to know which subtype a literal was read as (32-bit,
//! 64-bit or arbitrary-precision integer; single, double or decimal
//! fraction), so the payload is converted into [`JsonNode`] after parsing.

use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use num_bigint::BigInt;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

/// Shared sentinel returned by lookups that do not resolve.
static MISSING: JsonNode = JsonNode::Missing;

/// A node of a parsed JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNode {
    Object(IndexMap<String, JsonNode>),
    Array(Vec<JsonNode>),
    String(String),
    /// Integer literal that fits in 32 bits
    Int(i32),
    /// Integer literal that fits in 64 bits but not 32
    Long(i64),
    /// Integer literal wider than 64 bits
    BigInteger(BigInt),
    /// Fractional literal read at single precision
    Float(f32),
    /// Fractional literal read at double precision
    Double(f64),
    /// Fractional literal kept exact
    BigDecimal(BigDecimal),
    Boolean(bool),
    Null,
    /// Result of a lookup that did not resolve. Distinct from JSON `null`.
    Missing,
}

/// Discriminant of a [`JsonNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Int,
    Long,
    BigInteger,
    Float,
    Double,
    BigDecimal,
    Boolean,
    Null,
    Missing,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Int => "int",
            NodeKind::Long => "long",
            NodeKind::BigInteger => "big integer",
            NodeKind::Float => "float",
            NodeKind::Double => "double",
            NodeKind::BigDecimal => "big decimal",
            NodeKind::Boolean => "boolean",
            NodeKind::Null => "null",
            NodeKind::Missing => "missing",
        };
        f.write_str(name)
    }
}

/// How fractional number literals are materialized in the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FractionalNumbers {
    /// Double precision floating point
    #[default]
    Double,
    /// Exact arbitrary-precision decimal
    Decimal,
    /// Single precision floating point
    Float,
}

impl FromStr for FractionalNumbers {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "double" => Ok(Self::Double),
            "decimal" => Ok(Self::Decimal),
            "float" => Ok(Self::Float),
            other => Err(other.to_string()),
        }
    }
}

/// Errors that can occur while parsing an event payload.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload top level is {0}, expected an object")]
    NotAnObject(NodeKind),
}

impl JsonNode {
    /// Parse a payload whose top-level value must be a JSON object.
    ///
    /// Bytes are decoded lossily: invalid UTF-8 sequences become U+FFFD
    /// and parsing continues.
    pub fn parse_object(bytes: &[u8], fractional: FractionalNumbers) -> Result<Self, ParseError> {
        let text = String::from_utf8_lossy(bytes);
        let value: JsonValue = serde_json::from_str(&text)?;
        match Self::from_value(value, fractional) {
            node @ JsonNode::Object(_) => Ok(node),
            other => Err(ParseError::NotAnObject(other.kind())),
        }
    }

    /// Convert a `serde_json` value into a typed tree.
    pub fn from_value(value: JsonValue, fractional: FractionalNumbers) -> Self {
        match value {
            JsonValue::Null => JsonNode::Null,
            JsonValue::Bool(b) => JsonNode::Boolean(b),
            JsonValue::String(s) => JsonNode::String(s),
            JsonValue::Number(n) => from_number(&n, fractional),
            JsonValue::Array(items) => JsonNode::Array(
                items
                    .into_iter()
                    .map(|item| Self::from_value(item, fractional))
                    .collect(),
            ),
            JsonValue::Object(fields) => JsonNode::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Self::from_value(v, fractional)))
                    .collect(),
            ),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            JsonNode::Object(_) => NodeKind::Object,
            JsonNode::Array(_) => NodeKind::Array,
            JsonNode::String(_) => NodeKind::String,
            JsonNode::Int(_) => NodeKind::Int,
            JsonNode::Long(_) => NodeKind::Long,
            JsonNode::BigInteger(_) => NodeKind::BigInteger,
            JsonNode::Float(_) => NodeKind::Float,
            JsonNode::Double(_) => NodeKind::Double,
            JsonNode::BigDecimal(_) => NodeKind::BigDecimal,
            JsonNode::Boolean(_) => NodeKind::Boolean,
            JsonNode::Null => NodeKind::Null,
            JsonNode::Missing => NodeKind::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, JsonNode::Missing)
    }

    /// The missing-node sentinel.
    pub fn missing() -> &'static JsonNode {
        &MISSING
    }

    /// Look up an object field. Anything other than an object holding
    /// `field` yields the missing sentinel.
    pub fn get(&self, field: &str) -> &JsonNode {
        match self {
            JsonNode::Object(fields) => fields.get(field).unwrap_or(&MISSING),
            _ => &MISSING,
        }
    }

    /// Compact JSON encoding of this node.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl fmt::Display for JsonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

/// Integers take the narrowest of 32-bit, 64-bit or big integer. Fractions
/// (any literal with a `.` or exponent) follow `fractional`.
fn from_number(number: &serde_json::Number, fractional: FractionalNumbers) -> JsonNode {
    let literal = number.to_string();

    if !literal.contains(['.', 'e', 'E']) {
        if let Ok(v) = literal.parse::<i32>() {
            return JsonNode::Int(v);
        }
        if let Ok(v) = literal.parse::<i64>() {
            return JsonNode::Long(v);
        }
        if let Ok(v) = literal.parse::<BigInt>() {
            return JsonNode::BigInteger(v);
        }
    }

    let parsed = match fractional {
        FractionalNumbers::Double => literal.parse::<f64>().ok().map(JsonNode::Double),
        FractionalNumbers::Float => literal.parse::<f32>().ok().map(JsonNode::Float),
        FractionalNumbers::Decimal => BigDecimal::from_str(&literal).ok().map(JsonNode::BigDecimal),
    };

    parsed.unwrap_or_else(|| JsonNode::Double(number.as_f64().unwrap_or_default()))
}

impl Serialize for JsonNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonNode::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            JsonNode::Array(items) => serializer.collect_seq(items),
            JsonNode::String(s) => serializer.serialize_str(s),
            JsonNode::Int(v) => serializer.serialize_i32(*v),
            JsonNode::Long(v) => serializer.serialize_i64(*v),
            JsonNode::BigInteger(v) => serialize_literal(&v.to_string(), serializer),
            JsonNode::Float(v) if !v.is_finite() => {
                serializer.serialize_str(&non_finite_text(f64::from(*v)))
            }
            JsonNode::Float(v) => serializer.serialize_f32(*v),
            JsonNode::Double(v) if !v.is_finite() => serializer.serialize_str(&non_finite_text(*v)),
            JsonNode::Double(v) => serializer.serialize_f64(*v),
            JsonNode::BigDecimal(v) => serialize_literal(&v.to_string(), serializer),
            JsonNode::Boolean(b) => serializer.serialize_bool(*b),
            JsonNode::Null | JsonNode::Missing => serializer.serialize_unit(),
        }
    }
}

/// Text for NaN and the infinities. JSON has no literal for them, so they
/// are written as strings.
pub(crate) fn non_finite_text(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

/// Write a number literal verbatim, keeping precision beyond 64 bits.
fn serialize_literal<S: Serializer>(literal: &str, serializer: S) -> Result<S::Ok, S::Error> {
    match serde_json::Number::from_str(literal) {
        Ok(number) => number.serialize(serializer),
        Err(_) => serializer.serialize_str(literal),
    }
}
