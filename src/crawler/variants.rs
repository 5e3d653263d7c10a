//! Embedded variant data extraction
//!
//! Catalog pages inline a script assignment, `var items_v = {...};`, that maps
//! product identifiers to their purchasable variants. Extraction runs in two
//! stages, locating the object literal and then decoding it, and reports
//! which stage (if any) came up empty so a missing blob can be told apart
//! from a broken one.

use crate::catalog::Variant;
use regex::Regex;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Product identifier -> variants, in source order
pub type VariantMap = HashMap<String, Vec<Variant>>;

static ITEMS_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)var\s+items_v\s*=\s*(\{.*?\});").expect("valid regex")
});

/// Result of looking for the embedded variant data on a page
#[derive(Debug, Clone, PartialEq)]
pub enum BlobOutcome {
    /// The page carries no variant assignment
    Absent,

    /// The assignment was found but its literal did not decode
    Malformed(String),

    /// The assignment decoded successfully
    Decoded(VariantMap),
}

/// Which stage, if any, came up empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobStatus {
    Absent,
    Malformed,
    Decoded,
}

impl BlobOutcome {
    pub fn status(&self) -> BlobStatus {
        match self {
            Self::Absent => BlobStatus::Absent,
            Self::Malformed(_) => BlobStatus::Malformed,
            Self::Decoded(_) => BlobStatus::Decoded,
        }
    }

    /// Collapses the outcome into a variant map, empty unless decoded
    pub fn into_variants(self) -> VariantMap {
        match self {
            Self::Decoded(map) => map,
            Self::Absent | Self::Malformed(_) => VariantMap::new(),
        }
    }
}

/// Stage one: finds the object literal assigned to `items_v`
pub fn locate_items_blob(html: &str) -> Option<&str> {
    ITEMS_ASSIGNMENT
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Stage two: decodes the object literal into variants per identifier
///
/// Entries whose value is not an array yield an empty variant list, and
/// array members that are not objects are ignored.
pub fn decode_items_blob(literal: &str) -> Result<VariantMap, serde_json::Error> {
    let items: Map<String, Value> = serde_json::from_str(literal)?;

    let mut variants = VariantMap::with_capacity(items.len());
    for (identifier, value) in items {
        let list = match value {
            Value::Array(entries) => entries
                .iter()
                .filter_map(Value::as_object)
                .map(variant_from_object)
                .collect(),
            other => {
                tracing::debug!(
                    "Variant entry for {} is not a list ({}); treating as empty",
                    identifier,
                    json_kind(&other)
                );
                Vec::new()
            }
        };
        variants.insert(identifier, list);
    }

    Ok(variants)
}

/// Runs both stages over a page's raw content
pub fn extract_embedded_variants(html: &str) -> BlobOutcome {
    let Some(literal) = locate_items_blob(html) else {
        return BlobOutcome::Absent;
    };

    match decode_items_blob(literal) {
        Ok(map) => BlobOutcome::Decoded(map),
        Err(e) => {
            tracing::error!("Failed to decode embedded variant data: {}", e);
            BlobOutcome::Malformed(e.to_string())
        }
    }
}

fn variant_from_object(object: &Map<String, Value>) -> Variant {
    Variant {
        article: object.get("art").and_then(text_value),
        mass: object.get("mass").and_then(text_value),
        price: object.get("price").and_then(number_value),
    }
}

/// Strings pass through, numbers and booleans keep their textual form
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numbers pass through unchanged; numeric strings are converted
fn number_value(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => {
            let s = s.trim();
            let number = s
                .parse::<i64>()
                .map(Number::from)
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64));
            if number.is_none() && !s.is_empty() {
                tracing::debug!("Price '{}' is not a number; leaving it absent", s);
            }
            number
        }
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
