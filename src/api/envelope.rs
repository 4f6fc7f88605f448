//! Defensive parsing of list responses.
//!
//! List endpoints answer in several shapes:
//!
//! - a bare array of records
//! - `{ "data": [...], "total": n }`
//! - `{ "data": [...], "pagination": { "total": n, ... } }`
//! - `{ "data": [...], "totalUsers": n }` (any `total*` key), or `"count": n`
//! - `{ "data": { "items": [...] , ... } }`

use serde_json::Value;

use crate::api::ApiError;

/// Records of one list response plus the total count, when the server sent one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEnvelope {
    pub data: Vec<Value>,
    pub total: Option<usize>,
}

impl ListEnvelope {
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Array(data) => Ok(Self { data, total: None }),
            Value::Object(mut map) => {
                let total = map
                    .get("pagination")
                    .and_then(total_in)
                    .or_else(|| total_in(&Value::Object(map.clone())));

                let data = match map.remove("data") {
                    Some(Value::Array(items)) => items,
                    Some(Value::Object(mut inner)) => {
                        match ["items", "docs", "results", "rows"]
                            .iter()
                            .find_map(|k| inner.remove(*k))
                        {
                            Some(Value::Array(items)) => items,
                            _ => return Err(ApiError::Decode("no record list in data".to_string())),
                        }
                    }
                    Some(Value::Null) | None => Vec::new(),
                    Some(other) => {
                        return Err(ApiError::Decode(format!(
                            "expected a list of records, got {}",
                            kind(&other)
                        )));
                    }
                };
                Ok(Self { data, total })
            }
            other => Err(ApiError::Decode(format!(
                "expected an object or array, got {}",
                kind(&other)
            ))),
        }
    }
}

/// Find a count under `total`, `count`, `totalItems`, or any other `total*` key.
fn total_in(value: &Value) -> Option<usize> {
    let map = value.as_object()?;
    let as_count = |v: &Value| v.as_u64().and_then(|n| usize::try_from(n).ok());

    ["total", "totalItems", "totalCount", "count"]
        .iter()
        .find_map(|k| map.get(*k).and_then(as_count))
        .or_else(|| {
            map.iter()
                .filter(|(k, _)| k.starts_with("total") && *k != "totalPages")
                .find_map(|(_, v)| as_count(v))
        })
}

/// Identifier of a raw record (`_id` or `id`).
pub fn extract_id(record: &Value) -> Option<String> {
    ["_id", "id"].iter().find_map(|k| match record.get(*k)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
