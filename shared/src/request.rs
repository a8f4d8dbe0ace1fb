//! Request types for the shared crate

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `POST /search` request body
///
/// An absent query or any falsy scalar (`null`, `false`, `0`) is treated as
/// the empty string. Other numbers and `true` are matched by their textual form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "lenient_query")]
    pub query: String,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

fn lenient_query<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(String::new()),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(true) => Ok("true".to_string()),
        other => Err(serde::de::Error::custom(format!(
            "query must be a string, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
