//! Helpers for the loosely shaped JSON the API returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::catalog::parse_timestamp;

/// Returns the object under the first present wrapper key, or the value
/// itself when none of them holds an object.
pub(crate) fn unwrap_object(value: Value, wrappers: &[&str]) -> Value {
    if let Value::Object(map) = &value {
        for key in wrappers {
            if let Some(inner @ Value::Object(_)) = map.get(*key) {
                return inner.clone();
            }
        }
    }
    value
}

/// Strings, numbers and `{ "name": ... }` objects all read as text.
pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(&Value::deserialize(deserializer)?))
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map
            .get("name")
            .or_else(|| map.get("username"))
            .and_then(text_of),
        _ => None,
    }
}

/// Unparseable timestamps become `None` instead of failing the record.
pub(crate) fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_timestamp(&s).ok(),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

/// Accepts `["a", "b"]` or `"a, b"`.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.iter().filter_map(text_of).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    })
}

/// Numbers or numeric strings; anything else is `None`.
pub(crate) fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_object() {
        let wrapped = json!({"article": {"slug": "a"}, "success": true});
        assert_eq!(unwrap_object(wrapped, &["article", "data"]), json!({"slug": "a"}));

        let bare = json!({"slug": "a", "data": [1, 2]});
        assert_eq!(unwrap_object(bare.clone(), &["article", "data"]), bare);
    }

    #[test]
    fn test_text_of() {
        assert_eq!(text_of(&json!({"name": "Ada"})).as_deref(), Some("Ada"));
        assert_eq!(text_of(&json!(42)).as_deref(), Some("42"));
        assert_eq!(text_of(&json!("  ")), None);
        assert_eq!(text_of(&json!(null)), None);
    }
}
