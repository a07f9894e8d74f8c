//! Field deserializers that coerce instead of rejecting.
//!
//! Each helper reads the raw value and maps anything it cannot use to `None`,
//! so resolution later falls back to the default for that leaf alone.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Number, Value};
use std::str::FromStr;

/// Nested object group; non-objects count as missing
pub(super) fn group<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        if !value.is_null() {
            log::warn!("ignoring non-object config group: {}", value);
        }
        return Ok(None);
    }
    Ok(T::deserialize(value).ok())
}

/// Ordered list of objects. Malformed entries become default entries so the
/// positions of their neighbours do not shift.
pub(super) fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(None);
    };

    let list = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is_object() {
                log::warn!("list entry {} is not an object, using an empty entry", index);
                return T::default();
            }
            T::deserialize(entry).unwrap_or_default()
        })
        .collect();
    Ok(Some(list))
}

/// Text leaf; numbers and booleans are kept as their text
pub(super) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Integer leaf; numeric strings parse, fractions truncate
pub(super) fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => number_to_i64(&n),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| float_to_i64(s.parse::<f64>().ok()))
        }
        _ => None,
    })
}

fn number_to_i64(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| float_to_i64(n.as_f64()))
}

fn float_to_i64(f: Option<f64>) -> Option<i64> {
    f.filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
}

/// Boolean leaf; accepts `"true"`/`"false"` and `1`/`0`
pub(super) fn boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// List of text values (gradient stops)
pub(super) fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(None);
    };
    Ok(Some(
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
    ))
}

/// Keyword leaf parsed with `FromStr`; unknown words count as missing
pub(super) fn keyword<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s.parse().ok(),
        _ => None,
    })
}
