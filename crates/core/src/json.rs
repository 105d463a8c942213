// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Defensive readers for inconsistent API payloads.
//!
//! The remote API is not uniform: reference fields arrive either as a plain
//! string ID or as a nested object, entity IDs appear under `id` or `_id`,
//! optional fields may be absent, `null`, or empty strings, and timestamps
//! come in two formats. The helpers here are shared by every custom
//! [`Deserialize`](serde::Deserialize) impl in this crate so the rest of the
//! codebase only ever sees normalized values.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::{Error, Result};

/// Legacy timestamp format still emitted by older API endpoints.
const LEGACY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a timestamp in any of the formats the API is known to emit.
///
/// Tries RFC 3339 first (with or without fractional seconds), then the
/// legacy `"YYYY-MM-DD HH:MM:SS"` form (interpreted as UTC), then a bare
/// date. Returns `None` if nothing matches.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    // RFC 3339 without offset, e.g. "2024-03-01T09:30:00"
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, LEGACY_FORMAT) {
        return Some(naive.and_utc());
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
    }
    None
}

/// Read the first present, non-null, non-empty string among the key aliases.
pub fn opt_str(obj: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match obj.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
            Some(Value::String(_)) | Some(Value::Null) | None => continue,
            // Tolerate non-string scalars where a string was expected
            Some(Value::Number(n)) => return Some(n.to_string()),
            Some(_) => continue,
        }
    }
    None
}

/// Read a required string field, erroring with the entity/field names.
pub fn req_str(obj: &Value, entity: &'static str, keys: &'static [&str]) -> Result<String> {
    opt_str(obj, keys).ok_or(Error::MissingField {
        entity,
        field: keys[0],
    })
}

/// Extract an entity ID from a value that is either a string or an object.
///
/// `"u_9"` and `{"_id": "u_9", "username": "ada"}` both yield `u_9`.
pub fn id_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(_) => opt_str(value, &["id", "_id"]),
        _ => None,
    }
}

/// Read a reference field (string ID or nested object) under any alias.
pub fn opt_ref(obj: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = obj.get(key) {
            if let Some(id) = id_of(value) {
                return Some(id);
            }
        }
    }
    None
}

/// Read a required reference field.
pub fn req_ref(obj: &Value, entity: &'static str, keys: &'static [&str]) -> Result<String> {
    opt_ref(obj, keys).ok_or(Error::MissingField {
        entity,
        field: keys[0],
    })
}

/// Read a display name for a reference field.
///
/// Prefers the nested-object form under `ref_keys`; when the reference
/// arrived as a plain string ID, falls back to the flat `name_keys` fields
/// (the shape this crate's own serializer writes, so values survive a
/// serialize/deserialize cycle).
pub fn ref_display_name(obj: &Value, ref_keys: &[&str], name_keys: &[&str]) -> Option<String> {
    for key in ref_keys {
        if let Some(value @ Value::Object(_)) = obj.get(key) {
            if let Some(name) = opt_str(value, &["display_name", "name", "username", "title"]) {
                return Some(name);
            }
        }
    }
    opt_str(obj, name_keys)
}

/// Read an array of string-or-object references under any alias.
///
/// Absent or `null` arrays normalize to empty. Malformed elements are
/// skipped with a warning rather than failing the whole payload.
pub fn id_list(obj: &Value, keys: &[&str]) -> Vec<String> {
    for key in keys {
        match obj.get(key) {
            Some(Value::Array(items)) => {
                let mut ids = Vec::with_capacity(items.len());
                for item in items {
                    match id_of(item) {
                        Some(id) => ids.push(id),
                        None => {
                            tracing::warn!(field = %key, "skipping malformed array element");
                        }
                    }
                }
                return ids;
            }
            Some(Value::Null) | None => continue,
            Some(_) => {
                tracing::warn!(field = %key, "expected array, got scalar; treating as empty");
                return Vec::new();
            }
        }
    }
    Vec::new()
}

/// Read an array of plain strings (labels, tags) under any alias.
pub fn str_list(obj: &Value, keys: &[&str]) -> Vec<String> {
    for key in keys {
        if let Some(Value::Array(items)) = obj.get(key) {
            return items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                    _ => None,
                })
                .collect();
        }
    }
    Vec::new()
}

/// Read an optional timestamp under any alias.
///
/// Unparseable values are logged and normalized to `None`.
pub fn opt_timestamp(obj: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    for key in keys {
        if let Some(raw) = opt_str(obj, &[key]) {
            match parse_timestamp(&raw) {
                Some(ts) => return Some(ts),
                None => {
                    tracing::warn!(field = %key, value = %raw, "unparseable timestamp dropped");
                    return None;
                }
            }
        }
    }
    None
}

/// Read a required timestamp, erroring on absence or unparseable input.
pub fn req_timestamp(
    obj: &Value,
    entity: &'static str,
    keys: &'static [&str],
) -> Result<DateTime<Utc>> {
    let raw = req_str(obj, entity, keys)?;
    parse_timestamp(&raw).ok_or(Error::InvalidTimestamp {
        field: keys[0],
        value: raw,
    })
}

/// Read an integer that may arrive as a JSON number or a numeric string.
pub fn opt_i64(obj: &Value, keys: &[&str]) -> Option<i64> {
    for key in keys {
        match obj.get(key) {
            Some(Value::Number(n)) => return n.as_i64(),
            Some(Value::String(s)) => {
                if let Ok(n) = s.trim().parse::<i64>() {
                    return Some(n);
                }
                tracing::warn!(field = %key, value = %s, "non-numeric string dropped");
                return None;
            }
            Some(Value::Null) | None => continue,
            Some(_) => continue,
        }
    }
    None
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
