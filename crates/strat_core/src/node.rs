//! Readers over the structured save-document tree.
//!
//! Scalars are accepted in native form or as their string spelling, so a
//! hand-edited document still loads. Any shape mismatch or unparseable
//! scalar is fatal and carries the offending document path.

use serde_json::{Map, Value};

use crate::error::{SaveError, SaveResult};

pub(crate) fn as_map<'a>(node: &'a Value, path: &str) -> SaveResult<&'a Map<String, Value>> {
    node.as_object().ok_or_else(|| SaveError::Node {
        path: path.to_string(),
        expected: "mapping",
    })
}

pub(crate) fn as_seq<'a>(node: &'a Value, path: &str) -> SaveResult<&'a Vec<Value>> {
    node.as_array().ok_or_else(|| SaveError::Node {
        path: path.to_string(),
        expected: "sequence",
    })
}

pub(crate) fn get<'a>(
    map: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> SaveResult<&'a Value> {
    map.get(key).ok_or_else(|| SaveError::Node {
        path: format!("{path}.{key}"),
        expected: "required field",
    })
}

pub(crate) fn scalar_i64(node: &Value, path: &str) -> SaveResult<i64> {
    match node {
        Value::Number(n) => n.as_i64().ok_or_else(|| scalar_err(node, path, "integer")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| scalar_err(node, path, "integer")),
        _ => Err(scalar_err(node, path, "integer")),
    }
}

pub(crate) fn scalar_bool(node: &Value, path: &str) -> SaveResult<bool> {
    match node {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(scalar_err(node, path, "boolean")),
        },
        _ => Err(scalar_err(node, path, "boolean")),
    }
}

pub(crate) fn req_i64(map: &Map<String, Value>, path: &str, key: &str) -> SaveResult<i64> {
    scalar_i64(get(map, path, key)?, &format!("{path}.{key}"))
}

pub(crate) fn req_str<'a>(
    map: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> SaveResult<&'a str> {
    let node = get(map, path, key)?;
    node.as_str().ok_or_else(|| SaveError::Node {
        path: format!("{path}.{key}"),
        expected: "string",
    })
}

/// Missing optional field reads as `default`; a present field must parse.
pub(crate) fn opt_i64(
    map: &Map<String, Value>,
    path: &str,
    key: &str,
    default: i64,
) -> SaveResult<i64> {
    match map.get(key) {
        Some(node) => scalar_i64(node, &format!("{path}.{key}")),
        None => Ok(default),
    }
}

/// Missing optional flag reads as `false`; a present flag must parse.
pub(crate) fn opt_bool(map: &Map<String, Value>, path: &str, key: &str) -> SaveResult<bool> {
    match map.get(key) {
        Some(node) => scalar_bool(node, &format!("{path}.{key}")),
        None => Ok(false),
    }
}

fn scalar_err(node: &Value, path: &str, expected: &'static str) -> SaveError {
    SaveError::Scalar {
        path: path.to_string(),
        expected,
        raw: node.to_string(),
    }
}
