use crate::core::Id3Error;
use serde_json::{Map, Value};

/// A `key=value` override. Dots in the key address nested objects.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyValue {
    key: String,
    value: Value,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

pub fn apply_overrides(target: &mut Value, overrides: &[KeyValue]) -> Result<(), Id3Error> {
    for kv in overrides {
        set_path(target, &kv.key, kv.value.clone()).map_err(|e| {
            Id3Error::InvalidParameter(format!("failed to set '{}': {e}", kv.key))
        })?;
    }
    Ok(())
}

fn set_path(target: &mut Value, path: &str, new_value: Value) -> Result<(), String> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        return Err("empty key is not allowed".to_string());
    };

    let mut current = target;
    for seg in parents {
        current = object_mut(current)?
            .entry((*seg).to_string())
            .or_insert(Value::Null);
    }

    object_mut(current)?.insert((*last).to_string(), new_value);
    Ok(())
}

fn object_mut(value: &mut Value) -> Result<&mut Map<String, Value>, String> {
    if value.is_null() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => Ok(map),
        other => Err(format!(
            "cannot set nested field on non-object value: {other}"
        )),
    }
}

/// Parses `KEY=VALUE`. The value is read as a JSON literal when possible and
/// as a plain string otherwise.
pub fn parse_key_value(raw: &str) -> Result<KeyValue, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| "expected KEY=VALUE".to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("key cannot be empty".to_string());
    }

    Ok(KeyValue {
        key: key.to_string(),
        value: parse_literal(value.trim()),
    })
}

fn parse_literal(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
