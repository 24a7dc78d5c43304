//! Deserializadores tolerantes para las filas que devuelve el graphstore.
//!
//! El graphstore no es estricto con los tipos: un `pmid` puede llegar como
//! número o como texto, un `pubchem_id` como entero, y las listas a veces
//! vienen como un escalar suelto o `null`.

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
  where D: Deserializer<'de>
{
  let value = Option::<JsonValue>::deserialize(deserializer)?;
  Ok(value.and_then(|v| scalar_to_string(&v)))
}

pub(crate) fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
  where D: Deserializer<'de>
{
  let value = Option::<JsonValue>::deserialize(deserializer)?;
  Ok(value.and_then(|v| match v {
            JsonValue::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            JsonValue::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
          }))
}

pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
  where D: Deserializer<'de>
{
  let value = Option::<JsonValue>::deserialize(deserializer)?;
  Ok(match value {
    Some(JsonValue::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
    Some(JsonValue::String(s)) if s.contains('|') => s.split('|').map(str::to_string).collect(),
    Some(other) => scalar_to_string(&other).into_iter().collect(),
    None => Vec::new(),
  })
}

pub(crate) fn scalar_to_string(value: &JsonValue) -> Option<String> {
  match value {
    JsonValue::Null => None,
    JsonValue::String(s) if s.is_empty() => None,
    JsonValue::String(s) => Some(s.clone()),
    JsonValue::Number(n) => Some(n.to_string()),
    JsonValue::Bool(b) => Some(b.to_string()),
    JsonValue::Array(items) => items.first().and_then(scalar_to_string),
    JsonValue::Object(_) => None,
  }
}

/// Convierte un valor que puede ser objeto o lista de objetos en una lista.
pub(crate) fn one_or_many(value: &JsonValue) -> Vec<&JsonValue> {
  match value {
    JsonValue::Array(items) => items.iter().collect(),
    JsonValue::Null => Vec::new(),
    other => vec![other],
  }
}
