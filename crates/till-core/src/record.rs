//! Record — the schemaless unit of storage.
//!
//! A record is a flat mapping of field name to JSON value. The dashboard's
//! collections share no schema beyond a per-collection key field and, for
//! most kinds, a creation timestamp stamped at insert time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schemaless record: field name → JSON value.
///
/// Every record carries its collection's key field (`uid`, `id`, `oid`,
/// `mid`, or `nid`) once stored; the key value doubles as the storage path
/// segment and is immutable thereafter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
  pub fn new() -> Self { Self(Map::new()) }

  /// Wrap a JSON value, which must be an object.
  pub fn from_value(value: Value) -> Option<Self> {
    match value {
      Value::Object(map) => Some(Self(map)),
      _ => None,
    }
  }

  pub fn get(&self, field: &str) -> Option<&Value> { self.0.get(field) }

  /// The field's value as a string slice, if present and a string.
  pub fn str_field(&self, field: &str) -> Option<&str> {
    self.0.get(field).and_then(Value::as_str)
  }

  /// Set a field, replacing any previous value.
  pub fn set(&mut self, field: &str, value: impl Into<Value>) {
    self.0.insert(field.to_owned(), value.into());
  }

  pub fn contains(&self, field: &str) -> bool { self.0.contains_key(field) }

  pub fn fields(&self) -> &Map<String, Value> { &self.0 }

  pub fn into_fields(self) -> Map<String, Value> { self.0 }
}

impl From<Map<String, Value>> for Record {
  fn from(map: Map<String, Value>) -> Self { Self(map) }
}
