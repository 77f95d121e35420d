//! In-memory [`RecordStore`] backend.
//!
//! Used by tests across the workspace and handy for local development. The
//! map mirrors the remote store's shape — one partition per collection name,
//! records keyed by their key field, plus raw root values for partitions that
//! are not key→record maps (the admin set).
//!
//! Writes can be made to fail on demand with [`MemStore::fail_put`], so
//! callers can exercise independent per-record failure paths without a
//! network.

use std::{
  collections::{HashMap, HashSet},
  sync::{Mutex, RwLock},
};

use serde_json::Value;
use thiserror::Error;
use till_core::{
  record::Record,
  store::{RecordStore, Snapshot},
};


/// An injected write fault.
#[derive(Debug, Error)]
#[error("injected store fault at {collection}/{key}")]
pub struct Fault {
  pub collection: String,
  pub key:        String,
}

/// A record store held entirely in process memory.
#[derive(Default)]
pub struct MemStore {
  data:       RwLock<HashMap<String, Snapshot>>,
  roots:      RwLock<HashMap<String, Value>>,
  put_faults: Mutex<HashSet<(String, String)>>,
}

impl MemStore {
  pub fn new() -> Self { Self::default() }

  /// Seed a raw root value for a partition that is not a key→record map
  /// (e.g. the `admins` sequence).
  pub fn set_root(&self, collection: &str, value: Value) {
    self
      .roots
      .write()
      .expect("roots lock")
      .insert(collection.to_owned(), value);
  }

  /// Arm a one-shot fault: the next `put` to `{collection}/{key}` fails and
  /// leaves the stored value untouched.
  pub fn fail_put(&self, collection: &str, key: &str) {
    self
      .put_faults
      .lock()
      .expect("fault lock")
      .insert((collection.to_owned(), key.to_owned()));
  }

  fn take_fault(&self, collection: &str, key: &str) -> bool {
    self
      .put_faults
      .lock()
      .expect("fault lock")
      .remove(&(collection.to_owned(), key.to_owned()))
  }
}

impl RecordStore for MemStore {
  type Error = Fault;

  async fn get_one(&self, collection: &str, key: &str) -> Result<Option<Record>, Fault> {
    let data = self.data.read().expect("data lock");
    Ok(data.get(collection).and_then(|records| records.get(key)).cloned())
  }

  async fn get_all(&self, collection: &str) -> Result<Snapshot, Fault> {
    let data = self.data.read().expect("data lock");
    Ok(data.get(collection).cloned().unwrap_or_default())
  }

  async fn get_root(&self, collection: &str) -> Result<Option<Value>, Fault> {
    if let Some(value) = self.roots.read().expect("roots lock").get(collection) {
      return Ok(Some(value.clone()));
    }
    let data = self.data.read().expect("data lock");
    match data.get(collection) {
      Some(records) if !records.is_empty() => {
        let object = records
          .iter()
          .map(|(key, record)| (key.clone(), Value::Object(record.fields().clone())))
          .collect();
        Ok(Some(Value::Object(object)))
      }
      _ => Ok(None),
    }
  }

  async fn put(&self, collection: &str, key: &str, record: Record) -> Result<(), Fault> {
    if self.take_fault(collection, key) {
      return Err(Fault { collection: collection.to_owned(), key: key.to_owned() });
    }
    let mut data = self.data.write().expect("data lock");
    data
      .entry(collection.to_owned())
      .or_default()
      .insert(key.to_owned(), record);
    Ok(())
  }

  async fn delete(&self, collection: &str, key: &str) -> Result<(), Fault> {
    let mut data = self.data.write().expect("data lock");
    if let Some(records) = data.get_mut(collection) {
      records.remove(key);
      // The remote store drops a subtree once its last child is gone.
      if records.is_empty() {
        data.remove(collection);
      }
    }
    Ok(())
  }
}
