//! The `RecordStore` trait — typed primitives over the remote document store.
//!
//! The trait is implemented by storage backends (`till-store-http` for the
//! real remote store, `till-store-mem` for tests). Higher layers (`till-data`,
//! `till-session`) depend on this abstraction, not on any concrete backend,
//! and receive their backend by injection at construction.

use std::{collections::BTreeMap, future::Future};

use serde_json::Value;

use crate::record::Record;

/// A full read of one collection's current key→record contents at a point in
/// time. An absent or empty collection is an empty map, never an error.
pub type Snapshot = BTreeMap<String, Record>;

/// The partition whose root value is the sequence of admin identity keys.
pub const ADMIN_PARTITION: &str = "admins";

/// Abstraction over the remote document store's `{collection}/{key}` address
/// space.
///
/// All writes are full overwrites: the store resolves concurrent writers by
/// last-writer-wins at a single path, and there is no read-modify-write
/// primitive. This layer adds no retries, timeouts, or locks — transport
/// faults surface as `Self::Error` and absent values as `Ok(None)` / empty
/// snapshots.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Point read at `{collection}/{key}`. An absent path is `Ok(None)`.
  fn get_one<'a>(
    &'a self,
    collection: &'a str,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + 'a;

  /// Full-subtree read of a collection root as a key→record map.
  fn get_all<'a>(
    &'a self,
    collection: &'a str,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + 'a;

  /// Raw full-subtree read of a collection root, for partitions whose root
  /// value is not a key→record map (the [`ADMIN_PARTITION`] sequence).
  fn get_root<'a>(
    &'a self,
    collection: &'a str,
  ) -> impl Future<Output = Result<Option<Value>, Self::Error>> + Send + 'a;

  /// Replace the value at `{collection}/{key}`. Last writer wins.
  fn put<'a>(
    &'a self,
    collection: &'a str,
    key: &'a str,
    record: Record,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove the value at `{collection}/{key}`. Idempotent — deleting an
  /// absent key succeeds.
  fn delete<'a>(
    &'a self,
    collection: &'a str,
    key: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
