//! Error types for `till-core`.

use thiserror::Error;

/// Errors surfaced by the accessor layer, generic over the backend's own
/// transport error `E`.
///
/// There is no `NotFound` variant: queries for absent keys return `Ok(None)`
/// and empty collections return empty sequences throughout.
#[derive(Debug, Error)]
pub enum Error<E> {
  /// The remote store failed. Propagated untouched — this layer never
  /// retries or swallows transport faults.
  #[error("store error: {0}")]
  Store(#[source] E),

  /// An insert or update was handed a record that lacks its collection's
  /// key field.
  #[error("record for `{collection}` is missing key field `{field}`")]
  MissingKey {
    collection: &'static str,
    field:      &'static str,
  },
}
