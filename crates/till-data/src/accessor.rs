//! The generic per-collection accessor.

use std::sync::Arc;

use till_core::{
  Error, Record,
  kind::CollectionKind,
  materialize::materialize,
  policy::{FilterCtx, KeyRule, ListArgs, creation_stamp},
  store::RecordStore,
};
use uuid::Uuid;

/// CRUD access to one collection, with its kind's policy baked in.
///
/// # Update semantics
///
/// `update` replaces the **entire** record at its key — there is no partial
/// merge. Callers must supply the complete desired record; any field omitted
/// from the argument is silently erased from the store. This mirrors the
/// store's only write primitive (full overwrite, last-writer-wins) and is
/// deliberate: do not build read-modify-write on top of it and assume
/// atomicity, because concurrent updates to the same key are not serialized
/// by this layer.
pub struct Collection<S> {
  store: Arc<S>,
  kind:  CollectionKind,
  ctx:   FilterCtx,
}

impl<S> Clone for Collection<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
      kind:  self.kind,
      ctx:   self.ctx.clone(),
    }
  }
}

impl<S: RecordStore> Collection<S> {
  pub fn new(store: Arc<S>, kind: CollectionKind, ctx: FilterCtx) -> Self {
    Self { store, kind, ctx }
  }

  pub fn kind(&self) -> CollectionKind { self.kind }

  /// Fetch the collection snapshot and materialize it into the ordered,
  /// filtered list this kind's policy presents. An empty collection is an
  /// empty list.
  pub async fn list(&self, args: &ListArgs) -> Result<Vec<Record>, Error<S::Error>> {
    let snapshot = self
      .store
      .get_all(self.kind.name())
      .await
      .map_err(Error::Store)?;
    Ok(materialize(snapshot, self.kind.policy(), args, &self.ctx))
  }

  /// Point read. An absent key is `Ok(None)`.
  pub async fn get(&self, key: &str) -> Result<Option<Record>, Error<S::Error>> {
    self
      .store
      .get_one(self.kind.name(), key)
      .await
      .map_err(Error::Store)
  }

  /// Insert a new record and return its key.
  ///
  /// The key is derived per the kind's rule (generated, or read from the
  /// caller's record). Policy defaults and a fresh creation stamp are merged
  /// **over** the caller's fields — caller values for defaulted names are
  /// discarded. The returned key is what the order flow hands to payment.
  pub async fn insert(&self, mut record: Record) -> Result<String, Error<S::Error>> {
    let policy = self.kind.policy();

    let key = match policy.key_rule {
      KeyRule::Generated => Uuid::new_v4().to_string(),
      KeyRule::CallerProvided => record
        .str_field(policy.key_field)
        .ok_or(Error::MissingKey {
          collection: self.kind.name(),
          field:      policy.key_field,
        })?
        .to_owned(),
    };

    record.set(policy.key_field, key.as_str());
    for (field, default) in policy.defaults {
      record.set(field, default.to_value());
    }
    if let Some(field) = policy.stamp_field {
      record.set(field, creation_stamp());
    }

    tracing::debug!(collection = self.kind.name(), key = %key, "insert");
    self
      .store
      .put(self.kind.name(), &key, record)
      .await
      .map_err(Error::Store)?;
    Ok(key)
  }

  /// Replace the record at its key. The record must already carry its key
  /// field. See the type-level note: this is a full overwrite, not a merge.
  pub async fn update(&self, record: Record) -> Result<(), Error<S::Error>> {
    let policy = self.kind.policy();
    let key = record
      .str_field(policy.key_field)
      .ok_or(Error::MissingKey {
        collection: self.kind.name(),
        field:      policy.key_field,
      })?
      .to_owned();

    tracing::debug!(collection = self.kind.name(), key = %key, "update");
    self
      .store
      .put(self.kind.name(), &key, record)
      .await
      .map_err(Error::Store)
  }

  /// Remove the record at `key`. Idempotent — deleting an absent key
  /// succeeds.
  pub async fn delete(&self, key: &str) -> Result<(), Error<S::Error>> {
    tracing::debug!(collection = self.kind.name(), key = %key, "delete");
    self
      .store
      .delete(self.kind.name(), key)
      .await
      .map_err(Error::Store)
  }
}
