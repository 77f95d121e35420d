//! The notification ledger — unread counting and the bulk read transition.

use futures::future::join_all;
use till_core::{
  Error, Record,
  policy::{ListArgs, STATUS_READ},
  store::RecordStore,
};

use crate::accessor::Collection;

/// The result of one write within [`NotificationLedger::mark_all_read`].
#[derive(Debug)]
pub struct WriteOutcome<E> {
  /// The record's key, empty when the record carried none.
  pub key:    String,
  pub result: Result<(), Error<E>>,
}

/// The notification collection plus its two extensions.
pub struct NotificationLedger<S> {
  inner: Collection<S>,
}

impl<S> Clone for NotificationLedger<S> {
  fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<S: RecordStore> NotificationLedger<S> {
  pub fn new(inner: Collection<S>) -> Self { Self { inner } }

  /// The plain accessor, for insert/update/delete of individual
  /// notifications.
  pub fn collection(&self) -> &Collection<S> { &self.inner }

  /// The recipient's unread notifications, newest first.
  pub async fn list(&self, email: &str) -> Result<Vec<Record>, Error<S::Error>> {
    self.inner.list(&ListArgs::email(email)).await
  }

  /// How many notifications for `email` are still unread. An empty
  /// collection or an empty match set counts as 0.
  pub async fn count_unread(&self, email: &str) -> Result<usize, Error<S::Error>> {
    Ok(self.list(email).await?.len())
  }

  /// Rewrite each record's status to read and store it back.
  ///
  /// This is a sequence of independent full-record writes, not a batch:
  /// the writes are issued concurrently with no ordering guarantee, a
  /// failure does not stop or roll back the others, and each record's
  /// outcome is reported individually.
  pub async fn mark_all_read(&self, records: Vec<Record>) -> Vec<WriteOutcome<S::Error>> {
    let key_field = self.inner.kind().policy().key_field;

    let writes = records.into_iter().map(|mut record| async move {
      let key = record.str_field(key_field).unwrap_or_default().to_owned();
      record.set("status", STATUS_READ);
      let result = self.inner.update(record).await;
      if let Err(error) = &result {
        tracing::warn!(key = %key, %error, "mark-as-read write failed");
      }
      WriteOutcome { key, result }
    });

    join_all(writes).await
  }
}
