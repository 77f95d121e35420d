//! The facade handed to the UI layer: one accessor per collection kind over
//! a shared store handle.

use std::sync::Arc;

use till_core::{kind::CollectionKind, policy::FilterCtx, store::RecordStore};

use crate::{accessor::Collection, ledger::NotificationLedger};

/// Deployment configuration for the data layer.
#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
  /// The admin-designated address whose anniversary entries every identity
  /// sees (company holidays and the like).
  pub admin_address: Option<String>,
}

/// Entry point for the UI layer. Cheap to clone; accessors share the
/// injected store.
pub struct Dashboard<S> {
  store: Arc<S>,
  ctx:   FilterCtx,
}

impl<S> Clone for Dashboard<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), ctx: self.ctx.clone() }
  }
}

impl<S: RecordStore> Dashboard<S> {
  pub fn new(store: Arc<S>, config: DashboardConfig) -> Self {
    Self {
      store,
      ctx: FilterCtx { admin_address: config.admin_address },
    }
  }

  /// The accessor for an arbitrary kind.
  pub fn collection(&self, kind: CollectionKind) -> Collection<S> {
    Collection::new(Arc::clone(&self.store), kind, self.ctx.clone())
  }

  pub fn user_info(&self) -> Collection<S> { self.collection(CollectionKind::UserInfo) }

  pub fn products(&self) -> Collection<S> { self.collection(CollectionKind::Products) }

  pub fn carts(&self) -> Collection<S> { self.collection(CollectionKind::Carts) }

  pub fn orders(&self) -> Collection<S> { self.collection(CollectionKind::Orders) }

  pub fn blogs(&self) -> Collection<S> { self.collection(CollectionKind::Blogs) }

  pub fn anniversary(&self) -> Collection<S> {
    self.collection(CollectionKind::Anniversary)
  }

  pub fn schedule(&self) -> Collection<S> { self.collection(CollectionKind::Schedule) }

  pub fn messages(&self) -> Collection<S> { self.collection(CollectionKind::Message) }

  pub fn users(&self) -> Collection<S> { self.collection(CollectionKind::Users) }

  /// The notification accessor with its unread-count and bulk-read
  /// extensions.
  pub fn notifications(&self) -> NotificationLedger<S> {
    NotificationLedger::new(self.collection(CollectionKind::Notification))
  }
}
