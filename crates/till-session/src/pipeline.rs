//! The session augmentation pipeline.
//!
//! Consumes the auth collaborator's identity-change events and publishes
//! [`SessionState`] values, each sign-in enriched with the derived admin
//! flag by membership-testing the identity's key against the `admins`
//! partition.
//!
//! The admin lookup is fail-open: an absent, malformed, or unreadable admin
//! set never blocks delivery — the identity goes out with `is_admin` false.
//! A fresher event arriving while a lookup is in flight supersedes it: the
//! pending lookup is dropped and never publishes, so subscribers observe
//! states in event order even when the provider emits faster than the store
//! answers.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use till_core::{
  identity::{Identity, Session},
  store::{ADMIN_PARTITION, RecordStore},
};

/// One identity-change event from the auth collaborator, delivered exactly
/// once per actual sign-in or sign-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
  SignedIn(Identity),
  SignedOut,
}

/// The published session state. `SignedOut` is the initial value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
  #[default]
  SignedOut,
  SignedIn(Session),
}

impl SessionState {
  pub fn session(&self) -> Option<&Session> {
    match self {
      Self::SignedIn(session) => Some(session),
      Self::SignedOut => None,
    }
  }
}

/// Handle to the running pipeline task.
///
/// Dropping the handle aborts the task; dropping a subscription receiver
/// unsubscribes that subscriber. The task also winds down on its own once
/// the event channel closes, finishing any in-flight lookup first.
pub struct SessionPipeline {
  task:  tokio::task::JoinHandle<()>,
  state: watch::Receiver<SessionState>,
}

impl SessionPipeline {
  /// Start the pipeline over `store`, consuming `events`.
  pub fn spawn<S>(store: Arc<S>, events: mpsc::Receiver<AuthEvent>) -> Self
  where
    S: RecordStore + 'static,
  {
    let (tx, state) = watch::channel(SessionState::SignedOut);
    let task = tokio::spawn(run(store, events, tx));
    Self { task, state }
  }

  /// A live view of the session state. `SignedOut` until the first event
  /// lands.
  pub fn subscribe(&self) -> watch::Receiver<SessionState> { self.state.clone() }
}

impl Drop for SessionPipeline {
  fn drop(&mut self) { self.task.abort(); }
}

async fn run<S: RecordStore>(
  store: Arc<S>,
  mut events: mpsc::Receiver<AuthEvent>,
  tx: watch::Sender<SessionState>,
) {
  // An identity whose admin lookup has not completed yet.
  let mut pending: Option<Identity> = None;

  loop {
    match pending.take() {
      None => match events.recv().await {
        Some(AuthEvent::SignedIn(identity)) => pending = Some(identity),
        Some(AuthEvent::SignedOut) => {
          let _ = tx.send(SessionState::SignedOut);
        }
        None => break,
      },

      Some(identity) => {
        enum Raced {
          Event(Option<AuthEvent>),
          Admins(Option<Vec<String>>),
        }

        let lookup = admin_set(store.as_ref());
        tokio::pin!(lookup);

        let raced = tokio::select! {
          next = events.recv() => Raced::Event(next),
          admins = &mut lookup => Raced::Admins(admins),
        };

        match raced {
          // A fresher event supersedes the in-flight lookup; the pinned
          // future is dropped without publishing.
          Raced::Event(Some(AuthEvent::SignedIn(newer))) => pending = Some(newer),
          Raced::Event(Some(AuthEvent::SignedOut)) => {
            let _ = tx.send(SessionState::SignedOut);
          }
          // Channel closed mid-lookup: deliver the final sign-in, then stop.
          Raced::Event(None) => {
            publish(&tx, identity, lookup.await);
            break;
          }
          Raced::Admins(admins) => publish(&tx, identity, admins),
        }
      }
    }
  }
}

fn publish(
  tx: &watch::Sender<SessionState>,
  identity: Identity,
  admins: Option<Vec<String>>,
) {
  let is_admin = admins.is_some_and(|set| set.contains(&identity.uid));
  let _ = tx.send(SessionState::SignedIn(Session { identity, is_admin }));
}

/// Read the admin key set. `None` on absence, malformed content, or a store
/// fault — the caller treats every identity as non-admin in that case.
async fn admin_set<S: RecordStore>(store: &S) -> Option<Vec<String>> {
  match store.get_root(ADMIN_PARTITION).await {
    Ok(Some(value)) => match serde_json::from_value(value) {
      Ok(admins) => Some(admins),
      Err(error) => {
        tracing::warn!(%error, "admin set is malformed; treating as absent");
        None
      }
    },
    Ok(None) => None,
    Err(error) => {
      tracing::warn!(%error, "admin set lookup failed; signing in without it");
      None
    }
  }
}
