//! Identity and session types.
//!
//! An identity is what the auth collaborator delivers on sign-in: an opaque
//! key plus an email. A session is that identity enriched with the derived
//! admin flag; it lives for the process lifetime and is never persisted by
//! this layer.

use serde::{Deserialize, Serialize};

/// The authenticated principal as delivered by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  /// Collection-scoped unique key; doubles as the `userInfo` storage key.
  pub uid:   String,
  pub email: String,
}

/// An identity augmented with the derived privilege flag.
///
/// `is_admin` is best-effort: when the admin set cannot be read the flag is
/// `false`, never an error — augmentation must not block sign-in delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub identity: Identity,
  pub is_admin: bool,
}
