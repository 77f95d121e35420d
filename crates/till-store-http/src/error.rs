//! Error types for `till-store-http`.

use thiserror::Error;

/// A store-side fault: transport, rejection, or an undecodable payload.
/// Absent values are not errors — they surface as `None` / empty snapshots.
#[derive(Debug, Error)]
pub enum Error {
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("store rejected the request: {0}")]
  Status(reqwest::StatusCode),

  #[error("undecodable store payload: {0}")]
  Decode(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
