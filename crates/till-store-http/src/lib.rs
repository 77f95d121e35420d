//! [`HttpStore`] — the [`RecordStore`] backend for the remote realtime
//! document store's REST surface.
//!
//! Every path in the store is addressable as `{base_url}/{path}.json`: `GET`
//! reads (an absent path answers the JSON literal `null`), `PUT` replaces,
//! and `DELETE` removes idempotently. Connection management and the wire
//! protocol beyond that are the store's concern; this crate only maps the
//! typed primitives onto it.
//!
//! No retries and no timeouts: a transport fault surfaces once as
//! [`Error::Transport`], and a hung call hangs the caller.

mod error;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use till_core::{
  record::Record,
  store::{RecordStore, Snapshot},
};

pub use error::{Error, Result};

// ─── Settings ────────────────────────────────────────────────────────────────

/// Connection settings for the remote store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
  /// Root URL of the database, e.g. `https://db.example.app`.
  pub base_url:   String,
  /// Optional token sent as the `auth` query parameter on every request.
  pub auth_token: Option<String>,
}

impl StoreSettings {
  /// Load from `store.toml` (if present) overlaid with `TILL_`-prefixed
  /// environment variables (`TILL_BASE_URL`, `TILL_AUTH_TOKEN`).
  pub fn load() -> std::result::Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::with_name("store").required(false))
      .add_source(config::Environment::with_prefix("TILL"))
      .build()?
      .try_deserialize()
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A record store backed by the remote document database.
///
/// Cheap to clone — the inner HTTP client is `Arc`-based.
#[derive(Clone)]
pub struct HttpStore {
  client:   Client,
  settings: StoreSettings,
}

impl HttpStore {
  pub fn new(settings: StoreSettings) -> Self {
    Self { client: Client::new(), settings }
  }

  /// Construct from [`StoreSettings::load`].
  pub fn from_env() -> std::result::Result<Self, config::ConfigError> {
    Ok(Self::new(StoreSettings::load()?))
  }

  fn url(&self, collection: &str, key: Option<&str>) -> String {
    let base = self.settings.base_url.trim_end_matches('/');
    let mut url = match key {
      Some(key) => format!("{base}/{collection}/{key}.json"),
      None => format!("{base}/{collection}.json"),
    };
    if let Some(token) = &self.settings.auth_token {
      url.push_str("?auth=");
      url.push_str(token);
    }
    url
  }

  async fn fetch(&self, url: String) -> Result<Value> {
    let resp = self.client.get(&url).send().await?;
    ensure_success(&resp)?;
    Ok(resp.json().await?)
  }
}

fn ensure_success(resp: &reqwest::Response) -> Result<()> {
  let status = resp.status();
  if status.is_success() { Ok(()) } else { Err(Error::Status(status)) }
}

/// A point read's payload: `null` means absent.
fn decode_one(value: Value) -> Result<Option<Record>> {
  match value {
    Value::Null => Ok(None),
    other => Ok(Some(serde_json::from_value(other)?)),
  }
}

/// A subtree read's payload: `null` means the collection is empty.
fn decode_all(value: Value) -> Result<Snapshot> {
  match value {
    Value::Null => Ok(Snapshot::new()),
    other => Ok(serde_json::from_value(other)?),
  }
}

impl RecordStore for HttpStore {
  type Error = Error;

  async fn get_one(&self, collection: &str, key: &str) -> Result<Option<Record>> {
    let value = self.fetch(self.url(collection, Some(key))).await?;
    decode_one(value)
  }

  async fn get_all(&self, collection: &str) -> Result<Snapshot> {
    let value = self.fetch(self.url(collection, None)).await?;
    decode_all(value)
  }

  async fn get_root(&self, collection: &str) -> Result<Option<Value>> {
    let value = self.fetch(self.url(collection, None)).await?;
    Ok(match value {
      Value::Null => None,
      other => Some(other),
    })
  }

  async fn put(&self, collection: &str, key: &str, record: Record) -> Result<()> {
    tracing::debug!(collection, key, "put");
    let resp = self
      .client
      .put(self.url(collection, Some(key)))
      .json(&record)
      .send()
      .await?;
    ensure_success(&resp)
  }

  async fn delete(&self, collection: &str, key: &str) -> Result<()> {
    tracing::debug!(collection, key, "delete");
    let resp = self
      .client
      .delete(self.url(collection, Some(key)))
      .send()
      .await?;
    ensure_success(&resp)
  }
}
