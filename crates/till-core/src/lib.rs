//! Core types and trait definitions for the till data layer.
//!
//! This crate is deliberately free of network and runtime dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod identity;
pub mod kind;
pub mod materialize;
pub mod policy;
pub mod record;
pub mod store;

pub use error::Error;
pub use kind::CollectionKind;
pub use record::Record;
