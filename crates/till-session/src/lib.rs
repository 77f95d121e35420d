//! Session state for the till dashboard.
//!
//! The auth collaborator (sign-in, sign-out, registration, and the
//! identity-change event feed) is opaque to this crate beyond the
//! [`AuthProvider`] trait and the [`AuthEvent`] stream. The
//! [`SessionPipeline`] consumes that stream and publishes each identity
//! enriched with its derived admin flag.

// Native `async fn` in traits; see till-core.
#![allow(async_fn_in_trait)]

pub mod auth;
pub mod pipeline;


pub use auth::{AuthError, AuthProvider};
pub use pipeline::{AuthEvent, SessionPipeline, SessionState};
