//! The auth collaborator trait and user-facing credential errors.

use std::future::Future;

use thiserror::Error;

/// The external authentication provider. Sign-in and sign-out eventually
/// surface as [`crate::AuthEvent`]s on the provider's event feed; the calls
/// here only initiate them.
pub trait AuthProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn sign_in<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn sign_out(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn register<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

/// A credential failure fit for showing to the user.
///
/// The display strings are deliberately generic: wrong-password and
/// unknown-account are indistinguishable from the outside.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
  #[error("check your email or password")]
  InvalidCredentials,

  #[error("registration failed")]
  RegistrationFailed,
}

/// Initiate a sign-in, collapsing every provider failure into the one
/// generic credential message.
pub async fn sign_in<A: AuthProvider>(
  provider: &A,
  email: &str,
  password: &str,
) -> Result<(), AuthError> {
  provider.sign_in(email, password).await.map_err(|error| {
    tracing::debug!(%error, "sign-in rejected");
    AuthError::InvalidCredentials
  })
}

/// Register a new account. Failure detail stays in the logs.
pub async fn register<A: AuthProvider>(
  provider: &A,
  email: &str,
  password: &str,
) -> Result<(), AuthError> {
  provider.register(email, password).await.map_err(|error| {
    tracing::debug!(%error, "registration rejected");
    AuthError::RegistrationFailed
  })
}

/// Initiate a sign-out. Provider faults propagate; there is nothing
/// credential-shaped to hide here.
pub async fn sign_out<A: AuthProvider>(provider: &A) -> Result<(), A::Error> {
  provider.sign_out().await
}
