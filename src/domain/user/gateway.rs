//! The external identity service boundary.

use super::entity::AuthUser;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Errors surfaced by the identity service, one variant per condition the
/// registration and login screens localize.
#[derive(Debug, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AuthError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Email already in use")]
    EmailAlreadyInUse,
    #[error("Password must be at least 6 characters")]
    WeakPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Wrong email or password")]
    WrongCredentials,
    #[error("Not signed in")]
    Unauthenticated,
    #[error("Auth backend error: {0}")]
    Backend(String),
}

/// Minimum password length enforced by the identity service.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Operation set of the external identity service.
///
/// The authentication protocol itself lives behind this trait; the crate
/// only ever sees opaque user ids and profile attributes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// The currently signed-in user, if any.
    async fn current_user(&self) -> Option<AuthUser>;

    /// Create an account and sign it in, with `display_name` set on the new
    /// identity.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthUser, AuthError>;

    /// Sign in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    /// End the current session. Signing out while signed out is a no-op.
    async fn sign_out(&self);

    /// Update the display name on an existing identity.
    async fn update_display_name(&self, user_id: &str, display_name: &str)
    -> Result<(), AuthError>;

    /// Replace the password on an existing identity.
    async fn update_password(&self, user_id: &str, new_password: &str) -> Result<(), AuthError>;
}
