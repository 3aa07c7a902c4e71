//! Capability traits for the remote identity service and profile table

use serde::{Deserialize, Serialize};

use super::error::AuthResult;
use crate::models::{Profile, ProfilePatch, UserId};

/// An identity as reported by the identity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    /// Name stored in the identity's metadata at sign-up
    pub full_name: Option<String>,
}

/// Email/password identity service
pub trait AuthProvider {
    /// Verify credentials and start a session
    fn sign_in(&mut self, email: &str, password: &str) -> AuthResult<AuthUser>;

    /// Create an identity and start a session for it
    fn sign_up(&mut self, email: &str, password: &str, full_name: &str) -> AuthResult<AuthUser>;

    fn sign_out(&mut self) -> AuthResult<()>;

    /// The identity of the active session, if any
    fn current_user(&self) -> AuthResult<Option<AuthUser>>;

    /// Remove an identity. Used to undo a sign-up whose profile write failed.
    fn delete_user(&mut self, id: UserId) -> AuthResult<()>;
}

/// The `profiles` table, one row per identity
pub trait ProfileStore {
    fn insert(&mut self, profile: &Profile) -> AuthResult<()>;

    fn fetch(&self, id: UserId) -> AuthResult<Profile>;

    fn update(&mut self, id: UserId, patch: &ProfilePatch) -> AuthResult<()>;
}
