//! In-memory identity service and profile table
//!
//! Passwords are hashed with Argon2id and never kept in clear. Both backends
//! accept injected failures so callers can exercise their error paths.

use std::collections::HashMap;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};

use super::error::{AuthError, AuthResult};
use super::provider::{AuthProvider, AuthUser, ProfileStore};
use crate::models::{Profile, ProfilePatch, UserId};

/// Shortest password the service accepts
pub const MIN_PASSWORD_LEN: usize = 6;

struct StoredIdentity {
    user: AuthUser,
    password_hash: String,
}

/// Identity service that keeps accounts for the life of the process
pub struct MemoryAuthProvider {
    identities: Vec<StoredIdentity>,
    current: Option<UserId>,
    hasher: Argon2<'static>,
    fail_next_delete: Option<String>,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        // Lighter than the library default; these hashes never leave memory
        let params = Params::new(8 * 1024, 2, 1, None).unwrap_or_default();
        Self {
            identities: Vec::new(),
            current: None,
            hasher: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
            fail_next_delete: None,
        }
    }

    /// Make the next `delete_user` call fail with `message`
    pub fn fail_next_delete(&mut self, message: impl Into<String>) {
        self.fail_next_delete = Some(message.into());
    }

    pub fn user_count(&self) -> usize {
        self.identities.len()
    }

    pub fn has_user(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }

    fn find_by_email(&self, email: &str) -> Option<&StoredIdentity> {
        let email = normalize_email(email);
        self.identities.iter().find(|i| i.user.email == email)
    }

    fn hash_password(&self, password: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.hasher
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Remote(format!("Password hashing failed: {}", e)))
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                self.hasher
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthProvider for MemoryAuthProvider {
    fn sign_in(&mut self, email: &str, password: &str) -> AuthResult<AuthUser> {
        let identity = self
            .find_by_email(email)
            .ok_or(AuthError::InvalidCredentials)?;
        if !self.verify_password(password, &identity.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        let user = identity.user.clone();
        self.current = Some(user.id);
        Ok(user)
    }

    fn sign_up(&mut self, email: &str, password: &str, full_name: &str) -> AuthResult<AuthUser> {
        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::Remote(format!("Unable to validate email address: {}", email)));
        }
        if self.has_user(&email) {
            return Err(AuthError::AlreadyRegistered(email));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(MIN_PASSWORD_LEN));
        }

        let user = AuthUser {
            id: UserId::new(),
            email,
            full_name: Some(full_name.to_string()).filter(|name| !name.is_empty()),
        };
        let password_hash = self.hash_password(password)?;
        self.identities.push(StoredIdentity {
            user: user.clone(),
            password_hash,
        });
        self.current = Some(user.id);
        Ok(user)
    }

    fn sign_out(&mut self) -> AuthResult<()> {
        self.current = None;
        Ok(())
    }

    fn current_user(&self) -> AuthResult<Option<AuthUser>> {
        Ok(self.current.and_then(|id| {
            self.identities
                .iter()
                .find(|i| i.user.id == id)
                .map(|i| i.user.clone())
        }))
    }

    fn delete_user(&mut self, id: UserId) -> AuthResult<()> {
        if let Some(message) = self.fail_next_delete.take() {
            return Err(AuthError::Remote(message));
        }
        self.identities.retain(|i| i.user.id != id);
        if self.current == Some(id) {
            self.current = None;
        }
        Ok(())
    }
}

/// Profile table keyed by user id
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    rows: HashMap<UserId, Profile>,
    fail_next_insert: Option<String>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `insert` call fail with `message`
    pub fn fail_next_insert(&mut self, message: impl Into<String>) {
        self.fail_next_insert = Some(message.into());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn insert(&mut self, profile: &Profile) -> AuthResult<()> {
        if let Some(message) = self.fail_next_insert.take() {
            return Err(AuthError::Remote(message));
        }
        if self.rows.contains_key(&profile.id) {
            return Err(AuthError::Remote(format!(
                "duplicate key value violates unique constraint \"profiles_pkey\" ({})",
                profile.id
            )));
        }
        self.rows.insert(profile.id, profile.clone());
        Ok(())
    }

    fn fetch(&self, id: UserId) -> AuthResult<Profile> {
        self.rows
            .get(&id)
            .cloned()
            .ok_or(AuthError::ProfileNotFound(id))
    }

    fn update(&mut self, id: UserId, patch: &ProfilePatch) -> AuthResult<()> {
        let row = self.rows.get_mut(&id).ok_or(AuthError::ProfileNotFound(id))?;
        row.apply(patch);
        Ok(())
    }
}
