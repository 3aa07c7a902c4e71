//! Authenticated session state
//!
//! `AuthSession` owns the identity and profile collaborators and caches the
//! signed-in user's profile. Every operation records its failure message in
//! `error`. The cached profile only ever belongs to the signed-in identity: it
//! is dropped as soon as the provider switches users, even if a later step of
//! the same call fails.

use super::error::{AuthError, AuthResult};
use super::provider::{AuthProvider, ProfileStore};
use crate::models::profile::full_name;
use crate::models::{Profile, ProfilePatch};

pub struct AuthSession<A: AuthProvider, P: ProfileStore> {
    auth: A,
    profiles: P,
    profile: Option<Profile>,
    loading: bool,
    error: Option<String>,
}

impl<A: AuthProvider, P: ProfileStore> AuthSession<A, P> {
    pub fn new(auth: A, profiles: P) -> Self {
        Self {
            auth,
            profiles,
            profile: None,
            loading: false,
            error: None,
        }
    }

    /// Cached profile of the signed-in user
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// True only while an operation is running
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the most recent failure, cleared when the next call starts
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.auth.current_user(), Ok(Some(_)))
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut A {
        &mut self.auth
    }

    pub fn profiles(&self) -> &P {
        &self.profiles
    }

    pub fn profiles_mut(&mut self) -> &mut P {
        &mut self.profiles
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> AuthResult<&Profile> {
        self.track(|s| {
            s.auth.sign_in(email, password)?;
            s.profile = None;
            s.fetch_current_profile()
        })?;
        self.cached()
    }

    /// Create an identity and its profile row.
    ///
    /// If the profile insert fails the new identity is deleted again, so a
    /// failed sign-up does not leave an account without a profile behind
    /// unless that deletion fails too.
    pub fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> AuthResult<&Profile> {
        self.track(|s| {
            let name = full_name(first_name, last_name);
            let user = s.auth.sign_up(email, password, &name)?;
            s.profile = None;

            let profile = Profile::for_new_user(user.id, user.email.clone(), first_name, last_name);
            if let Err(cause) = s.profiles.insert(&profile) {
                let rollback = s.auth.delete_user(user.id).err();
                return Err(AuthError::PartialSignUp {
                    cause: cause.to_string(),
                    rollback: rollback.map(|e| e.to_string()),
                });
            }

            s.fetch_current_profile()
        })?;
        self.cached()
    }

    pub fn sign_out(&mut self) -> AuthResult<()> {
        self.track(|s| s.auth.sign_out())?;
        self.profile = None;
        Ok(())
    }

    /// Refresh the cached profile from the profile table
    pub fn load_profile(&mut self) -> AuthResult<&Profile> {
        self.track(|s| s.fetch_current_profile())?;
        self.cached()
    }

    /// Write a partial update, then merge it into the cached profile
    pub fn update_profile(&mut self, patch: &ProfilePatch) -> AuthResult<()> {
        self.track(|s| {
            let user = s.auth.current_user()?.ok_or(AuthError::NoUser)?;
            s.profiles.update(user.id, patch)?;
            if let Some(profile) = s.profile.as_mut().filter(|p| p.id == user.id) {
                profile.apply(patch);
            }
            Ok(())
        })
    }

    fn fetch_current_profile(&mut self) -> AuthResult<()> {
        let user = self.auth.current_user()?.ok_or(AuthError::NoUser)?;
        self.profile = Some(self.profiles.fetch(user.id)?);
        Ok(())
    }

    fn cached(&self) -> AuthResult<&Profile> {
        self.profile.as_ref().ok_or(AuthError::NoUser)
    }

    fn track<T>(&mut self, op: impl FnOnce(&mut Self) -> AuthResult<T>) -> AuthResult<T> {
        self.loading = true;
        self.error = None;
        let result = op(self);
        self.loading = false;
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemoryAuthProvider, MemoryProfileStore};
    use crate::models::DEFAULT_AVATAR_URL;

    fn session() -> AuthSession<MemoryAuthProvider, MemoryProfileStore> {
        AuthSession::new(MemoryAuthProvider::new(), MemoryProfileStore::new())
    }

    #[test]
    fn test_sign_up_creates_profile() {
        let mut session = session();
        let profile = session
            .sign_up("ana@example.com", "secret1", "Ana", "Lima")
            .unwrap()
            .clone();
        assert_eq!(profile.email, "ana@example.com");
        assert_eq!(profile.full_name.as_deref(), Some("Ana Lima"));
        assert_eq!(profile.avatar_url.as_deref(), Some(DEFAULT_AVATAR_URL));
        assert!(session.is_signed_in());
        assert!(!session.is_loading());
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_sign_in_loads_profile() {
        let mut session = session();
        session
            .sign_up("ana@example.com", "secret1", "Ana", "Lima")
            .unwrap();
        session.sign_out().unwrap();
        assert!(session.profile().is_none());
        assert!(!session.is_signed_in());

        let profile = session.sign_in("ana@example.com", "secret1").unwrap();
        assert_eq!(profile.display_name(), "Ana Lima");
    }

    #[test]
    fn test_failed_sign_in_keeps_state_and_records_message() {
        let mut session = session();
        session
            .sign_up("ana@example.com", "secret1", "Ana", "Lima")
            .unwrap();
        let before = session.profile().cloned();

        let err = session.sign_in("ana@example.com", "nope-nope").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(session.error(), Some("Invalid login credentials"));
        assert_eq!(session.profile().cloned(), before);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_next_call_clears_error() {
        let mut session = session();
        assert!(session.load_profile().is_err());
        assert_eq!(session.error(), Some("No user found"));

        session
            .sign_up("ana@example.com", "secret1", "Ana", "Lima")
            .unwrap();
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_failed_profile_insert_rolls_back_identity() {
        let mut session = session();
        session
            .profiles_mut()
            .fail_next_insert("permission denied for table profiles");

        let err = session
            .sign_up("ana@example.com", "secret1", "Ana", "Lima")
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::PartialSignUp {
                cause: "permission denied for table profiles".into(),
                rollback: None,
            }
        );
        assert!(!err.left_orphan());
        assert!(!session.auth().has_user("ana@example.com"));
        assert!(session.profile().is_none());
        assert!(session.profiles().is_empty());

        // The email is free again, so a retry succeeds
        session
            .sign_up("ana@example.com", "secret1", "Ana", "Lima")
            .unwrap();
        assert_eq!(session.auth().user_count(), 1);
    }

    #[test]
    fn test_failed_rollback_is_reported() {
        let mut session = session();
        session.profiles_mut().fail_next_insert("timeout");
        session.auth_mut().fail_next_delete("network down");

        let err = session
            .sign_up("ana@example.com", "secret1", "Ana", "Lima")
            .unwrap_err();
        assert!(err.left_orphan());
        assert!(session.error().unwrap().contains("network down"));
        assert!(session.auth().has_user("ana@example.com"));
    }

    #[test]
    fn test_failed_sign_up_drops_previous_users_profile() {
        let mut session = session();
        session
            .sign_up("a@example.com", "secret1", "Ana", "Lima")
            .unwrap();
        session.profiles_mut().fail_next_insert("insert failed");

        assert!(session
            .sign_up("b@example.com", "secret2", "Bea", "Costa")
            .is_err());
        assert!(!session.is_signed_in());
        assert!(session.profile().is_none());
    }

    #[test]
    fn test_sign_in_without_profile_row_drops_previous_users_profile() {
        let mut session = session();
        session
            .sign_up("a@example.com", "secret1", "Ana", "Lima")
            .unwrap();
        // An identity created outside the session has no profile row
        session
            .auth_mut()
            .sign_up("b@example.com", "secret2", "Bea Costa")
            .unwrap();
        session.sign_in("a@example.com", "secret1").unwrap();

        let err = session.sign_in("b@example.com", "secret2").unwrap_err();
        assert!(matches!(err, AuthError::ProfileNotFound(_)));
        assert!(session.is_signed_in());
        assert!(session.profile().is_none());

        let profile = session.sign_in("a@example.com", "secret1").unwrap();
        assert_eq!(profile.email, "a@example.com");
    }

    #[test]
    fn test_update_profile_merges_into_cache() {
        let mut session = session();
        session
            .sign_up("ana@example.com", "secret1", "Ana", "Lima")
            .unwrap();
        session
            .update_profile(&ProfilePatch {
                full_name: Some("Ana Souza".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(session.profile().unwrap().display_name(), "Ana Souza");

        let reloaded = session.load_profile().unwrap();
        assert_eq!(reloaded.display_name(), "Ana Souza");
    }

    #[test]
    fn test_update_profile_requires_user() {
        let mut session = session();
        let err = session
            .update_profile(&ProfilePatch::default())
            .unwrap_err();
        assert_eq!(err, AuthError::NoUser);
    }
}
