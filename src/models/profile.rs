//! User profile model
//!
//! Mirrors the remote `profiles` row: one per identity, keyed by the user id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Avatar assigned to new profiles
pub const DEFAULT_AVATAR_URL: &str =
    "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?q=80&w=150&auto=format&fit=crop";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Profile row written during sign-up
    pub fn for_new_user(id: UserId, email: impl Into<String>, first_name: &str, last_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: email.into(),
            full_name: Some(full_name(first_name, last_name)).filter(|name| !name.is_empty()),
            avatar_url: Some(DEFAULT_AVATAR_URL.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(name) = &patch.full_name {
            self.full_name = Some(name.clone());
        }
        if let Some(url) = &patch.avatar_url {
            self.avatar_url = Some(url.clone());
        }
        self.updated_at = Utc::now();
    }

    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }
}

/// `"First Last"`, trimmed when either part is blank
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim())
        .trim()
        .to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_profile() {
        let profile = Profile::for_new_user(UserId::new(), "ana@example.com", "Ana", "Lima");
        assert_eq!(profile.full_name.as_deref(), Some("Ana Lima"));
        assert_eq!(profile.avatar_url.as_deref(), Some(DEFAULT_AVATAR_URL));
        assert_eq!(profile.display_name(), "Ana Lima");
    }

    #[test]
    fn test_full_name_trims() {
        assert_eq!(full_name(" Ana ", ""), "Ana");
    }

    #[test]
    fn test_blank_name_falls_back_to_email() {
        let profile = Profile::for_new_user(UserId::new(), "ana@example.com", "", " ");
        assert!(profile.full_name.is_none());
        assert_eq!(profile.display_name(), "ana@example.com");
    }

    #[test]
    fn test_apply_patch() {
        let mut profile = Profile::for_new_user(UserId::new(), "ana@example.com", "Ana", "Lima");
        let created = profile.created_at;
        profile.apply(&ProfilePatch {
            full_name: Some("Ana Souza".into()),
            ..Default::default()
        });
        assert_eq!(profile.display_name(), "Ana Souza");
        assert_eq!(profile.email, "ana@example.com");
        assert_eq!(profile.created_at, created);
        assert!(profile.updated_at >= created);
    }
}
