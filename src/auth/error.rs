//! Errors surfaced by identity and profile collaborators

use thiserror::Error;

use crate::models::UserId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("No user found")]
    NoUser,

    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("User already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Password should be at least {0} characters")]
    WeakPassword(usize),

    #[error("Profile not found for {0}")]
    ProfileNotFound(UserId),

    /// Message reported by the remote service, passed through verbatim
    #[error("{0}")]
    Remote(String),

    /// The identity was created but its profile row was not
    #[error("{}", partial_sign_up_message(.cause, .rollback))]
    PartialSignUp {
        cause: String,
        /// Why removing the orphaned identity failed, if it did
        rollback: Option<String>,
    },
}

impl AuthError {
    /// Whether the remote side may hold an identity without a profile
    pub fn left_orphan(&self) -> bool {
        matches!(self, Self::PartialSignUp { rollback: Some(_), .. })
    }
}

fn partial_sign_up_message(cause: &str, rollback: &Option<String>) -> String {
    match rollback {
        None => format!("{} (the new account was removed)", cause),
        Some(rollback) => format!(
            "{} (removing the new account also failed: {})",
            cause, rollback
        ),
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
