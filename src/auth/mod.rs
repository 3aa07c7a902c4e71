//! Authentication session
//!
//! Sign-in, sign-up, sign-out and profile management against a remote
//! identity service and profile table, both reached through traits so the
//! session can run against the hosted backend or the in-memory one.

pub mod error;
pub mod memory;
pub mod provider;
pub mod session;

pub use error::{AuthError, AuthResult};
pub use memory::{MemoryAuthProvider, MemoryProfileStore};
pub use provider::{AuthProvider, AuthUser, ProfileStore};
pub use session::AuthSession;
