//! Session model and the shared read-only handle to it.
//!
//! A [`Session`] is either empty or holds both a token and a user profile. The pair
//! lives in a single `Option<Credentials>` so a half-populated session cannot be
//! constructed.
//!
//! The process-wide session is owned by the auth gate and published through a
//! [`SessionHandle`]. Handles are cheap to clone and hand out to any reader (screens,
//! the API client's token interceptor); only the crate-internal gate can replace the
//! value.

use crate::domain::user::UserProfile;
use std::sync::{Arc, PoisonError, RwLock};

/// A token counts only if it has non-whitespace content. Shared by sign-in and load
/// so a session that was accepted is also the session restored.
#[must_use]
pub fn is_usable_token(token: &str) -> bool {
    !token.trim().is_empty()
}

/// Token and profile of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user: UserProfile,
}

/// The current authentication record: both token and user, or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credentials: Option<Credentials>,
}

impl Session {
    /// Returns a session with no token and no user.
    #[must_use]
    pub const fn empty() -> Self {
        Self { credentials: None }
    }

    #[must_use]
    pub fn authenticated(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            credentials: Some(Credentials {
                token: token.into(),
                user,
            }),
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        self.credentials.as_ref().map(|c| &c.user)
    }

    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

/// Shared, read-only view of the process-wide session.
///
/// # Example
///
/// ```
/// use mealshare::domain::SessionHandle;
///
/// let handle = SessionHandle::default();
/// assert!(handle.token().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Session>>,
}

impl SessionHandle {
    /// Returns a copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token()
            .map(str::to_owned)
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user()
            .cloned()
    }

    /// Replaces the session wholesale. Reserved for the auth gate.
    pub(crate) fn replace(&self, session: Session) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = session;
    }
}
