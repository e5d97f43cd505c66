//! Session persistence on top of a [`KeyValueStore`].
//!
//! The session is stored under two keys: `token` (raw string) and `user` (JSON encoded
//! [`UserProfile`]). Both are written and removed in a single backend call.
//!
//! Loading never fails. Anything short of a complete, well-formed pair of keys is
//! reported at warn level and treated as "no session".

use crate::domain::error::{MealShareError, Result};
use crate::domain::{is_usable_token, Session, UserProfile};
use crate::storage::backend::KeyValueStore;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the serialized user profile.
pub const USER_KEY: &str = "user";

/// Loads, saves and clears the persisted session.
///
/// # Examples
///
/// ```
/// use mealshare::domain::UserProfile;
/// use mealshare::storage::{MemoryStore, SessionStore};
///
/// let mut store = SessionStore::new(MemoryStore::new());
/// store.save("abc", &UserProfile::new(1, "alice"))?;
/// assert_eq!(store.load().token(), Some("abc"));
/// # Ok::<(), mealshare::MealShareError>(())
/// ```
pub struct SessionStore {
    backend: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Reads the persisted session, falling back to [`Session::empty`].
    #[must_use]
    pub fn load(&self) -> Session {
        let _span = tracing::debug_span!("session_load").entered();

        match self.try_load() {
            Ok(session) => {
                tracing::debug!(authenticated = session.is_authenticated(), "session loaded");
                session
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load auth data, starting signed out");
                Session::empty()
            }
        }
    }

    fn try_load(&self) -> Result<Session> {
        let token = self.backend.get(TOKEN_KEY)?;
        let user_json = self.backend.get(USER_KEY)?;

        match (token, user_json) {
            (Some(token), Some(user_json)) if is_usable_token(&token) => {
                let user: UserProfile = serde_json::from_str(&user_json).map_err(|e| {
                    MealShareError::Storage(format!("stored user is malformed: {e}"))
                })?;
                user.validate()?;
                Ok(Session::authenticated(token, user))
            }
            (None, None) => Ok(Session::empty()),
            (token, user) => Err(MealShareError::Storage(format!(
                "partial session on disk (token present: {}, user present: {})",
                token.as_deref().is_some_and(is_usable_token),
                user.is_some()
            ))),
        }
    }

    /// Persists a token and user together.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be serialized or the backend write fails.
    pub fn save(&mut self, token: &str, user: &UserProfile) -> Result<()> {
        let _span = tracing::debug_span!("session_save", user_id = user.id).entered();

        let user_json = serde_json::to_string(user)
            .map_err(|e| MealShareError::Storage(format!("failed to serialize user: {e}")))?;

        self.backend
            .set_many(&[(TOKEN_KEY, token.to_string()), (USER_KEY, user_json)])?;

        tracing::debug!("session saved");
        Ok(())
    }

    /// Removes the persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend removal fails.
    pub fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("session_clear").entered();

        self.backend.remove_many(&[TOKEN_KEY, USER_KEY])?;

        tracing::debug!("session cleared");
        Ok(())
    }
}
