//! User profile model.

use crate::domain::error::{MealShareError, Result};
use serde::{Deserialize, Serialize};

/// Public profile of a MealShare user.
///
/// Owned by the session once signed in and replaced, never mutated, until the next
/// sign-in. Extra fields the server sends (such as `email`) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
}

impl UserProfile {
    #[must_use]
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    /// Checks that the id is positive and the username non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`MealShareError::Validation`] describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.id <= 0 {
            return Err(MealShareError::Validation(format!(
                "user id must be positive, got {}",
                self.id
            )));
        }
        if self.username.trim().is_empty() {
            return Err(MealShareError::Validation(
                "username must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
