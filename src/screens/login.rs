//! Sign-in form.

use crate::api::{AuthApi, LoginRequest};
use crate::app::{AuthGate, NavAction, Route};
use crate::domain::error::{MealShareError, Result};

const MISSING_FIELDS: &str = "Please enter both username and password";
const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

/// Login screen controller.
///
/// On success the gate redirects to the user's dashboard; the screen itself never
/// navigates after a login.
#[derive(Debug, Clone, Default)]
pub struct LoginScreen {
    pub username: String,
    pub password: String,
    error: Option<String>,
}

impl LoginScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Message to show above the form, if the last submit failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates the form, logs in and signs the user in through `gate`.
    ///
    /// # Errors
    ///
    /// Returns [`MealShareError::Validation`] for an incomplete form without calling
    /// the API, or the login/sign-in error. [`error`](Self::error) holds the
    /// user-facing message in both cases.
    pub async fn submit(&mut self, api: &dyn AuthApi, gate: &mut AuthGate) -> Result<()> {
        self.error = None;

        if self.username.is_empty() || self.password.is_empty() {
            self.error = Some(MISSING_FIELDS.to_string());
            return Err(MealShareError::Validation(MISSING_FIELDS.to_string()));
        }

        let request = LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        };

        let outcome = match api.login(&request).await {
            Ok(response) => gate.sign_in(response.token, response.user),
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            tracing::warn!(error = %e, username = %self.username, "login failed");
            self.error = Some(e.server_message().unwrap_or(LOGIN_FAILED).to_string());
        }
        outcome
    }

    #[must_use]
    pub fn go_to_register(&self) -> NavAction {
        NavAction::Push(Route::Register)
    }
}
