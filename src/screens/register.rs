//! Account creation form.

use crate::api::{AuthApi, RegisterRequest};
use crate::app::{AuthGate, NavAction, Route};
use crate::domain::error::{MealShareError, Result};

const MISSING_FIELDS: &str = "Please fill in all fields";
const PASSWORD_MISMATCH: &str = "Passwords do not match";
const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
const INVALID_EMAIL: &str = "Please enter a valid email address";
const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

const MIN_PASSWORD_LEN: usize = 6;

/// Registration screen controller.
#[derive(Debug, Clone, Default)]
pub struct RegisterScreen {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    error: Option<String>,
}

impl RegisterScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Client-side checks, first failure wins.
    fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.username.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(MISSING_FIELDS);
        }
        if self.password != self.confirm_password {
            return Err(PASSWORD_MISMATCH);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(PASSWORD_TOO_SHORT);
        }
        if !is_plausible_email(&self.email) {
            return Err(INVALID_EMAIL);
        }
        Ok(())
    }

    /// Validates the form, registers and signs the new user in through `gate`.
    ///
    /// # Errors
    ///
    /// Returns [`MealShareError::Validation`] when a client-side check fails (no API
    /// call is made), or the register/sign-in error.
    pub async fn submit(&mut self, api: &dyn AuthApi, gate: &mut AuthGate) -> Result<()> {
        self.error = None;

        if let Err(message) = self.validate() {
            self.error = Some(message.to_string());
            return Err(MealShareError::Validation(message.to_string()));
        }

        let request = RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        };

        let outcome = match api.register(&request).await {
            Ok(response) => gate.sign_in(response.token, response.user),
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            tracing::error!(error = %e, username = %self.username, "registration failed");
            self.error = Some(
                e.server_message()
                    .unwrap_or(REGISTRATION_FAILED)
                    .to_string(),
            );
        }
        outcome
    }

    #[must_use]
    pub fn go_to_login(&self) -> NavAction {
        NavAction::Push(Route::Login)
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
