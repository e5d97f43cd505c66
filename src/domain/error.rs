//! Error types for the MealShare client core.
//!
//! This module defines the centralized error type [`MealShareError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! # Propagation
//!
//! Storage and search failures are absorbed at their component boundary (they degrade
//! to "no session" and "stale results" respectively). Form submissions (login,
//! register, save, delete) propagate their error to the initiating screen.

use thiserror::Error;

/// The main error type for MealShare client operations.
///
/// # Examples
///
/// ```
/// use mealshare::MealShareError;
///
/// fn check_password(password: &str) -> Result<(), MealShareError> {
///     if password.len() < 6 {
///         return Err(MealShareError::Validation(
///             "Password must be at least 6 characters".to_string(),
///         ));
///     }
///     Ok(())
/// }
///
/// assert!(check_password("abc").is_err());
/// ```
#[derive(Debug, Error)]
pub enum MealShareError {
    /// Durable storage read, write or parse failed.
    ///
    /// Never fatal: the session store treats it as "no session".
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote API could not be reached or answered with an unreadable body.
    ///
    /// Covers timeouts, refused connections and malformed responses.
    #[error("Network error: {0}")]
    Network(String),

    /// Client-side form validation failed before any network call was made.
    #[error("{0}")]
    Validation(String),

    /// The server rejected the credentials or the token (`401`/`403`).
    #[error("Authentication error ({status}): {message}")]
    Auth {
        /// HTTP status code returned by the server.
        status: u16,
        /// Server-provided message, or a generic description.
        message: String,
    },

    /// The server answered with any other non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Server-provided message, or a preview of the response body.
        message: String,
    },

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MealShareError {
    /// Returns the message the server attached to a rejected request, if any.
    ///
    /// Screens prefer this over their generic fallback text.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Auth { message, .. } | Self::Api { message, .. } if !message.is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

/// A specialized `Result` type for MealShare operations.
pub type Result<T> = std::result::Result<T, MealShareError>;
