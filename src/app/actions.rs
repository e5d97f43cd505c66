//! Navigation commands produced by screens and the search bar.
//!
//! Screens never mutate the router directly. They return a [`NavAction`] and the
//! caller hands it to [`AuthGate::navigate`](crate::app::AuthGate::navigate), which
//! applies it and then re-checks the routing invariant.
//!
//! # Example
//!
//! ```
//! use mealshare::app::{NavAction, Route};
//!
//! let action = NavAction::Push(Route::Register);
//! assert_eq!(action.target(), Some(&Route::Register));
//! ```

use crate::app::routes::Route;

/// A navigation side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    /// Opens a route on top of the current one.
    Push(Route),

    /// Swaps the current route for another without growing history.
    Replace(Route),

    /// Returns to the previous route. No-op on the root route.
    Back,
}

impl NavAction {
    /// The destination route, if the action names one.
    #[must_use]
    pub const fn target(&self) -> Option<&Route> {
        match self {
            Self::Push(route) | Self::Replace(route) => Some(route),
            Self::Back => None,
        }
    }
}
