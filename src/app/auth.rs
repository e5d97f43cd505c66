//! Authentication gate: session lifecycle plus the routing invariant.
//!
//! [`AuthGate`] is the single writer of the process-wide session. It bootstraps the
//! session from the [`SessionStore`], performs sign-in and sign-out, owns the
//! [`Router`] and re-evaluates the routing invariant after every state change and
//! every navigation.
//!
//! # State Machine
//!
//! ```text
//!                 bootstrap (session found)
//! Bootstrapping ─────────────────────────────► SignedIn
//!       │                                       ▲   │
//!       │ bootstrap (nothing / error)  sign_in  │   │ sign_out
//!       ▼                                       │   ▼
//!   SignedOut ◄─────────────────────────────────┴───┘
//! ```
//!
//! # Routing Invariant
//!
//! - `SignedOut`: the current route must be public, otherwise replace it with login.
//! - `SignedIn`: a public route is replaced with home, and home resolves to the
//!   user's own dashboard.
//! - `Bootstrapping`: nothing is enforced, so there is no redirect flash before the
//!   stored session is known.
//!
//! Every transition takes `&mut self`, so a redirect decision never runs against a
//! half-loaded session.

use crate::app::actions::NavAction;
use crate::app::navigation;
use crate::app::router::Router;
use crate::app::routes::Route;
use crate::domain::error::{MealShareError, Result};
use crate::domain::{is_usable_token, Session, SessionHandle, UserProfile};
use crate::storage::SessionStore;

/// Authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// The stored session has not been read yet.
    Bootstrapping,
    SignedOut,
    SignedIn,
}

/// Owner of the session and the router.
///
/// # Example
///
/// ```
/// use mealshare::app::{AuthGate, AuthState, Route};
/// use mealshare::domain::UserProfile;
/// use mealshare::storage::{MemoryStore, SessionStore};
///
/// let mut gate = AuthGate::new(SessionStore::new(MemoryStore::new()), Route::Index);
/// assert_eq!(gate.bootstrap(), AuthState::SignedOut);
/// assert_eq!(gate.current_route(), &Route::Login);
///
/// gate.sign_in("token", UserProfile::new(1, "alice"))?;
/// assert!(gate.is_signed_in());
/// # Ok::<(), mealshare::MealShareError>(())
/// ```
#[derive(Debug)]
pub struct AuthGate {
    store: SessionStore,
    session: SessionHandle,
    state: AuthState,
    router: Router,
}

impl AuthGate {
    /// Creates a gate in [`AuthState::Bootstrapping`] showing `initial_route`.
    #[must_use]
    pub fn new(store: SessionStore, initial_route: Route) -> Self {
        Self {
            store,
            session: SessionHandle::default(),
            state: AuthState::Bootstrapping,
            router: Router::new(initial_route),
        }
    }

    /// Loads the stored session and leaves `Bootstrapping`.
    ///
    /// Only the first call does anything; later calls return the current state.
    pub fn bootstrap(&mut self) -> AuthState {
        if self.state != AuthState::Bootstrapping {
            tracing::debug!(state = ?self.state, "bootstrap already done");
            return self.state;
        }

        let _span = tracing::debug_span!("auth_bootstrap").entered();

        let session = self.store.load();
        self.state = if session.is_authenticated() {
            AuthState::SignedIn
        } else {
            AuthState::SignedOut
        };
        self.session.replace(session);

        tracing::info!(state = ?self.state, "auth bootstrap complete");
        self.settle();
        self.state
    }

    /// Persists the credentials, switches to `SignedIn` and redirects home.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank token or an invalid profile, or the
    /// storage error if the
    /// session could not be persisted. In both cases the state and the in-memory
    /// session are left unchanged.
    pub fn sign_in(&mut self, token: impl Into<String>, user: UserProfile) -> Result<()> {
        let token = token.into();
        let _span = tracing::debug_span!("auth_sign_in", user_id = user.id).entered();

        if !is_usable_token(&token) {
            return Err(MealShareError::Validation(
                "auth token must not be blank".to_string(),
            ));
        }
        user.validate()?;

        if let Err(e) = self.store.save(&token, &user) {
            tracing::error!(error = %e, "failed to save auth data");
            return Err(e);
        }

        self.session.replace(Session::authenticated(token, user));
        self.state = AuthState::SignedIn;
        tracing::info!("signed in");

        self.router.replace(Route::home());
        self.settle();
        Ok(())
    }

    /// Clears the session, switches to `SignedOut` and redirects to login.
    ///
    /// Always succeeds: a failure to clear durable storage is logged and the in-memory
    /// transition happens regardless.
    pub fn sign_out(&mut self) {
        let _span = tracing::debug_span!("auth_sign_out").entered();

        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "failed to remove auth data");
        }

        self.session.replace(Session::empty());
        self.state = AuthState::SignedOut;
        tracing::info!("signed out");

        self.router.replace(Route::Login);
        self.settle();
    }

    /// Applies a navigation action, then re-checks the routing invariant.
    pub fn navigate(&mut self, action: NavAction) {
        self.router.apply(action);
        self.settle();
    }

    /// Applies an optional navigation action.
    pub fn navigate_opt(&mut self, action: Option<NavAction>) {
        if let Some(action) = action {
            self.navigate(action);
        }
    }

    /// Enforces the routing invariant for the current state.
    fn settle(&mut self) {
        match self.state {
            AuthState::Bootstrapping => {}
            AuthState::SignedOut => {
                if !self.router.current().is_public() {
                    tracing::info!(from = %self.router.current(), "no auth token found, redirecting to login");
                    self.router.replace(Route::Login);
                }
            }
            AuthState::SignedIn => {
                if self.router.current().is_public() {
                    tracing::info!(from = %self.router.current(), "user already authenticated, redirecting to home");
                    self.router.replace(Route::home());
                }
                if self.router.current() == &Route::Index {
                    if let Some(user) = self.session.user() {
                        self.router.replace(navigation::dashboard_for(&user));
                    }
                }
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> AuthState {
        self.state
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.state == AuthState::SignedIn
    }

    /// Whether the navbar (and with it the search bar) is shown.
    #[must_use]
    pub fn shows_navbar(&self) -> bool {
        self.is_signed_in()
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.session.user()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Shared read-only handle for collaborators such as the API client.
    #[must_use]
    pub fn session_handle(&self) -> SessionHandle {
        self.session.clone()
    }

    #[must_use]
    pub const fn current_route(&self) -> &Route {
        self.router.current()
    }

    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }
}
