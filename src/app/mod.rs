//! Application layer: authentication, routing and the search bar.
//!
//! This layer sits between the screens and the domain/storage/api layers. Screens
//! never touch the router or the session directly; they return [`NavAction`]s and the
//! [`AuthGate`] applies them.
//!
//! # Architecture
//!
//! ```text
//! Screen ──NavAction──► AuthGate ──► Router
//!                          │  ▲
//!               sign_in /  │  │ routing invariant
//!               sign_out   ▼  │
//!                      SessionStore ──► KeyValueStore
//!
//! SearchDebouncer ──(quiet period)──► SearchApi ──► results ──select──► NavAction
//! ```
//!
//! # Modules
//!
//! - [`actions`]: navigation commands
//! - [`auth`]: session lifecycle and the routing invariant
//! - [`navigation`]: item to route mapping
//! - [`router`]: navigation stack
//! - [`routes`]: typed routes and their parameters
//! - [`search`]: debounced search bar

pub mod actions;
pub mod auth;
pub mod navigation;
pub mod router;
pub mod routes;
pub mod search;

pub use actions::NavAction;
pub use auth::{AuthGate, AuthState};
pub use router::Router;
pub use routes::{RecipeTarget, Route};
pub use search::{SearchDebouncer, SearchSnapshot, DEFAULT_QUIET_PERIOD};
