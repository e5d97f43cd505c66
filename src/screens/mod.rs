//! Headless screen controllers.
//!
//! Each screen owns its form or view state and exposes the operations a UI would
//! bind to. Operations that navigate return a [`NavAction`](crate::app::NavAction)
//! for the caller to hand to the [`AuthGate`](crate::app::AuthGate); login and
//! registration instead sign in through the gate, which redirects on its own.
//!
//! Failed operations return the underlying error and also keep a user-facing
//! message, readable through each screen's `error()`.

pub mod dashboard;
pub mod login;
pub mod recipe_details;
pub mod register;
pub mod settings;

pub use dashboard::DashboardScreen;
pub use login::LoginScreen;
pub use recipe_details::RecipeDetailsScreen;
pub use register::RegisterScreen;
pub use settings::SettingsScreen;
