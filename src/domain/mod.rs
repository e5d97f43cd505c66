//! Domain layer for the MealShare client.
//!
//! This module contains the core data types shared by every other layer, independent
//! of storage, HTTP or routing concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`user`]: User profile
//! - [`session`]: Session record and its shared read-only handle
//! - [`recipe`]: Recipe, ingredient and draft edit operations
//! - [`search`]: Search payload and the flattened result list
//!
//! # Examples
//!
//! ```
//! use mealshare::domain::{Session, UserProfile};
//!
//! let session = Session::authenticated("token", UserProfile::new(1, "alice"));
//! assert_eq!(session.user().map(|u| u.username.as_str()), Some("alice"));
//! ```

pub mod error;
pub mod recipe;
pub mod search;
pub mod session;
pub mod user;

pub use error::{MealShareError, Result};
pub use recipe::{Ingredient, IngredientEdit, Recipe, RecipeEdit};
pub use search::{merge_results, SearchKind, SearchResponse, SearchResult};
pub use session::{is_usable_token, Credentials, Session, SessionHandle};
pub use user::UserProfile;
