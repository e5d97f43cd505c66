//! Typed routes of the MealShare client.
//!
//! Each [`Route`] corresponds to one screen. Parameters that travel as query strings
//! on the wire (`userId`, `recipeId`, `isCreating`) are typed fields here, so a route
//! cannot be built with a missing or mistyped parameter.
//!
//! # Public routes
//!
//! Only [`Route::Login`] and [`Route::Register`] may be shown to a signed-out user.
//! A signed-in user is redirected away from them.

use std::collections::BTreeMap;

/// Which recipe the details screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeTarget {
    /// An existing recipe, loaded from the server by id.
    Existing(i64),
    /// A new recipe being created (the `isCreating` flag).
    New,
}

/// A screen plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Home. Resolves to the signed-in user's dashboard.
    Index,
    Login,
    Register,
    /// Recipe list of one user.
    Dashboard { user_id: i64, username: String },
    RecipeDetails(RecipeTarget),
    Settings,
}

impl Route {
    /// The route a signed-in user lands on.
    #[must_use]
    pub const fn home() -> Self {
        Self::Index
    }

    /// Whether a signed-out user may be on this route.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Index => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard { .. } => "/dashboard",
            Self::RecipeDetails(_) => "/recipeDetails",
            Self::Settings => "/settings",
        }
    }

    /// Route parameters in their wire (query string) form.
    ///
    /// # Example
    ///
    /// ```
    /// use mealshare::app::{RecipeTarget, Route};
    ///
    /// let params = Route::RecipeDetails(RecipeTarget::New).params();
    /// assert_eq!(params.get("isCreating").map(String::as_str), Some("true"));
    /// assert!(params.get("recipeId").is_none());
    /// ```
    #[must_use]
    pub fn params(&self) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();
        match self {
            Self::Dashboard { user_id, username } => {
                params.insert("userId", user_id.to_string());
                params.insert("username", username.clone());
            }
            Self::RecipeDetails(RecipeTarget::Existing(recipe_id)) => {
                params.insert("recipeId", recipe_id.to_string());
            }
            Self::RecipeDetails(RecipeTarget::New) => {
                params.insert("isCreating", "true".to_string());
            }
            Self::Index | Self::Login | Self::Register | Self::Settings => {}
        }
        params
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())?;
        let params = self.params();
        let mut separator = '?';
        for (key, value) in &params {
            write!(f, "{separator}{key}={value}")?;
            separator = '&';
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_login_and_register_are_public() {
        assert!(Route::Login.is_public());
        assert!(Route::Register.is_public());
        assert!(!Route::Index.is_public());
        assert!(!Route::Settings.is_public());
        assert!(!Route::RecipeDetails(RecipeTarget::New).is_public());
    }

    #[test]
    fn test_display_includes_params() {
        let dashboard = Route::Dashboard {
            user_id: 4,
            username: "eve".to_string(),
        };
        assert_eq!(dashboard.to_string(), "/dashboard?userId=4&username=eve");
        assert_eq!(
            Route::RecipeDetails(RecipeTarget::Existing(9)).to_string(),
            "/recipeDetails?recipeId=9"
        );
        assert_eq!(Route::Login.to_string(), "/login");
    }
}
