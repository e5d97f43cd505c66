//! Recipe list of one user.

use crate::api::RecipeApi;
use crate::app::{navigation, NavAction, Route};
use crate::domain::error::Result;
use crate::domain::{Recipe, UserProfile};

const LOAD_FAILED: &str = "Failed to load user recipes";

/// Dashboard screen controller.
///
/// Shows the recipes of `user`, who may or may not be the signed-in viewer. Only the
/// owner gets the "create recipe" action.
#[derive(Debug, Clone)]
pub struct DashboardScreen {
    user: UserProfile,
    recipes: Vec<Recipe>,
    loading: bool,
    error: Option<String>,
}

impl DashboardScreen {
    #[must_use]
    pub fn new(user_id: i64, username: impl Into<String>) -> Self {
        Self {
            user: UserProfile::new(user_id, username),
            recipes: Vec::new(),
            loading: true,
            error: None,
        }
    }

    /// Builds the screen for a [`Route::Dashboard`]; `None` for any other route.
    #[must_use]
    pub fn for_route(route: &Route) -> Option<Self> {
        match route {
            Route::Dashboard { user_id, username } => Some(Self::new(*user_id, username.clone())),
            _ => None,
        }
    }

    /// Fetches the user's recipes, replacing the current list on success.
    ///
    /// # Errors
    ///
    /// Returns the API error; the previous list is kept and
    /// [`error`](Self::error) is set.
    pub async fn load(&mut self, api: &dyn RecipeApi) -> Result<()> {
        self.loading = true;
        self.error = None;

        let outcome = api.user_recipes(self.user.id).await;
        self.loading = false;

        match outcome {
            Ok(recipes) => {
                tracing::debug!(user_id = self.user.id, count = recipes.len(), "user recipes loaded");
                self.recipes = recipes;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, user_id = self.user.id, "error fetching user recipes");
                self.error = Some(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    #[must_use]
    pub const fn user(&self) -> &UserProfile {
        &self.user
    }

    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("{}'s Recipes", self.user.username)
    }

    #[must_use]
    pub fn is_own_dashboard(&self, viewer: Option<&UserProfile>) -> bool {
        viewer.is_some_and(|v| v.id == self.user.id)
    }

    /// Opens the recipe at `index`. `None` when out of range or the entry has no id.
    #[must_use]
    pub fn open_recipe(&self, index: usize) -> Option<NavAction> {
        self.recipes
            .get(index)
            .and_then(navigation::route_for_recipe)
            .map(NavAction::Push)
    }

    /// Starts a new recipe; only offered on the viewer's own dashboard.
    #[must_use]
    pub fn create_recipe(&self, viewer: Option<&UserProfile>) -> Option<NavAction> {
        if !self.is_own_dashboard(viewer) {
            return None;
        }
        Some(NavAction::Push(navigation::route_for_new_recipe()))
    }
}
