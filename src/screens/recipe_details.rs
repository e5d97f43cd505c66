//! Recipe viewer and editor.
//!
//! The screen keeps two copies of the recipe: the last version known to the server
//! and an edit buffer. Edits only touch the buffer; [`cancel`](RecipeDetailsScreen::cancel)
//! restores it and [`save`](RecipeDetailsScreen::save) sends it.
//!
//! A screen opened for [`RecipeTarget::New`] starts in edit mode with an empty draft
//! authored by the viewer and never talks to the server until saved.

use crate::api::RecipeApi;
use crate::app::{navigation, NavAction, RecipeTarget, Route};
use crate::domain::error::{MealShareError, Result};
use crate::domain::{IngredientEdit, Recipe, RecipeEdit, UserProfile};

const LOAD_FAILED: &str = "Failed to load recipe details";
const SAVE_FAILED: &str = "Failed to save recipe. Please try again.";
const DELETE_FAILED: &str = "Failed to delete recipe. Please try again.";

/// Recipe details screen controller.
#[derive(Debug, Clone)]
pub struct RecipeDetailsScreen {
    target: RecipeTarget,
    viewer: Option<UserProfile>,
    saved: Option<Recipe>,
    buffer: Option<Recipe>,
    editing: bool,
    loading: bool,
    error: Option<String>,
}

impl RecipeDetailsScreen {
    /// Opens the screen for `target` as seen by `viewer`.
    ///
    /// An existing recipe still needs [`load`](Self::load).
    #[must_use]
    pub fn open(target: RecipeTarget, viewer: Option<UserProfile>) -> Self {
        match target {
            RecipeTarget::New => {
                let draft = Recipe::draft(viewer.clone());
                Self {
                    target,
                    viewer,
                    saved: Some(draft.clone()),
                    buffer: Some(draft),
                    editing: true,
                    loading: false,
                    error: None,
                }
            }
            RecipeTarget::Existing(_) => Self {
                target,
                viewer,
                saved: None,
                buffer: None,
                editing: false,
                loading: true,
                error: None,
            },
        }
    }

    /// Fetches an existing recipe. No-op for a new one.
    ///
    /// # Errors
    ///
    /// Returns the API error and sets [`error`](Self::error).
    pub async fn load(&mut self, api: &dyn RecipeApi) -> Result<()> {
        let RecipeTarget::Existing(recipe_id) = self.target else {
            return Ok(());
        };

        self.loading = true;
        self.error = None;
        let outcome = api.recipe(recipe_id).await;
        self.loading = false;

        match outcome {
            Ok(recipe) => {
                self.buffer = Some(recipe.clone());
                self.saved = Some(recipe);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, recipe_id, "error fetching recipe details");
                self.error = Some(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    #[must_use]
    pub const fn target(&self) -> RecipeTarget {
        self.target
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        matches!(self.target, RecipeTarget::New)
    }

    /// The recipe as last loaded or saved.
    #[must_use]
    pub const fn recipe(&self) -> Option<&Recipe> {
        self.saved.as_ref()
    }

    /// The edit buffer.
    #[must_use]
    pub const fn buffer(&self) -> Option<&Recipe> {
        self.buffer.as_ref()
    }

    /// What the screen shows: the buffer while editing, the saved recipe otherwise.
    #[must_use]
    pub fn displayed(&self) -> Option<&Recipe> {
        if self.editing {
            self.buffer.as_ref()
        } else {
            self.saved.as_ref()
        }
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// New recipes are always the viewer's; existing ones when the author matches.
    #[must_use]
    pub fn is_owner(&self) -> bool {
        if self.is_new() {
            return true;
        }
        match (&self.viewer, self.saved.as_ref().and_then(|r| r.user.as_ref())) {
            (Some(viewer), Some(author)) => viewer.id == author.id,
            _ => false,
        }
    }

    /// Enters edit mode. Returns `false` if the viewer may not edit or nothing is loaded.
    pub fn begin_edit(&mut self) -> bool {
        if !self.is_owner() || self.saved.is_none() {
            tracing::debug!("edit refused");
            return false;
        }
        self.editing = true;
        true
    }

    pub fn edit(&mut self, edit: RecipeEdit) {
        if let Some(buffer) = self.editable() {
            buffer.apply(edit);
        }
    }

    pub fn add_ingredient(&mut self) {
        if let Some(buffer) = self.editable() {
            buffer.add_ingredient();
        }
    }

    pub fn update_ingredient(&mut self, index: usize, edit: IngredientEdit) -> bool {
        self.editable()
            .is_some_and(|buffer| buffer.update_ingredient(index, edit))
    }

    pub fn remove_ingredient(&mut self, index: usize) -> bool {
        self.editable()
            .is_some_and(|buffer| buffer.remove_ingredient(index))
    }

    fn editable(&mut self) -> Option<&mut Recipe> {
        if !self.editing {
            return None;
        }
        self.buffer.as_mut()
    }

    /// Abandons the edit. For a new recipe this leaves the screen without any request.
    pub fn cancel(&mut self) -> Option<NavAction> {
        if self.is_new() {
            return Some(NavAction::Back);
        }
        self.buffer.clone_from(&self.saved);
        self.editing = false;
        None
    }

    /// Creates or updates the recipe, then returns to the viewer's dashboard.
    ///
    /// # Errors
    ///
    /// Returns the API error (or a validation error when nothing is loaded) and sets
    /// [`error`](Self::error). The buffer is kept so the user can retry.
    pub async fn save(&mut self, api: &dyn RecipeApi) -> Result<NavAction> {
        self.error = None;

        let outcome = match (&self.target, &self.buffer) {
            (_, None) => Err(MealShareError::Validation("no recipe loaded".to_string())),
            (RecipeTarget::New, Some(buffer)) => api.create_recipe(buffer).await,
            (RecipeTarget::Existing(recipe_id), Some(buffer)) => {
                api.update_recipe(*recipe_id, buffer).await
            }
        };

        match outcome {
            Ok(saved) => {
                tracing::info!(recipe_id = ?saved.id, "recipe saved");
                self.buffer = Some(saved.clone());
                self.saved = Some(saved);
                self.editing = false;
                Ok(NavAction::Replace(
                    self.viewer
                        .as_ref()
                        .map_or(Route::Index, navigation::dashboard_for),
                ))
            }
            Err(e) => {
                tracing::error!(error = %e, "error saving recipe");
                self.error = Some(SAVE_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Deletes the recipe and returns home.
    ///
    /// # Errors
    ///
    /// Returns the API error and sets [`error`](Self::error). A new recipe has nothing
    /// to delete and yields a validation error.
    pub async fn delete(&mut self, api: &dyn RecipeApi) -> Result<NavAction> {
        self.error = None;

        let RecipeTarget::Existing(recipe_id) = self.target else {
            return Err(MealShareError::Validation(
                "recipe has not been saved yet".to_string(),
            ));
        };

        self.loading = true;
        let outcome = api.delete_recipe(recipe_id).await;
        self.loading = false;

        match outcome {
            Ok(()) => {
                tracing::info!(recipe_id, "recipe deleted");
                Ok(NavAction::Replace(Route::Index))
            }
            Err(e) => {
                tracing::error!(error = %e, recipe_id, "error deleting recipe");
                self.error = Some(DELETE_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Header back button: the author's dashboard when known.
    #[must_use]
    pub fn back_action(&self) -> NavAction {
        if self.is_new() {
            if let Some(viewer) = &self.viewer {
                return NavAction::Replace(navigation::dashboard_for(viewer));
            }
        }
        match self.saved.as_ref().and_then(|r| r.user.as_ref()) {
            Some(author) => NavAction::Replace(navigation::dashboard_for(author)),
            None => NavAction::Back,
        }
    }
}
