//! Mapping from selectable items to destination routes.
//!
//! Every function here is pure: no state, no I/O. Whether the destination then loads
//! successfully is the destination screen's concern.

use crate::app::routes::{RecipeTarget, Route};
use crate::domain::{Recipe, SearchResult, UserProfile};

/// Route opened when a search result is selected.
///
/// # Example
///
/// ```
/// use mealshare::app::{navigation, RecipeTarget, Route};
/// use mealshare::domain::SearchResult;
///
/// let hit = SearchResult::Recipe { id: 3, display_name: "Ramen".into(), author_name: None };
/// assert_eq!(navigation::route_for_result(&hit), Route::RecipeDetails(RecipeTarget::Existing(3)));
/// ```
#[must_use]
pub fn route_for_result(result: &SearchResult) -> Route {
    match result {
        SearchResult::User { id, display_name } => Route::Dashboard {
            user_id: *id,
            username: display_name.clone(),
        },
        SearchResult::Recipe { id, .. } => route_for_recipe_id(*id),
    }
}

#[must_use]
pub const fn route_for_recipe_id(recipe_id: i64) -> Route {
    Route::RecipeDetails(RecipeTarget::Existing(recipe_id))
}

/// Route opened when a recipe list entry is pressed. `None` for an entry without id.
#[must_use]
pub fn route_for_recipe(recipe: &Recipe) -> Option<Route> {
    recipe.id.map(route_for_recipe_id)
}

/// Route opened by the "create new recipe" action.
#[must_use]
pub const fn route_for_new_recipe() -> Route {
    Route::RecipeDetails(RecipeTarget::New)
}

#[must_use]
pub fn dashboard_for(user: &UserProfile) -> Route {
    Route::Dashboard {
        user_id: user.id,
        username: user.username.clone(),
    }
}
