//! Search response and the flattened result list shown to the user.

use crate::domain::recipe::Recipe;
use crate::domain::user::UserProfile;
use serde::{Deserialize, Serialize};

/// Raw `GET /search` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub users: Vec<UserProfile>,
}

/// Discriminant of a [`SearchResult`], used as part of its list identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SearchKind {
    Recipe,
    User,
}

/// One row of the search result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Recipe {
        id: i64,
        display_name: String,
        author_name: Option<String>,
    },
    User {
        id: i64,
        display_name: String,
    },
}

impl SearchResult {
    #[must_use]
    pub const fn kind(&self) -> SearchKind {
        match self {
            Self::Recipe { .. } => SearchKind::Recipe,
            Self::User { .. } => SearchKind::User,
        }
    }

    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Recipe { id, .. } | Self::User { id, .. } => *id,
        }
    }

    /// Identity for list rendering.
    #[must_use]
    pub const fn key(&self) -> (SearchKind, i64) {
        (self.kind(), self.id())
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Recipe { display_name, .. } | Self::User { display_name, .. } => display_name,
        }
    }
}

/// Flattens a search response into one list: every recipe, then every user.
///
/// Server order is preserved inside each group. Recipes the server returned without
/// an id cannot be opened and are dropped.
#[must_use]
pub fn merge_results(response: SearchResponse) -> Vec<SearchResult> {
    let SearchResponse { recipes, users } = response;
    let mut results = Vec::with_capacity(recipes.len() + users.len());

    for recipe in recipes {
        let Some(id) = recipe.id else {
            tracing::debug!(title = %recipe.title, "skipping search hit without id");
            continue;
        };
        results.push(SearchResult::Recipe {
            id,
            display_name: recipe.title,
            author_name: recipe.user.map(|u| u.username),
        });
    }

    results.extend(users.into_iter().map(|user| SearchResult::User {
        id: user.id,
        display_name: user.username,
    }));

    results
}
