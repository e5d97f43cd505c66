//! Async ports the screens and the search debouncer call the backend through.
//!
//! [`ApiClient`](crate::api::ApiClient) implements all three against the REST
//! contract; tests substitute in-memory doubles.

use crate::api::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::domain::error::Result;
use crate::domain::{Recipe, SearchResponse};
use async_trait::async_trait;

/// Login and registration.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;

    /// `POST /auth/register`.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;
}

/// Recipe reads and writes.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// `GET /users/{user_id}/recipes`.
    async fn user_recipes(&self, user_id: i64) -> Result<Vec<Recipe>>;

    /// `GET /recipes/{recipe_id}`.
    async fn recipe(&self, recipe_id: i64) -> Result<Recipe>;

    /// `POST /recipes`.
    async fn create_recipe(&self, recipe: &Recipe) -> Result<Recipe>;

    /// `PUT /recipes/{recipe_id}`.
    async fn update_recipe(&self, recipe_id: i64, recipe: &Recipe) -> Result<Recipe>;

    /// `DELETE /recipes/{recipe_id}`.
    async fn delete_recipe(&self, recipe_id: i64) -> Result<()>;
}

/// Combined recipe and user search.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// `GET /search?query={query}`.
    async fn search(&self, query: &str) -> Result<SearchResponse>;
}
