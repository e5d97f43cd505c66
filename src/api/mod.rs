//! Remote API layer.
//!
//! The client core consumes the MealShare REST backend; it never implements it. This
//! module defines the async ports the rest of the crate depends on and the reqwest
//! adapter that fulfils them.
//!
//! # Modules
//!
//! - `ports`: [`AuthApi`], [`RecipeApi`] and [`SearchApi`] traits
//! - `models`: Auth request and response bodies
//! - `client`: [`ApiClient`], the HTTP implementation of every port

pub mod client;
pub mod models;
pub mod ports;

pub use client::ApiClient;
pub use models::{AuthResponse, LoginRequest, RegisterRequest};
pub use ports::{AuthApi, RecipeApi, SearchApi};
