//! Storage layer for the persisted session.
//!
//! This module provides the durable key-value abstraction the client stores its
//! session in, two backends for it, and the [`SessionStore`] that maps a
//! [`Session`](crate::domain::Session) onto the `token` and `user` keys. No other
//! component touches the backends directly.
//!
//! # Modules
//!
//! - `backend`: Key-value trait abstraction for backend implementations
//! - `json`: JSON file-based backend with atomic writes
//! - `memory`: In-process backend
//! - `session_store`: Session load/save/clear on top of a backend

pub mod backend;
pub mod json;
pub mod memory;
pub mod session_store;

pub use backend::KeyValueStore;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use session_store::{SessionStore, TOKEN_KEY, USER_KEY};
