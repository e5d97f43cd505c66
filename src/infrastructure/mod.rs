//! Infrastructure layer for filesystem and environment interactions.
//!
//! Currently this is only path handling: where the data directory lives and which
//! files go in it.

pub mod paths;

pub use paths::{default_data_dir, expand_tilde, log_file, resolve_data_dir, session_file};
