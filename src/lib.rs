//! MealShare: client core for a recipe-sharing app.
//!
//! The crate holds everything a MealShare front end needs below the rendering layer:
//! - A persisted session with a bootstrap/sign-in/sign-out state machine
//! - Typed routes and a routing invariant binding auth state to screens
//! - A debounced search bar over recipes and users
//! - A typed REST client with bearer-token auth and error classification
//! - Headless screen controllers (login, register, dashboard, recipe details, settings)

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Screens (screens/)                                 │  ← Form state, validation
//! └─────────────────────────────────────────────────────┘
//!                        │ NavAction / sign_in
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Auth gate + routing invariant                    │
//! │  - Router, routes, navigation dispatch              │
//! │  - Search debouncer                                 │
//! └─────────────────────────────────────────────────────┘
//!         │                                       │
//! ┌───────────────────────┐           ┌───────────────────────┐
//! │ Storage Layer         │           │ API Layer (api/)      │
//! │ (storage/)            │           │ - Ports (traits)      │
//! │ - Session store       │           │ - reqwest client      │
//! │ - JSON / memory KV    │           │ - Error mapping       │
//! └───────────────────────┘           └───────────────────────┘
//!         │                                       │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory paths (infrastructure/)           │
//! │  - Session, recipe, search types (domain/)          │
//! │  - Error types (domain/error)                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - JSON logs to a rotating file                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```toml
//! api_base_url = "https://mealshare.example.com/api"
//! request_timeout_secs = 10
//! search_debounce_ms = 500
//! data_dir = "~/.local/share/mealshare"
//! trace_level = "debug"
//! ```
//!
//! # Initialization Flow
//!
//! 1. Load a [`Config`] (defaults, TOML file or string map)
//! 2. Optionally call [`observability::init_tracing`]
//! 3. [`initialize`] opens the session file, bootstraps the [`AuthGate`], and builds
//!    the [`ApiClient`] and the [`SearchDebouncer`]
//!
//! # Example
//!
//! ```no_run
//! use mealshare::{initialize, Config, Route};
//!
//! let config = Config::from_file("mealshare.toml")?;
//! let app = initialize(&config)?;
//!
//! if !app.gate.is_signed_in() {
//!     assert_eq!(app.gate.current_route(), &Route::Login);
//! }
//! # Ok::<(), mealshare::MealShareError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod screens;
pub mod storage;

pub mod observability;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiClient, AuthApi, RecipeApi, SearchApi};
pub use app::{AuthGate, AuthState, NavAction, RecipeTarget, Route, SearchDebouncer};
pub use domain::{MealShareError, Recipe, Result, Session, SessionHandle, UserProfile};

use crate::storage::{JsonStore, MemoryStore, SessionStore};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Client configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the REST API, e.g. `https://host/api`. Default: `http://localhost:8080/api`
    pub api_base_url: String,

    /// Per-request timeout in seconds. Default: 10
    pub request_timeout_secs: u64,

    /// Quiet period before a search is sent, in milliseconds. Default: 500
    pub search_debounce_ms: u64,

    /// Directory for the session file and logs. `~` is expanded.
    ///
    /// Default: the platform data directory plus `mealshare`.
    pub data_dir: Option<String>,

    /// Log filter used when `RUST_LOG` is unset.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
            data_dir: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MealShareError::Config`] if the document is not valid TOML or a value
    /// has the wrong type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mealshare::Config;
    ///
    /// let config = Config::from_toml_str("search_debounce_ms = 300")?;
    /// assert_eq!(config.search_debounce_ms, 300);
    /// assert_eq!(config.request_timeout_secs, 10);
    /// # Ok::<(), mealshare::MealShareError>(())
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MealShareError::Config(format!("invalid config: {e}")))
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`MealShareError::Io`] if the file cannot be read, or
    /// [`MealShareError::Config`] if it cannot be parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Builds a config from string key/value pairs, such as environment or host
    /// settings.
    ///
    /// Unparseable numbers fall back to their defaults; unknown keys are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use mealshare::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base_url".to_string(), "https://api.example.com".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.api_base_url, "https://api.example.com");
    /// assert_eq!(config.request_timeout_secs, 10);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let api_base_url = map
            .get("api_base_url")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_base_url);

        let request_timeout_secs = map
            .get("request_timeout_secs")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.request_timeout_secs);

        let search_debounce_ms = map
            .get("search_debounce_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.search_debounce_ms);

        Self {
            api_base_url,
            request_timeout_secs,
            search_debounce_ms,
            data_dir: map.get("data_dir").cloned(),
            trace_level: map.get("trace_level").cloned(),
        }
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Data directory with `~` expanded, or the platform default.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        infrastructure::resolve_data_dir(self.data_dir.as_deref())
    }
}

/// The wired-up client: gate, API client and search bar.
#[derive(Debug)]
pub struct MealShare {
    pub config: Config,
    pub gate: AuthGate,
    pub api: Arc<ApiClient>,
    pub search: SearchDebouncer,
}

/// Opens the session store, bootstraps the auth gate and builds the API client and
/// search debouncer.
///
/// When the session file cannot be opened the client still starts, keeping the
/// session in memory only.
///
/// # Errors
///
/// Returns [`MealShareError::Config`] if the API base URL is invalid or the HTTP
/// client cannot be built.
///
/// # Example
///
/// ```rust
/// use mealshare::{initialize, AuthState, Config};
///
/// let dir = std::env::temp_dir().join("mealshare-doc");
/// let config = Config {
///     data_dir: Some(dir.to_string_lossy().into_owned()),
///     ..Default::default()
/// };
///
/// let app = initialize(&config)?;
/// assert_ne!(app.gate.state(), AuthState::Bootstrapping);
/// # Ok::<(), mealshare::MealShareError>(())
/// ```
pub fn initialize(config: &Config) -> Result<MealShare> {
    tracing::debug!("initializing mealshare client");

    let session_path = infrastructure::session_file(&config.resolved_data_dir());
    let store = match JsonStore::new(session_path) {
        Ok(json) => SessionStore::new(json),
        Err(e) => {
            tracing::warn!(error = %e, "session file unavailable, keeping session in memory");
            SessionStore::new(MemoryStore::new())
        }
    };

    let mut gate = AuthGate::new(store, Route::home());
    gate.bootstrap();

    let api = Arc::new(ApiClient::from_config(config, gate.session_handle())?);
    let search = SearchDebouncer::new(api.clone(), config.search_debounce());

    tracing::info!(state = ?gate.state(), route = %gate.current_route(), "mealshare client ready");

    Ok(MealShare {
        config: config.clone(),
        gate,
        api,
        search,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            data_dir: Some(dir.path().to_string_lossy().into_owned()),
            ..Config::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_toml_overrides_only_given_keys() {
        let config = Config::from_toml_str(
            r#"
            api_base_url = "https://api.mealshare.test/api"
            trace_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://api.mealshare.test/api");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.search_debounce_ms, 500);
    }

    #[test]
    fn test_toml_type_error() {
        let err = Config::from_toml_str("request_timeout_secs = \"ten\"").unwrap_err();
        assert!(matches!(err, MealShareError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mealshare.toml");
        std::fs::write(&path, "search_debounce_ms = 250\n").unwrap();

        assert_eq!(Config::from_file(&path).unwrap().search_debounce_ms, 250);
        assert!(matches!(
            Config::from_file(dir.path().join("missing.toml")),
            Err(MealShareError::Io(_))
        ));
    }

    #[test]
    fn test_from_map_falls_back_on_bad_numbers() {
        let map = BTreeMap::from([
            ("search_debounce_ms".to_string(), "fast".to_string()),
            ("request_timeout_secs".to_string(), " 30 ".to_string()),
            ("data_dir".to_string(), "~/ms".to_string()),
        ]);

        let config = Config::from_map(&map);
        assert_eq!(config.search_debounce_ms, 500);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.data_dir.as_deref(), Some("~/ms"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_initialize_restores_persisted_session() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let mut first = initialize(&config).unwrap();
        assert_eq!(first.gate.state(), AuthState::SignedOut);
        assert_eq!(first.gate.current_route(), &Route::Login);
        first.gate.sign_in("persisted", UserProfile::new(5, "lee")).unwrap();
        drop(first);

        let second = initialize(&config).unwrap();
        assert_eq!(second.gate.state(), AuthState::SignedIn);
        assert_eq!(second.gate.token().as_deref(), Some("persisted"));
        assert!(dir.path().join("session.json").exists());
    }

    #[test]
    fn test_initialize_rejects_bad_base_url() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            api_base_url: "not a url".to_string(),
            ..config_in(&dir)
        };

        assert!(matches!(initialize(&config), Err(MealShareError::Config(_))));
    }
}
