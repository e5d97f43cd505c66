//! Reqwest-backed implementation of the remote API ports.
//!
//! This adapter owns transport details only: URL building, the bearer-token
//! interceptor, the request timeout, HTTP error mapping and JSON decoding.

use crate::api::models::{AuthResponse, ErrorBody, LoginRequest, RegisterRequest};
use crate::api::ports::{AuthApi, RecipeApi, SearchApi};
use crate::domain::error::{MealShareError, Result};
use crate::domain::{Recipe, SearchResponse, SessionHandle};
use crate::Config;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::Instrument;

/// HTTP client for the MealShare REST API.
///
/// Every request passes through [`ApiClient::authorize`], which attaches
/// `Authorization: Bearer {token}` whenever the shared session holds a token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionHandle,
}

impl ApiClient {
    /// Builds a client for `base_url` with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`MealShareError::Config`] if `base_url` is not an absolute URL or the
    /// underlying reqwest client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration, session: SessionHandle) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| MealShareError::Config(format!("invalid api base url {base_url:?}: {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MealShareError::Config(format!("failed to build http client: {e}")))?;

        tracing::debug!(base_url = %parsed, timeout_ms = timeout.as_millis(), "api client ready");

        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Builds a client from the base URL and timeout in `config`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn from_config(config: &Config, session: SessionHandle) -> Result<Self> {
        Self::new(&config.api_base_url, config.request_timeout(), session)
    }

    /// Resolves an API path such as `recipes/4` against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| MealShareError::Config(format!("invalid endpoint {raw:?}: {e}")))
    }

    /// Request interceptor: attaches the bearer token when one is present.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        let error = map_status_error(status, body.as_ref());
        match status {
            StatusCode::UNAUTHORIZED => {
                tracing::error!(status = status.as_u16(), "authentication failed, please log in again");
            }
            StatusCode::FORBIDDEN => {
                tracing::error!(status = status.as_u16(), "no permission to access this resource");
            }
            _ => tracing::warn!(status = status.as_u16(), error = %error, "request rejected"),
        }
        Err(error)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let body = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(body.as_ref())
            .map_err(|e| MealShareError::Network(format!("malformed response body: {e}")))
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let url = self.endpoint("auth/login")?;
        self.send_json(self.client.post(url).json(request))
            .instrument(tracing::debug_span!("api_login", username = %request.username))
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let url = self.endpoint("auth/register")?;
        self.send_json(self.client.post(url).json(request))
            .instrument(tracing::debug_span!("api_register", username = %request.username))
            .await
    }
}

#[async_trait]
impl RecipeApi for ApiClient {
    async fn user_recipes(&self, user_id: i64) -> Result<Vec<Recipe>> {
        let url = self.endpoint(&format!("users/{user_id}/recipes"))?;
        self.send_json(self.client.get(url)).await
    }

    async fn recipe(&self, recipe_id: i64) -> Result<Recipe> {
        let url = self.endpoint(&format!("recipes/{recipe_id}"))?;
        self.send_json(self.client.get(url)).await
    }

    async fn create_recipe(&self, recipe: &Recipe) -> Result<Recipe> {
        let url = self.endpoint("recipes")?;
        self.send_json(self.client.post(url).json(recipe)).await
    }

    async fn update_recipe(&self, recipe_id: i64, recipe: &Recipe) -> Result<Recipe> {
        let url = self.endpoint(&format!("recipes/{recipe_id}"))?;
        self.send_json(self.client.put(url).json(recipe)).await
    }

    async fn delete_recipe(&self, recipe_id: i64) -> Result<()> {
        let url = self.endpoint(&format!("recipes/{recipe_id}"))?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

#[async_trait]
impl SearchApi for ApiClient {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = self.endpoint("search")?;
        self.send_json(self.client.get(url).query(&[("query", query)]))
            .instrument(tracing::debug_span!("api_search", query_len = query.len()))
            .await
    }
}

fn map_transport_error(error: reqwest::Error) -> MealShareError {
    if error.is_timeout() {
        tracing::error!(error = %error, "request timed out");
        MealShareError::Network(format!("request timed out: {error}"))
    } else if error.is_connect() {
        tracing::error!(
            error = %error,
            "could not connect to the server, check that it is running and reachable"
        );
        MealShareError::Network(format!("could not connect to the server: {error}"))
    } else {
        MealShareError::Network(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MealShareError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| body_preview(body));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => MealShareError::Auth {
            status: status.as_u16(),
            message,
        },
        _ => MealShareError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
