//! API client for the travels backend REST API.
//!
//! This module provides the `ApiClient` struct for authentication round
//! trips and authenticated CRUD on places. The session lifecycle itself
//! lives in [`crate::auth`]; this client only moves bytes.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{Category, LoginRequest, LoginResponse, Place, PlaceDraft, RegisterRequest};

use super::ApiError;

/// HTTP request timeout in seconds.
/// Matches the verifier's budget: fail fast rather than block the UI.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// API client for the travels backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the configured base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Set the bearer credential for authenticated requests.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Create a new ApiClient with the given credential, sharing the
    /// connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    /// The underlying reqwest client, for collaborators that want to share
    /// the connection pool (e.g. the verifier).
    pub fn http_client(&self) -> Client {
        self.client.clone()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ===== Auth round trips =====

    /// Exchange email/password for a bearer credential.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let url = format!("{}/auth/login", self.base_url);
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send login request")?;

        let response = Self::check_response(response).await?;
        let auth: LoginResponse = response
            .json()
            .await
            .context("Failed to parse login response")?;

        debug!("Login round trip succeeded");
        Ok(auth.token)
    }

    /// Create a new account. A 2xx reply means success; the user still logs
    /// in separately.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let url = format!("{}/auth/register", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to send registration request")?;

        Self::check_response(response).await?;
        debug!("Registration succeeded");
        Ok(())
    }

    // ===== Place CRUD =====

    /// Fetch all places in one category.
    pub async fn fetch_places(&self, category: Category) -> Result<Vec<Place>> {
        let url = format!("{}/places?category={}", self.base_url, category.as_str());
        self.get(&url).await
    }

    /// Fetch a single place by id.
    pub async fn fetch_place(&self, id: i32) -> Result<Place> {
        let url = format!("{}/places/{}", self.base_url, id);
        self.get(&url).await
    }

    /// Create a place and return the stored entity.
    pub async fn create_place(&self, draft: &PlaceDraft) -> Result<Place> {
        let url = format!("{}/places", self.base_url);

        let response = self
            .authed(self.client.post(&url))
            .json(draft)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .context("Failed to parse created place")
    }

    /// Replace a place's fields.
    pub async fn update_place(&self, id: i32, draft: &PlaceDraft) -> Result<Place> {
        let url = format!("{}/places/{}", self.base_url, id);

        let response = self
            .authed(self.client.put(&url))
            .json(draft)
            .send()
            .await
            .with_context(|| format!("Failed to send PUT request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .context("Failed to parse updated place")
    }

    /// Delete a place.
    pub async fn delete_place(&self, id: i32) -> Result<()> {
        let url = format!("{}/places/{}", self.base_url, id);

        let response = self
            .authed(self.client.delete(&url))
            .send()
            .await
            .with_context(|| format!("Failed to send DELETE request to {}", url))?;

        Self::check_response(response).await?;
        Ok(())
    }

    // ===== Internals =====

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .authed(self.client.get(url))
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }
}
