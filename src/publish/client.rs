//! HTTP client for the form publishing service.
//!
//! Configuration comes from [`PublisherConfig`]:
//! - `STORY_FORM_API_URL` - Base URL (default: `https://forms.googleapis.com/v1`)
//! - `STORY_FORM_ACCESS_TOKEN` - Bearer token (or `token.json` in the config directory)

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::plan::{BatchUpdate, Request};
use super::FormPublisher;
use crate::config::PublisherConfig;
use crate::models::FormInfo;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: access token missing, expired or invalid")]
    Unauthorized,

    #[error("Server error: {0}")]
    Server(String),
}

/// Identifier the service assigns to a created form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(pub String);

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateFormResponse {
    form_id: FormId,
}

/// HTTP client for the form publishing service.
#[derive(Debug, Clone)]
pub struct FormsClient {
    base_url: String,
    access_token: String,
    client: Client,
}

impl FormsClient {
    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &PublisherConfig) -> Self {
        Self::new(&config.api_url, &config.access_token)
    }

    /// Build an authenticated request.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.access_token)
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(body)),
            StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(body)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized),
            _ => Err(ClientError::Server(format!("{}: {}", status, body))),
        }
    }

    /// Create an empty form with only a title.
    pub async fn create_form(&self, title: &str) -> Result<FormId, ClientError> {
        let body = FormInfo::titled(title);
        let response = self
            .request(reqwest::Method::POST, "/forms")
            .json(&body)
            .send()
            .await?;
        let created: CreateFormResponse = self.handle_response(response).await?;
        Ok(created.form_id)
    }

    /// Apply a batch of item requests to a form.
    pub async fn send_batch(
        &self,
        form_id: &FormId,
        requests: &[Request],
    ) -> Result<(), ClientError> {
        let body = BatchUpdate {
            requests: requests.to_vec(),
        };
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/forms/{}:batchUpdate", form_id),
            )
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl FormPublisher for FormsClient {
    async fn create(&self, title: &str) -> Result<FormId, ClientError> {
        self.create_form(title).await
    }

    async fn batch_update(&self, form_id: &FormId, requests: &[Request]) -> Result<(), ClientError> {
        self.send_batch(form_id, requests).await
    }
}
