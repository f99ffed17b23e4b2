//! Publisher configuration loaded from the environment.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default form service endpoint.
pub const DEFAULT_API_URL: &str = "https://forms.googleapis.com/v1";

pub const API_URL_VAR: &str = "STORY_FORM_API_URL";
pub const ACCESS_TOKEN_VAR: &str = "STORY_FORM_ACCESS_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no access token: set STORY_FORM_ACCESS_TOKEN or write {}", display_path(.0))]
    MissingToken(Option<PathBuf>),

    #[error("failed to read token file {}: {source}", .path.display())]
    TokenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed token file {}: {source}", .path.display())]
    MalformedToken {
        path: PathBuf,
        source: serde_json::Error,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "token.json to the story-form config directory".to_string(),
    }
}

/// Where and how to reach the form service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublisherConfig {
    /// Base URL (from STORY_FORM_API_URL)
    pub api_url: String,
    /// Bearer token (from STORY_FORM_ACCESS_TOKEN or the token file)
    pub access_token: String,
}

/// `token.json` as written by the usual OAuth helpers.
#[derive(Debug, Deserialize)]
struct TokenFile {
    #[serde(alias = "token")]
    access_token: String,
}

impl PublisherConfig {
    pub fn new(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Load configuration from environment variables, falling back to
    /// [`default_token_path`] for the token.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let access_token = match std::env::var(ACCESS_TOKEN_VAR) {
            Ok(token) => token,
            Err(_) => {
                let path = default_token_path().ok_or(ConfigError::MissingToken(None))?;
                read_token_file(&path)?
            }
        };

        Ok(Self::new(api_url, access_token))
    }

    /// Override the base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

/// `token.json` in the platform config directory.
pub fn default_token_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "story-form")
        .map(|dirs| dirs.config_dir().join("token.json"))
}

/// Read the access token from a JSON token file.
pub fn read_token_file(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingToken(Some(path.to_path_buf())));
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::TokenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let token: TokenFile =
        serde_json::from_str(&contents).map_err(|source| ConfigError::MalformedToken {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(token.access_token)
}
