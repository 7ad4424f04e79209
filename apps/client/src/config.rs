use anyhow::{Context, Result};
use reqwest::Url;

use crate::errors::ClientError;

/// Base path of the generation service when `API_URL` is unset or empty.
pub const DEFAULT_API_BASE: &str = "/api";
/// Origin that relative API bases resolve against (the dev server that proxies `/api`).
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";

/// Client configuration loaded from environment variables.
/// Every setting has a default, so loading never fails on a missing variable.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub origin: String,
    pub rust_log: String,
}

impl Config {
    /// Loads from the environment, applies command-line overrides, and checks
    /// that the result forms a usable upload endpoint.
    pub fn from_env(api_url: Option<String>, origin: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config =
            Self::from_lookup(|key| std::env::var(key).ok()).with_overrides(api_url, origin);
        config
            .upload_endpoint()
            .context("API_URL / APP_ORIGIN do not form a valid upload endpoint")?;
        Ok(config)
    }

    /// Builds a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Config {
            api_base: read("API_URL", DEFAULT_API_BASE),
            origin: read("APP_ORIGIN", DEFAULT_ORIGIN),
            rust_log: read("RUST_LOG", "info"),
        }
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(mut self, api_base: Option<String>, origin: Option<String>) -> Self {
        if let Some(api_base) = api_base.filter(|v| !v.is_empty()) {
            self.api_base = api_base;
        }
        if let Some(origin) = origin.filter(|v| !v.is_empty()) {
            self.origin = origin;
        }
        self
    }

    /// Resolves `<api_base>/upload/`. A relative base resolves against `origin`.
    pub fn upload_endpoint(&self) -> Result<Url, ClientError> {
        upload_endpoint(&self.api_base, &self.origin)
    }
}

fn upload_endpoint(api_base: &str, origin: &str) -> Result<Url, ClientError> {
    let path = format!("{}/upload/", api_base.trim_end_matches('/'));

    let origin = Url::parse(origin)
        .map_err(|e| ClientError::Config(format!("invalid origin '{origin}': {e}")))?;

    // An absolute base replaces the origin entirely when joined.
    origin
        .join(&path)
        .map_err(|e| ClientError::Config(format!("invalid API base '{api_base}': {e}")))
}
