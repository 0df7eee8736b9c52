// src/config.rs

use std::env;

use url::Url;

use crate::error::AdminError;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the practice-platform REST API.
    pub api_url: Url,
    /// Bearer token attached to every request, if set.
    pub api_token: Option<String>,
    /// Admin user id for `/<resource>/get/:userId` listings.
    pub user_id: Option<String>,
    pub rust_log: String,
    pub log_dir: String,
}

impl Config {
    /// Reads the environment; `.env` is loaded by `main` before this runs.
    pub fn from_env() -> Result<Self, AdminError> {
        let api_url = env::var("PTE_ADMIN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = parse_base_url(&api_url)?;

        let api_token = non_empty(env::var("PTE_ADMIN_TOKEN").ok());
        let user_id = non_empty(env::var("PTE_ADMIN_USER_ID").ok());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_dir = env::var("PTE_ADMIN_LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Ok(Self {
            api_url,
            api_token,
            user_id,
            rust_log,
            log_dir,
        })
    }

    /// Configuration pointing at `api_url` with everything else defaulted.
    pub fn for_url(api_url: &str) -> Result<Self, AdminError> {
        Ok(Self {
            api_url: parse_base_url(api_url)?,
            api_token: None,
            user_id: None,
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
        })
    }
}

/// Parses a base URL, forcing a trailing slash so relative joins keep the path prefix.
pub fn parse_base_url(raw: &str) -> Result<Url, AdminError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AdminError::Config("API base URL is empty".to_string()));
    }
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Ok(Url::parse(&with_slash)?)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
