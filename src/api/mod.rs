// src/api/mod.rs

pub mod http;
pub mod identity;
pub mod payload;

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AdminError;

pub use http::HttpBackend;
pub use payload::{Payload, Upload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One call to the backend. `path` is relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub payload: Option<Payload>,
}

/// Response wrapper used by every endpoint: `{ success, data, message }`.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Unwraps `data`, turning a falsy `success` into `AdminError::Rejected`.
    pub fn into_data(self) -> Result<Value, AdminError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(AdminError::Rejected(
                self.message.unwrap_or_else(|| "request was not successful".to_string()),
            ))
        }
    }
}

/// The REST backend. Implemented over HTTP by [`HttpBackend`].
#[async_trait]
pub trait Backend: Send + Sync {
    /// Sends one request and returns the envelope's `data`.
    async fn send(&self, request: ApiRequest) -> Result<Value, AdminError>;

    /// Id substituted into `/<resource>/get/:userId` list paths.
    fn user_id(&self) -> Option<String> {
        None
    }
}

pub async fn get(backend: &dyn Backend, path: &str) -> Result<Value, AdminError> {
    backend
        .send(ApiRequest {
            method: Method::Get,
            path: path.to_string(),
            payload: None,
        })
        .await
}

pub async fn post(backend: &dyn Backend, path: &str, payload: Payload) -> Result<Value, AdminError> {
    backend
        .send(ApiRequest {
            method: Method::Post,
            path: path.to_string(),
            payload: Some(payload),
        })
        .await
}

pub async fn put(backend: &dyn Backend, path: &str, payload: Payload) -> Result<Value, AdminError> {
    backend
        .send(ApiRequest {
            method: Method::Put,
            path: path.to_string(),
            payload: Some(payload),
        })
        .await
}

pub async fn delete(backend: &dyn Backend, path: &str) -> Result<Value, AdminError> {
    backend
        .send(ApiRequest {
            method: Method::Delete,
            path: path.to_string(),
            payload: None,
        })
        .await
}

/// GET `path` and decode the data as `T`.
pub async fn fetch<T: DeserializeOwned>(backend: &dyn Backend, path: &str) -> Result<T, AdminError> {
    let data = get(backend, path).await?;
    decode(data)
}

pub fn decode<T: DeserializeOwned>(data: Value) -> Result<T, AdminError> {
    serde_json::from_value(data).map_err(|e| AdminError::Decode(e.to_string()))
}

/// Decodes a list response. `null` data reads as an empty list.
pub fn decode_list<T: DeserializeOwned>(data: Value) -> Result<Vec<T>, AdminError> {
    match data {
        Value::Null => Ok(Vec::new()),
        other => decode(other),
    }
}
