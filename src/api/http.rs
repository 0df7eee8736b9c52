// src/api/http.rs

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use url::Url;

use super::identity::user_id_from_token;
use super::{ApiRequest, Backend, Envelope, Method, Payload, Upload};
use crate::config::Config;
use crate::error::AdminError;

/// [`Backend`] over HTTP with a shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    user_id: Option<String>,
}

impl HttpBackend {
    /// Builds the client from configuration.
    ///
    /// The admin user id comes from `PTE_ADMIN_USER_ID`, falling back to the
    /// token's claims.
    pub fn new(config: &Config) -> Result<Self, AdminError> {
        let user_id = match (&config.user_id, &config.api_token) {
            (Some(id), _) => Some(id.clone()),
            (None, Some(token)) => user_id_from_token(token)?,
            (None, None) => None,
        };

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.api_url.clone(),
            token: config.api_token.clone(),
            user_id,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, AdminError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn multipart_form(fields: Vec<(String, String)>, files: Vec<Upload>) -> Result<Form, AdminError> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }
    for upload in files {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        form = form.part(upload.field, part);
    }
    Ok(form)
}

/// Pulls a human message out of an error body: `message`, then `error`, then the raw text.
fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send(&self, request: ApiRequest) -> Result<Value, AdminError> {
        let url = self.url_for(&request.path)?;
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self.client.request(to_reqwest(request.method), url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder = match request.payload {
            None => builder,
            Some(Payload::Json(body)) => builder.json(&body),
            Some(Payload::Multipart { fields, files }) => builder.multipart(multipart_form(fields, files)?),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {:?}", request.method, request.path, e);
            AdminError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("request failed");
            let message = error_message(&body, reason);
            tracing::warn!("{} {} returned {}: {}", request.method, request.path, status, message);
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(AdminError::NotFound(message));
            }
            return Err(AdminError::Status(status.as_u16(), message));
        }

        // 204 and friends
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        let envelope: Envelope = serde_json::from_str(&body)?;
        envelope.into_data()
    }

    fn user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(error_message(r#"{"message":"Invalid id"}"#, "x"), "Invalid id");
        assert_eq!(error_message(r#"{"error":"Boom"}"#, "x"), "Boom");
        assert_eq!(error_message("  ", "Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message("plain text", "x"), "plain text");
    }
}
