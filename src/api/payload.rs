// src/api/payload.rs

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::AdminError;

/// A file attached to a create or update request.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    /// Multipart field name (`image` or `audio`).
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(field: &str, file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            field: field.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type_for(file_name).to_string(),
            bytes,
        }
    }

    /// Reads `path` into memory for upload under `field`.
    pub async fn from_path(field: &str, path: &Path) -> Result<Self, AdminError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            tracing::error!("Failed to read upload {}: {:?}", path.display(), e);
            AdminError::Io(format!("{}: {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self::new(field, &file_name, bytes))
    }
}

/// Guesses a MIME type from the file extension; unknown types go as octet-stream.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}

/// Request body of a create or update call.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<Upload>,
    },
}

impl Payload {
    /// JSON when no file is attached, multipart otherwise.
    ///
    /// Multipart text parts carry strings as-is and every other value
    /// JSON-encoded; nulls are dropped.
    pub fn from_object(object: Map<String, Value>, files: Vec<Upload>) -> Self {
        if files.is_empty() {
            return Payload::Json(Value::Object(object));
        }

        let fields = object
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();

        Payload::Multipart { fields, files }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Payload::Multipart { .. })
    }
}
