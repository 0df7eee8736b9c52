// src/error.rs

use std::fmt;

use crate::models::question::QuestionKind;

/// Global Admin Error Enum.
/// Every failure the dashboard can hit is one of these; none is retried.
#[derive(Debug)]
pub enum AdminError {
    // Transport failure (connection refused, DNS, broken body)
    Network(String),

    // Non-2xx HTTP status with the backend's message, if any
    Status(u16, String),

    // 2xx response whose envelope carried `success: false`
    Rejected(String),

    // Response body did not match the expected shape
    Decode(String),

    // Draft failed client-side checks; no request was sent
    Validation(String),

    // Bucket already holds its maximum number of questions
    SelectionCap(QuestionKind, usize),

    // 404, or an id missing from a local pool
    NotFound(String),

    // Mutation attempted on a read-only collection
    ReadOnly(String),

    // Missing or malformed configuration
    Config(String),

    // Local file access (uploads)
    Io(String),
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminError::Network(msg) => write!(f, "network error: {}", msg),
            AdminError::Status(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            AdminError::Rejected(msg) => write!(f, "request rejected: {}", msg),
            AdminError::Decode(msg) => write!(f, "unexpected response: {}", msg),
            AdminError::Validation(msg) => write!(f, "{}", msg),
            AdminError::SelectionCap(kind, cap) => write!(
                f,
                "{} groups can only have {} question{}",
                kind.short_code(),
                cap,
                if *cap == 1 { "" } else { "s" }
            ),
            AdminError::NotFound(msg) => write!(f, "not found: {}", msg),
            AdminError::ReadOnly(msg) => write!(f, "{} are read-only", msg),
            AdminError::Config(msg) => write!(f, "configuration error: {}", msg),
            AdminError::Io(msg) => write!(f, "io error: {}", msg),
        }
    }
}

impl std::error::Error for AdminError {}

impl AdminError {
    /// True for errors raised before any request left the client.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            AdminError::Validation(_)
                | AdminError::SelectionCap(..)
                | AdminError::ReadOnly(_)
                | AdminError::Config(_)
                | AdminError::Io(_)
        )
    }
}

/// Converts `reqwest::Error` into `AdminError`.
/// Body decoding failures are kept apart from transport failures.
impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AdminError::Decode(err.to_string())
        } else {
            AdminError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        AdminError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        AdminError::Io(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AdminError {
    fn from(err: validator::ValidationErrors) -> Self {
        AdminError::Validation(err.to_string())
    }
}

impl From<url::ParseError> for AdminError {
    fn from(err: url::ParseError) -> Self {
        AdminError::Config(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AdminError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AdminError::Config(format!("unreadable admin token: {}", err))
    }
}
