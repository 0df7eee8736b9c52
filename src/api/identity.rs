// src/api/identity.rs

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AdminError;

/// Claims the platform's login endpoint puts in its tokens.
/// Different deployments name the user id differently.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(rename = "_id", default)]
    underscore_id: Option<Value>,
    #[serde(rename = "userId", default)]
    user_id: Option<Value>,
}

fn as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads the admin's user id out of a bearer token.
///
/// The signature is not verified: the backend does that on every request,
/// and the client never holds the signing secret.
pub fn user_id_from_token(token: &str) -> Result<Option<String>, AdminError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    let claims = data.claims;

    Ok([claims.user_id, claims.underscore_id, claims.id, claims.sub]
        .iter()
        .flatten()
        .find_map(as_id))
}
