use std::fmt;
use std::str::FromStr;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use http::StatusCode;
use rand::rngs::OsRng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use spin_sdk::http::Response;

use crate::core::errors::ApiError;

/// How credentials are kept in the credential store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordScheme {
    /// Stored as supplied and compared byte for byte.
    #[default]
    Plaintext,
    /// Stored as an Argon2 PHC string with a random salt.
    Argon2,
}

impl PasswordScheme {
    pub fn digest(&self, password: &str) -> anyhow::Result<String> {
        match self {
            PasswordScheme::Plaintext => Ok(password.to_string()),
            PasswordScheme::Argon2 => hash_password(password),
        }
    }

    pub fn verify(&self, password: &str, stored: &str) -> bool {
        match self {
            PasswordScheme::Plaintext => password.as_bytes() == stored.as_bytes(),
            PasswordScheme::Argon2 => verify_password(password, stored),
        }
    }
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordScheme::Plaintext => write!(f, "plaintext"),
            PasswordScheme::Argon2 => write!(f, "argon2"),
        }
    }
}

impl FromStr for PasswordScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plaintext" | "plain" => Ok(PasswordScheme::Plaintext),
            "argon2" => Ok(PasswordScheme::Argon2),
            other => Err(anyhow::anyhow!("unknown password scheme: {}", other)),
        }
    }
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value).map_err(|e| ApiError::InternalError(e.to_string()))?;
    Ok(Response::builder()
        .status(status.as_u16())
        .header("Content-Type", "application/json")
        .body(body)
        .build())
}

pub fn message(text: &str) -> Result<Response, ApiError> {
    json_response(StatusCode::OK, &serde_json::json!({ "message": text }))
}

/// Decodes a JSON request body; shape errors become 422 like any other
/// validation failure.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Unprocessable(e.to_string()))
}
