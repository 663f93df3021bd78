use http::StatusCode;
use spin_sdk::http::{Request, Response};

use crate::config::{TOKEN_PREFIX, TOKEN_TYPE};
use crate::core::db::{lock, Database, SharedDb};
use crate::core::errors::{ApiError, SocialError};
use crate::core::form::{parse_form, required};
use crate::core::helpers::{json_response, parse_json};
use crate::models::models::{Credentials, Token};

// === Session issuer ===

impl Database {
    /// Check credentials and hand out a session token.
    ///
    /// The token is derived from the username alone, so anyone who knows a
    /// username can build one. Kept as is for compatibility with existing
    /// clients.
    pub fn login(&self, username: &str, password: &str) -> Result<String, SocialError> {
        let user = self.lookup(username).ok_or(SocialError::InvalidCredentials)?;
        if !self.settings.password_scheme.verify(password, &user.password) {
            return Err(SocialError::InvalidCredentials);
        }
        Ok(issue_token(&user.username))
    }
}

pub fn issue_token(username: &str) -> String {
    format!("{} {}", TOKEN_PREFIX, username)
}

// === Token identity resolver ===

/// Map a token back to its username: the second whitespace-separated field.
pub fn resolve_token(token: &str) -> Result<String, SocialError> {
    token
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
        .ok_or(SocialError::MalformedToken)
}

/// Pull the token out of `Authorization: <scheme> <token>`.
///
/// The scheme must be `bearer` in any case. Everything after the first space
/// is the token, so a token handed out by login travels as
/// `Authorization: Bearer Bearer alice`.
pub fn bearer_credential(req: &Request) -> Result<String, ApiError> {
    let not_authenticated = || ApiError::Unauthorized("Not authenticated".to_string());

    let header = req
        .header("authorization")
        .and_then(|h| h.as_str())
        .ok_or_else(not_authenticated)?;

    let (scheme, token) = match header.split_once(' ') {
        Some((scheme, token)) => (scheme, token),
        None => (header, ""),
    };
    if !scheme.eq_ignore_ascii_case(TOKEN_TYPE) || token.is_empty() {
        return Err(not_authenticated());
    }
    Ok(token.to_string())
}

/// Resolve the actor of a protected request.
pub fn authenticate(req: &Request) -> Result<String, ApiError> {
    let token = bearer_credential(req)?;
    resolve_token(&token).map_err(|e| {
        tracing::warn!(error = %e, "rejected bearer token");
        ApiError::from(e)
    })
}

// === HTTP handlers ===

fn read_credentials(req: &Request) -> Result<Credentials, ApiError> {
    let is_json = req
        .header("content-type")
        .and_then(|h| h.as_str())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false);

    if is_json {
        return parse_json(req.body());
    }

    let fields = parse_form(req.body());
    Ok(Credentials {
        username: required(&fields, "username").map_err(ApiError::Unprocessable)?,
        password: required(&fields, "password").map_err(ApiError::Unprocessable)?,
    })
}

pub fn login_user(db: &SharedDb, req: &Request) -> Result<Response, ApiError> {
    let creds = read_credentials(req)?;

    let result = lock(db)?.login(&creds.username, &creds.password);
    match result {
        Ok(access_token) => {
            tracing::info!(username = %creds.username, "token issued");
            json_response(
                StatusCode::OK,
                &Token {
                    access_token,
                    token_type: TOKEN_TYPE.to_string(),
                },
            )
        }
        Err(e) => {
            tracing::warn!(username = %creds.username, "login rejected");
            Err(e.into())
        }
    }
}
