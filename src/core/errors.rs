use std::fmt;

use http::StatusCode;
use spin_sdk::http::Response;
use thiserror::Error;

/// Ownership-gated mutations of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Edit,
    Delete,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Edit => write!(f, "edit"),
            Mutation::Delete => write!(f, "delete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reaction::Like => write!(f, "like"),
            Reaction::Dislike => write!(f, "dislike"),
        }
    }
}

/// A declined store operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SocialError {
    #[error("Username already exists")]
    DuplicateUser,

    #[error("Username must be non-empty and contain no whitespace")]
    InvalidUsername,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Malformed bearer token")]
    MalformedToken,

    #[error("Post {0} not found")]
    NotFound(usize),

    #[error("You are not authorized to {0} this post")]
    Forbidden(Mutation),

    #[error("You cannot {0} your own post")]
    SelfReaction(Reaction),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Unprocessable: {0}")]
    Unprocessable(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unprocessable(msg)
            | ApiError::InternalError(msg) => msg,
            ApiError::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

impl From<SocialError> for ApiError {
    fn from(err: SocialError) -> Self {
        let msg = err.to_string();
        match err {
            SocialError::DuplicateUser
            | SocialError::InvalidCredentials
            | SocialError::SelfReaction(_) => ApiError::BadRequest(msg),
            SocialError::InvalidUsername => ApiError::Unprocessable(msg),
            SocialError::MalformedToken => ApiError::Unauthorized(msg),
            SocialError::NotFound(_) => ApiError::NotFound(msg),
            SocialError::Forbidden(_) => ApiError::Forbidden(msg),
            SocialError::PasswordHash(_) => ApiError::InternalError(msg),
        }
    }
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        let body = serde_json::json!({ "detail": err.detail() }).to_string();
        let mut builder = Response::builder();
        builder
            .status(err.status().as_u16())
            .header("Content-Type", "application/json");
        if let ApiError::Unauthorized(_) = err {
            builder.header("WWW-Authenticate", "Bearer");
        }
        builder.body(body.into_bytes()).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (SocialError::DuplicateUser, StatusCode::BAD_REQUEST),
            (SocialError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (SocialError::InvalidUsername, StatusCode::UNPROCESSABLE_ENTITY),
            (SocialError::MalformedToken, StatusCode::UNAUTHORIZED),
            (SocialError::NotFound(3), StatusCode::NOT_FOUND),
            (SocialError::Forbidden(Mutation::Delete), StatusCode::FORBIDDEN),
            (SocialError::SelfReaction(Reaction::Like), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn messages_name_the_action() {
        assert_eq!(
            SocialError::Forbidden(Mutation::Edit).to_string(),
            "You are not authorized to edit this post"
        );
        assert_eq!(
            SocialError::SelfReaction(Reaction::Dislike).to_string(),
            "You cannot dislike your own post"
        );
        assert_eq!(SocialError::NotFound(5).to_string(), "Post 5 not found");
    }

    #[test]
    fn response_carries_detail_body() {
        let resp: Response = ApiError::NotFound("Post 1 not found".to_string()).into();
        assert_eq!(*resp.status(), 404);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["detail"], "Post 1 not found");
    }

    #[test]
    fn method_not_allowed_is_405() {
        let resp: Response = ApiError::MethodNotAllowed.into();
        assert_eq!(*resp.status(), 405);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["detail"], "Method Not Allowed");
    }
}
