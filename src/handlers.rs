use std::sync::OnceLock;

use regex::Regex;
use spin_sdk::http::{Method, Request, Response};

use crate::core::db::SharedDb;
use crate::core::errors::{ApiError, Reaction};
use crate::{auth, posts, reactions, static_server, users};

/// What a `/posts/{index}...` path asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PostAction {
    Item,
    React(Reaction),
    Reactions,
}

fn post_path_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^/posts/([^/]+)(?:/(like|dislike|reactions))?/?$").expect("Regex should compile")
    })
}

/// Split a post path into its raw index and action. `None` means the path is
/// not a post route at all.
fn parse_post_path(path: &str) -> Option<(&str, PostAction)> {
    let caps = post_path_regex().captures(path)?;

    let action = match caps.get(2).map(|m| m.as_str()) {
        None => PostAction::Item,
        Some("like") => PostAction::React(Reaction::Like),
        Some("dislike") => PostAction::React(Reaction::Dislike),
        Some(_) => PostAction::Reactions,
    };

    Some((caps.get(1)?.as_str(), action))
}

/// An integer that no post can sit at (negative, or past `usize`) is a
/// missing post; anything else that is not an integer is a validation error.
fn parse_index(raw: &str) -> Result<usize, ApiError> {
    if let Ok(index) = raw.parse::<usize>() {
        return Ok(index);
    }

    let digits = raw
        .strip_prefix('-')
        .or_else(|| raw.strip_prefix('+'))
        .unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::NotFound(format!("Post {} not found", raw)));
    }
    Err(ApiError::Unprocessable(format!("path index is not a valid integer: {}", raw)))
}

/// Dispatch a request against the store. Errors are folded into responses.
pub fn route(db: &SharedDb, req: Request) -> Response {
    let path = req.path().to_string();
    tracing::debug!(method = %req.method(), path = %path, "request");

    let result = match (req.method(), path.as_str()) {
        (Method::Post, "/signup") => users::signup(db, &req),
        (Method::Post, "/token") => auth::login_user(db, &req),
        (Method::Get, "/posts") => posts::list_posts(db, &req),
        (Method::Post, "/posts") => posts::create_post(db, &req),
        (Method::Get, "/docs") | (Method::Get, "/openapi.json") => static_server::serve_static(&path),
        (_, "/signup" | "/token" | "/posts" | "/docs" | "/openapi.json") => Err(ApiError::MethodNotAllowed),
        (method, p) => match parse_post_path(p) {
            Some((raw, action)) => match (method, action) {
                (Method::Put, PostAction::Item) => {
                    parse_index(raw).and_then(|index| posts::edit_post(db, &req, index))
                }
                (Method::Delete, PostAction::Item) => {
                    parse_index(raw).and_then(|index| posts::delete_post(db, &req, index))
                }
                (Method::Post, PostAction::React(reaction)) => {
                    parse_index(raw).and_then(|index| reactions::handle_reaction(db, &req, index, reaction))
                }
                (Method::Get, PostAction::Reactions) => {
                    parse_index(raw).and_then(|index| reactions::get_reactions(db, &req, index))
                }
                _ => Err(ApiError::MethodNotAllowed),
            },
            None => Err(ApiError::NotFound("Not Found".to_string())),
        },
    };

    result.unwrap_or_else(|e| {
        if let ApiError::InternalError(msg) = &e {
            tracing::error!(path = %path, error = %msg, "request failed");
        }
        e.into()
    })
}
