use anyhow::Context;

use crate::core::helpers::PasswordScheme;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Scheme word that prefixes every issued token.
pub const TOKEN_PREFIX: &str = "Bearer";
pub const TOKEN_TYPE: &str = "bearer";

pub fn bind_addr() -> String {
    std::env::var("SOCIALNET_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

pub fn log_filter() -> String {
    std::env::var("SOCIALNET_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

pub const PASSWORD_SCHEME_VAR: &str = "SOCIALNET_PASSWORD_SCHEME";

/// Unset means plaintext; a value that names no scheme is an error.
pub fn parse_password_scheme(value: Option<&str>) -> anyhow::Result<PasswordScheme> {
    match value {
        None => Ok(PasswordScheme::default()),
        Some(v) => v.parse::<PasswordScheme>().context(PASSWORD_SCHEME_VAR),
    }
}

pub fn password_scheme() -> anyhow::Result<PasswordScheme> {
    parse_password_scheme(std::env::var(PASSWORD_SCHEME_VAR).ok().as_deref())
}

pub fn pin_post_author() -> bool {
    env_flag("SOCIALNET_PIN_POST_AUTHOR")
}

pub fn dedupe_reactions() -> bool {
    env_flag("SOCIALNET_DEDUPE_REACTIONS")
}

pub fn seed_demo() -> bool {
    env_flag("SOCIALNET_SEED_DEMO")
}

/// Behavior switches owned by the store.
///
/// The defaults keep the wire-compatible behavior: plaintext passwords, an
/// editor may reassign authorship on replace, and reactions are an
/// append-only log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub password_scheme: PasswordScheme,
    pub pin_post_author: bool,
    pub dedupe_reactions: bool,
    pub seed_demo: bool,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Settings {
            password_scheme: password_scheme()?,
            pin_post_author: pin_post_author(),
            dedupe_reactions: dedupe_reactions(),
            seed_demo: seed_demo(),
        })
    }
}
