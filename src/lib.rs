pub mod auth;
pub mod config;
pub mod core;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod posts;
pub mod reactions;
pub mod static_server;
pub mod users;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;

pub use crate::config::Settings;
pub use crate::core::db::{Database, SharedDb};
pub use crate::core::errors::{ApiError, SocialError};

// === Component entrypoint ===

#[cfg(target_arch = "wasm32")]
mod component {
    use std::sync::OnceLock;

    use spin_sdk::http::{IntoResponse, Request};
    use spin_sdk::http_component;

    use crate::config::Settings;
    use crate::core::db::{Database, SharedDb};

    // The component ABI gives no place to hand over state, so the store lives
    // for as long as the instance does.
    fn shared_db() -> &'static SharedDb {
        static DB: OnceLock<SharedDb> = OnceLock::new();
        DB.get_or_init(|| {
            let settings = Settings::from_env().unwrap_or_else(|e| {
                tracing::warn!(error = ?e, "invalid settings, using defaults");
                Settings::default()
            });
            let mut db = Database::new(settings);
            if db.settings().seed_demo {
                if let Err(e) = db.seed_demo() {
                    tracing::error!(error = %e, "failed to seed demo data");
                }
            }
            db.into_shared()
        })
    }

    #[http_component]
    fn handle(req: Request) -> anyhow::Result<impl IntoResponse> {
        Ok(crate::handlers::route(shared_db(), req))
    }
}
