#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::net::TcpListener;

    use anyhow::Context;
    use socialnet::config::{self, Settings};
    use socialnet::Database;
    use tracing_subscriber::EnvFilter;

    pub async fn run() -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config::log_filter())),
            )
            .init();

        let settings = Settings::from_env().context("loading settings")?;
        tracing::info!(
            password_scheme = %settings.password_scheme,
            pin_post_author = settings.pin_post_author,
            dedupe_reactions = settings.dedupe_reactions,
            "starting social networking api"
        );

        let mut db = Database::new(settings);
        if db.settings().seed_demo {
            db.seed_demo().context("seeding demo data")?;
        }

        let addr = config::bind_addr();
        let listener = TcpListener::bind(&addr).with_context(|| format!("binding {}", addr))?;
        tracing::info!("Server listening on http://{}", addr);

        socialnet::server::run(listener, db.into_shared())?.await?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    native::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
