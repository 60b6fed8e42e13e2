use std::sync::Arc;

use pinplate::config::Config;
use pinplate::services::auth::{AdminTokens, generate_token};
use pinplate::services::template::PgTemplateStore;
use pinplate::state::AppState;
use pinplate::{db, routes};
use scene::memory::MemoryStore;
use scene::store::TemplateStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env is the normal production case.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().expect("invalid configuration");

    let store: Arc<dyn TemplateStore> = match &config.database_url {
        Some(url) => {
            let pool = db::init_pool(url, config.db_max_connections)
                .await
                .expect("database init failed");
            tracing::info!(max_connections = config.db_max_connections, "postgres template store ready");
            Arc::new(PgTemplateStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; templates are kept in memory and lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let admins = if config.admin_tokens.is_empty() {
        let token = generate_token();
        tracing::warn!(%token, "ADMIN_TOKENS not set; generated a one-off administrator token");
        AdminTokens::new([token])
    } else {
        AdminTokens::new(&config.admin_tokens)
    };
    tracing::info!(admins = admins.len(), "administrator tokens loaded");

    let state = AppState::new(store, admins);
    let app = routes::app(state, config.cors_allow_any, config.max_body_bytes);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "pinplate listening");
    axum::serve(listener, app).await.expect("server failed");
}
