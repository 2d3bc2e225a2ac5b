use std::net::SocketAddr;
use std::sync::Arc;

use relatorio_api::auth::ensure_bootstrap_user;
use relatorio_api::cache::ProjectCache;
use relatorio_api::config::{ServerConfig, StoreBackend};
use relatorio_api::router::build_app_router;
use relatorio_api::state::AppState;
use relatorio_core::time::Clock;
use relatorio_db::store::{MemoryStore, PgStore, ProjectStore, UserStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relatorio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        backend = ?config.store_backend,
        cache_enabled = config.cache_enabled,
        "Loaded server configuration"
    );

    // --- Store ---
    let (store, users): (Arc<dyn ProjectStore>, Arc<dyn UserStore>) = match config.store_backend
    {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL must be set");

            let pool = relatorio_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            relatorio_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            relatorio_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            let store = Arc::new(PgStore::new(pool));
            (
                store.clone() as Arc<dyn ProjectStore>,
                store as Arc<dyn UserStore>,
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            (
                store.clone() as Arc<dyn ProjectStore>,
                store as Arc<dyn UserStore>,
            )
        }
    };

    if let Some(account) = &config.bootstrap_user {
        ensure_bootstrap_user(users.as_ref(), account)
            .await
            .expect("Failed to create bootstrap account");
    }

    // --- App state ---
    let cache = if config.cache_enabled {
        ProjectCache::new()
    } else {
        ProjectCache::disabled()
    };

    let state = AppState {
        store,
        users,
        cache: Arc::new(cache),
        clock: Clock::System,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
