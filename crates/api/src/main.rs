use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use coffeeshop_db::store::{DrinkStore, MemoryDrinkStore, PgDrinkStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coffeeshop_api::auth::keys::HttpKeySetSource;
use coffeeshop_api::auth::TokenVerifier;
use coffeeshop_api::cli::Cli;
use coffeeshop_api::config::{ServerConfig, StorageBackend};
use coffeeshop_api::router::build_app_router;
use coffeeshop_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // `coffeeshop-api --migrate` applies migrations and exits.
    let migrate_only = Cli::parse().migrate;

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage_backend,
        "Loaded server configuration"
    );

    // --- Storage ---
    let store: Arc<dyn DrinkStore> = match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL must be set");

            let pool = coffeeshop_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            coffeeshop_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            if config.run_migrations || migrate_only {
                coffeeshop_db::run_migrations(&pool)
                    .await
                    .expect("Failed to run database migrations");
                tracing::info!("Database migrations applied");
            }

            Arc::new(PgDrinkStore::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory drink store; data is lost on exit");
            Arc::new(MemoryDrinkStore::new())
        }
    };

    if migrate_only {
        tracing::info!("Migration run complete, exiting");
        return;
    }

    // --- Token verification ---
    let key_source = HttpKeySetSource::new(
        config.auth.jwks_url.clone(),
        Duration::from_secs(config.auth.jwks_timeout_secs),
    )
    .expect("Failed to build JWKS HTTP client");
    tracing::info!(jwks_url = %key_source.url(), issuer = %config.auth.issuer(), "Token verifier configured");
    let verifier = TokenVerifier::new(&config.auth, Arc::new(key_source));

    // --- App state ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState {
        store,
        config: Arc::new(config),
        verifier: Arc::new(verifier),
    };

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
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

/// Install the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "coffeeshop_api=debug,coffeeshop_db=info,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
