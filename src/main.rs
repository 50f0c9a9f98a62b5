use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use scpl::logging::init_tracing;
use scpl::metrics::{init_metrics, metrics_app};
use scpl::router::init_router;
use scpl::state::AppState;
use scpl_cli::seeder::seed_all;
use scpl_config::{CorsConfig, DatabaseConfig, JwtConfig, RateLimitConfig, SeedConfig, ServerConfig};
use scpl_db::{Stores, init_db_pool, run_migrations};
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env()?;
    let _guard = init_tracing(server_config.environment);

    let jwt_config = JwtConfig::from_env().context("Invalid JWT configuration")?;
    let database_config = DatabaseConfig::from_env()?;

    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    let stores = Stores::postgres(pool);

    if server_config.seed_on_startup {
        let summary = seed_all(&stores, &SeedConfig::from_env(), jwt_config.token_hash_cost)
            .await
            .context("Failed to seed database")?;
        tracing::info!(?summary, "Seeding finished");
    }

    let state = AppState::new(stores, jwt_config, server_config.environment)
        .with_cors(CorsConfig::from_env())
        .with_rate_limit(RateLimitConfig::from_env()?);

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("🚀 Server running on http://localhost:{}", server_config.port);
    tracing::info!("📚 Swagger UI available at http://localhost:{}/swagger-ui", server_config.port);
    tracing::info!("📖 Scalar UI available at http://localhost:{}/scalar", server_config.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
