//! Person CRUD server.
//!
//! Run from repo root: `cargo run -p person-crud-server`
//! Settings come from the environment or a `.env` file: `DATABASE_URL` (omit for an
//! in-memory store), `BIND_ADDR`, `MOUNT_PATH`, `DB_MAX_CONNECTIONS`.

use person_crud::{app, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("person_crud=info,person_crud_server=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let state = AppState::connect(&settings).await?;
    let index = state.urls.index();

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(index = %index, "listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
