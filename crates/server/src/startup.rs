use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, DatabaseConfig, ServerConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {e}", cfg.host, cfg.port)))
}

/// Connect, bring the schema up to date and wrap the pool in router state.
pub async fn build_state(cfg: &DatabaseConfig) -> Result<ServerState, StartupError> {
    let db = models::db::connect_with_config(cfg).await?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    Ok(ServerState::new(db))
}

pub fn app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let addr = bind_addr(&cfg.server)?;
    let state = build_state(&cfg.database).await?;
    let app = app(state);

    info!(%addr, "starting sites server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
