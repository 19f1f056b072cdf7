use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::product::{ProductService, SeaOrmProductRepository};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}:{}: {e}", server.host, server.port)))
}

/// Wire the product service to an open connection.
pub fn build_state(db: DatabaseConnection) -> ServerState {
    let repo = Arc::new(SeaOrmProductRepository::new(db));
    ServerState { products: Arc::new(ProductService::new(repo)) }
}

/// Router with the default CORS policy, ready to serve.
pub fn build_app(db: DatabaseConnection) -> Router {
    routes::build_router(build_state(db), build_cors())
}

/// Public entry: open the pool, serve until `shutdown` resolves, then close the pool.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::ensure_schema(&db)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    let app = build_app(db.clone());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting inventory server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("http server drained, closing database pool");
    db.close().await?;
    Ok(())
}
