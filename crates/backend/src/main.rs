pub mod api;
pub mod dashboards;
pub mod shared;

use dashboards::d100_b2c_overview::OrderStore;
use std::sync::Arc;

/// Shared state of the HTTP handlers. The store is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<OrderStore>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use axum::{routing::get, Router};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("backend.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config = shared::config::load_config()?;

    let orders_path = shared::config::resolve_path(&config.data.orders_csv);
    let store = OrderStore::load(&orders_path)
        .map_err(|e| anyhow::anyhow!("orders load failed: {e}"))?;
    let state = AppState {
        store: Arc::new(store),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let static_dir = shared::config::resolve_path(&config.server.static_dir);
    tracing::info!("Serving frontend from {}", static_dir.display());

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/b2c/filters",
            get(api::handlers::d100_b2c_overview::get_filters),
        )
        .route(
            "/api/b2c/overview",
            get(api::handlers::d100_b2c_overview::get_overview),
        )
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(shared::request_log::request_logger))
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
