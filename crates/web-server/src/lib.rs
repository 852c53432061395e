use axum::{
    routing::{delete, get, post},
    Router,
};
use configuration::Config;
use database::{DbRepository, ProductStore};
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeFile, trace::TraceLayer};

pub mod error;
pub mod forms;
pub mod handlers;
pub mod views;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }
}

/// Builds the catalog routes. `static_dir` must hold `favicon.ico`.
pub fn build_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route_service("/favicon.ico", ServeFile::new(static_dir.join("favicon.ico")))
        .route("/add_produto", post(handlers::add_product))
        .route("/get_produto/:product_id", get(handlers::get_product))
        .route(
            "/update_produto/:product_id",
            post(handlers::update_product).put(handlers::update_product),
        )
        .route("/del_produto/:product_id", delete(handlers::delete_product))
        .route("/add_comentario/:product_id", post(handlers::add_comment))
        .with_state(state)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Connects to PostgreSQL, makes sure the schema exists and serves until Ctrl+C.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let db_pool = database::connect(&config.database).await?;
    if config.database.ensure_schema {
        database::run_migrations(&db_pool).await?;
    }
    let store: Arc<dyn ProductStore> = Arc::new(DbRepository::new(db_pool));

    let app_state = Arc::new(AppState::new(store));
    let app = build_router(app_state, &config.server.static_dir);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
}
