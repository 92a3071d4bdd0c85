use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use mingle_api::{AppState, AppStateInner};
use mingle_gateway::connection;
use mingle_gateway::dispatcher::Dispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mingle=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("MINGLE_DB_PATH").unwrap_or_else(|_| "mingle.db".into());
    let upload_dir = std::env::var("MINGLE_UPLOAD_DIR").unwrap_or_else(|_| "uploads".into());
    let host = std::env::var("MINGLE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("MINGLE_PORT")
        .unwrap_or_else(|_| "8001".into())
        .parse()?;

    // Init database
    let db = mingle_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let dispatcher = Dispatcher::new();
    let state: AppState = Arc::new(AppStateInner {
        db,
        dispatcher,
        upload_dir: PathBuf::from(upload_dir),
    });

    // Routes
    let live_route = Router::new()
        .route("/live", get(ws_upgrade))
        .with_state(state.clone());

    let app = mingle_api::router(state)
        .merge(live_route)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Mingle server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| connection::handle_socket(socket, state.dispatcher.clone()))
}
