//! Gateway server: routes, shared state and the accept loop

use crate::session::SessionRegistry;
use crate::ws::handle_connection;
use axum::{
    extract::{ConnectInfo, State, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use kappa_core::ServerConfig;
use kappa_engine::KappaEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for all connections.
pub struct GatewayState {
    /// Engine and history shared by every session.
    pub engine: Arc<KappaEngine>,
    pub sessions: Arc<SessionRegistry>,
    /// Answer unknown message types with an error frame instead of dropping them.
    pub reject_unknown_types: bool,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(engine: Arc<KappaEngine>, reject_unknown_types: bool) -> Self {
        Self {
            engine,
            sessions: Arc::new(SessionRegistry::new()),
            reject_unknown_types,
            started_at: Instant::now(),
        }
    }
}

pub fn router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/", get(ws_handler))
        .route("/ws", get(ws_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already bound listener until the task is cancelled.
pub async fn serve(listener: TcpListener, state: Arc<GatewayState>) -> anyhow::Result<()> {
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn start_server(config: &ServerConfig, engine: Arc<KappaEngine>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let local = listener.local_addr()?;

    info!("Kappa Gateway v{} starting", env!("CARGO_PKG_VERSION"));
    info!("  Listening on: {}", local);
    info!("  WebSocket: ws://{}/ws", local);
    info!(
        "  Engine: sensitivity={} threshold={}",
        engine.config().sensitivity,
        engine.config().threshold
    );

    let state = Arc::new(GatewayState::new(engine, config.reject_unknown_types));
    serve(listener, state).await
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(state): State<Arc<GatewayState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_connection(socket, state, Some(peer)))
}

async fn health_handler(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.len(),
        "history_len": state.engine.history_len(),
        "uptime_secs": state.started_at.elapsed().as_secs(),
    }))
}
