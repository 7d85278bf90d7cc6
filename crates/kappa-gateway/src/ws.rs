//! WebSocket connection handling for the scoring protocol
//!
//! Each text frame is one JSON request. Requests are answered in arrival order
//! on the same connection; there is no server-initiated traffic.

use crate::server::GatewayState;
use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures::{SinkExt, StreamExt};
use kappa_core::{ClientMessage, ServerMessage};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Handle a WebSocket connection until the client goes away.
pub async fn handle_connection(
    socket: WebSocket,
    state: Arc<GatewayState>,
    peer: Option<SocketAddr>,
) {
    let session = state.sessions.register(peer);
    let (mut ws_tx, mut ws_rx) = socket.split();

    while let Some(msg) = ws_rx.next().await {
        let reply = match msg {
            Ok(WsMessage::Text(text)) => handle_text_message(&text, &state),
            Ok(WsMessage::Binary(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => handle_text_message(&text, &state),
                Err(_) => {
                    warn!(session = %session.id(), "binary frame is not UTF-8");
                    Some(ServerMessage::invalid_json())
                }
            },
            Ok(WsMessage::Close(_)) => {
                info!(session = %session.id(), "Client closed connection");
                break;
            }
            Err(e) => {
                warn!(session = %session.id(), "WebSocket error: {}", e);
                break;
            }
            _ => None, // Ping, Pong
        };

        let Some(reply) = reply else { continue };
        match serde_json::to_string(&reply) {
            Ok(json) => {
                if ws_tx.send(WsMessage::Text(json)).await.is_err() {
                    break; // Client disconnected
                }
            }
            Err(e) => warn!(session = %session.id(), "failed to encode reply: {}", e),
        }
    }
}

/// Dispatch one request. Returns the frame to send back, if any.
pub fn handle_text_message(text: &str, state: &GatewayState) -> Option<ServerMessage> {
    let message = match ClientMessage::parse(text) {
        Ok(message) => message,
        Err(e) => {
            warn!("rejected message: {}", e);
            return Some(ServerMessage::from_decode_error(&e));
        }
    };

    match message {
        ClientMessage::Analyze {
            text,
            metadata,
            request_id,
        } => {
            let started = Instant::now();
            let result = state.engine.score(&text, Some(metadata));
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            debug!(
                coherence = result.coherence,
                elapsed_ms, "analysis complete"
            );
            Some(ServerMessage::analysis_result(
                result.with_processing_time(elapsed_ms),
                request_id,
            ))
        }
        ClientMessage::GetTrends { request_id } => Some(ServerMessage::trend_analysis(
            state.engine.default_trend(),
            request_id,
        )),
        ClientMessage::Unknown { kind, .. } => {
            warn!("Unsupported message type: {:?}", kind);
            state
                .reject_unknown_types
                .then(|| ServerMessage::unsupported_type(kind.as_deref()))
        }
    }
}
