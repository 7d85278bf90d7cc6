//! Kappa Gateway - WebSocket session server in front of the scoring engine

pub mod server;
pub mod session;
pub mod ws;

pub use server::{router, serve, start_server, GatewayState};
pub use session::{SessionGuard, SessionId, SessionInfo, SessionRegistry};
