//! WebSocket session protocol
//!
//! Wire format (one JSON object per text frame, keyed by `type`):
//!
//! Client → Server:
//!   { "type": "analyze", "text": "...", "metadata": { ... }, "request_id": "r-1" }
//!   { "type": "get_trends", "request_id": "r-2" }
//!
//! Server → Client:
//!   { "type": "analysis_result", "result": { ... }, "request_id": "r-1" }
//!   { "type": "trend_analysis", "trends": { ... }, "request_id": "r-2" }
//!   { "type": "error", "message": "Invalid JSON format" }
//!
//! `request_id` may be any JSON value and is echoed back verbatim (`null` when absent).

use crate::error::{Error, Result};
use crate::types::{Metadata, MetricResult, TrendReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error text sent when a frame is not valid JSON.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format";

// ---------------------------------------------------------------------------
// Client → Server
// ---------------------------------------------------------------------------

/// Decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    Analyze {
        text: String,
        metadata: Metadata,
        request_id: Option<Value>,
    },
    GetTrends {
        request_id: Option<Value>,
    },
    /// Valid JSON whose `type` is missing or not one we serve.
    Unknown {
        kind: Option<String>,
        request_id: Option<Value>,
    },
}

#[derive(Deserialize)]
struct AnalyzePayload {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    metadata: Option<Metadata>,
    #[serde(default)]
    request_id: Option<Value>,
}

impl ClientMessage {
    /// Decode a text frame.
    ///
    /// Returns `Error::Json` when the frame is not JSON at all and
    /// `Error::InvalidMessage` when a known `type` carries a payload of the wrong shape.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let kind = value.get("type").and_then(Value::as_str).map(String::from);
        match kind.as_deref() {
            Some("analyze") => {
                let payload: AnalyzePayload = serde_json::from_value(value)
                    .map_err(|e| Error::invalid_message(format!("analyze: {}", e)))?;
                Ok(Self::Analyze {
                    text: payload.text.unwrap_or_default(),
                    metadata: payload.metadata.unwrap_or_default(),
                    request_id: payload.request_id,
                })
            }
            Some("get_trends") => Ok(Self::GetTrends {
                request_id: request_id_of(&value),
            }),
            _ => Ok(Self::Unknown {
                request_id: request_id_of(&value),
                kind,
            }),
        }
    }

    pub fn request_id(&self) -> Option<&Value> {
        match self {
            ClientMessage::Analyze { request_id, .. }
            | ClientMessage::GetTrends { request_id }
            | ClientMessage::Unknown { request_id, .. } => request_id.as_ref(),
        }
    }
}

fn request_id_of(value: &Value) -> Option<Value> {
    value
        .get("request_id")
        .filter(|v| !v.is_null())
        .cloned()
}

// ---------------------------------------------------------------------------
// Server → Client
// ---------------------------------------------------------------------------

/// Outbound message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    AnalysisResult {
        result: MetricResult,
        request_id: Option<Value>,
    },
    TrendAnalysis {
        trends: TrendReport,
        request_id: Option<Value>,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    pub fn analysis_result(result: MetricResult, request_id: Option<Value>) -> Self {
        Self::AnalysisResult { result, request_id }
    }

    pub fn trend_analysis(trends: TrendReport, request_id: Option<Value>) -> Self {
        Self::TrendAnalysis { trends, request_id }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn invalid_json() -> Self {
        Self::error(INVALID_JSON_MESSAGE)
    }

    pub fn unsupported_type(kind: Option<&str>) -> Self {
        match kind {
            Some(kind) => Self::error(format!("Unsupported message type: {}", kind)),
            None => Self::error("Missing message type"),
        }
    }

    /// Map a decode failure to the error frame sent back to the client.
    pub fn from_decode_error(err: &Error) -> Self {
        match err {
            Error::Json(_) => Self::invalid_json(),
            other => Self::error(format!("Invalid message payload: {}", other)),
        }
    }
}
