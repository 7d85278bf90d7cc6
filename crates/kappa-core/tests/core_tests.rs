//! Tests for kappa-core: result types, session protocol, config loading, errors

use kappa_core::*;
use serde_json::json;

// ===========================================================================
// RiskLevel
// ===========================================================================

#[test]
fn risk_level_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&RiskLevel::Low).unwrap(), r#""low""#);
    assert_eq!(
        serde_json::to_string(&RiskLevel::Moderate).unwrap(),
        r#""moderate""#
    );
    assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), r#""high""#);
}

#[test]
fn risk_level_display_matches_wire() {
    assert_eq!(format!("{}", RiskLevel::Moderate), "moderate");
}

// ===========================================================================
// MetricResult
// ===========================================================================

#[test]
fn metric_result_wire_fields() {
    let json = serde_json::to_value(MetricResult::empty()).unwrap();
    for field in [
        "coherence",
        "stability",
        "entropy",
        "resonance",
        "complexity",
        "coherence_variance",
        "token_count",
        "confidence_score",
        "risk_assessment",
        "timestamp",
        "processing_time_ms",
        "metadata",
    ] {
        assert!(json.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(json["risk_assessment"], "high");
    assert_eq!(json["metadata"], json!({}));
}

#[test]
fn metric_result_deserializes_without_metadata() {
    let mut json = serde_json::to_value(MetricResult::empty()).unwrap();
    json.as_object_mut().unwrap().remove("metadata");
    let back: MetricResult = serde_json::from_value(json).unwrap();
    assert!(back.metadata.is_empty());
}

// ===========================================================================
// TrendReport
// ===========================================================================

#[test]
fn analyzed_trend_wire_shape() {
    let report = TrendReport::Analyzed {
        direction: TrendDirection::Improving,
        slope: 0.05,
        average_coherence: 0.5,
        coherence_std: 0.1,
        sample_size: 10,
    };
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["trend"], "analyzed");
    assert_eq!(json["direction"], "improving");
    assert_eq!(json["sample_size"], 10);
    assert!(report.is_analyzed());
    assert_eq!(report.direction(), TrendDirection::Improving);
}

// ===========================================================================
// ClientMessage decoding
// ===========================================================================

#[test]
fn parse_analyze_full() {
    let msg = ClientMessage::parse(
        r#"{"type":"analyze","text":"hello world","metadata":{"src":"test"},"request_id":"r-1"}"#,
    )
    .unwrap();
    match msg {
        ClientMessage::Analyze {
            text,
            metadata,
            request_id,
        } => {
            assert_eq!(text, "hello world");
            assert_eq!(metadata["src"], "test");
            assert_eq!(request_id, Some(json!("r-1")));
        }
        other => panic!("expected Analyze, got {:?}", other),
    }
}

#[test]
fn parse_analyze_defaults() {
    let msg = ClientMessage::parse(r#"{"type":"analyze"}"#).unwrap();
    assert_eq!(
        msg,
        ClientMessage::Analyze {
            text: String::new(),
            metadata: Metadata::new(),
            request_id: None,
        }
    );
}

#[test]
fn parse_analyze_null_fields() {
    let msg =
        ClientMessage::parse(r#"{"type":"analyze","text":null,"metadata":null}"#).unwrap();
    match msg {
        ClientMessage::Analyze { text, metadata, .. } => {
            assert!(text.is_empty());
            assert!(metadata.is_empty());
        }
        other => panic!("expected Analyze, got {:?}", other),
    }
}

#[test]
fn parse_analyze_numeric_request_id() {
    let msg = ClientMessage::parse(r#"{"type":"analyze","text":"x","request_id":42}"#).unwrap();
    assert_eq!(msg.request_id(), Some(&json!(42)));
}

#[test]
fn parse_analyze_wrong_text_type_is_invalid_message() {
    let err = ClientMessage::parse(r#"{"type":"analyze","text":5}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidMessage(_)));
}

#[test]
fn parse_get_trends() {
    let msg = ClientMessage::parse(r#"{"type":"get_trends","request_id":"t"}"#).unwrap();
    assert_eq!(
        msg,
        ClientMessage::GetTrends {
            request_id: Some(json!("t"))
        }
    );
}

#[test]
fn parse_unknown_type() {
    let msg = ClientMessage::parse(r#"{"type":"subscribe"}"#).unwrap();
    assert_eq!(
        msg,
        ClientMessage::Unknown {
            kind: Some("subscribe".into()),
            request_id: None,
        }
    );
}

#[test]
fn parse_missing_type_and_non_objects_are_unknown() {
    for text in [r#"{"text":"hi"}"#, "[1,2,3]", "42", r#""analyze""#] {
        let msg = ClientMessage::parse(text).unwrap();
        assert!(
            matches!(msg, ClientMessage::Unknown { kind: None, .. }),
            "{} decoded as {:?}",
            text,
            msg
        );
    }
}

#[test]
fn parse_garbage_is_json_error() {
    let err = ClientMessage::parse("not json {").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

// ===========================================================================
// ServerMessage encoding
// ===========================================================================

#[test]
fn invalid_json_frame() {
    let json = serde_json::to_value(ServerMessage::invalid_json()).unwrap();
    assert_eq!(json, json!({ "type": "error", "message": "Invalid JSON format" }));
}

#[test]
fn decode_error_mapping() {
    let json_err = ClientMessage::parse("{").unwrap_err();
    assert_eq!(
        ServerMessage::from_decode_error(&json_err),
        ServerMessage::invalid_json()
    );

    let payload_err = ClientMessage::parse(r#"{"type":"analyze","text":[]}"#).unwrap_err();
    match ServerMessage::from_decode_error(&payload_err) {
        ServerMessage::Error { message } => assert!(message.starts_with("Invalid message payload")),
        other => panic!("expected error frame, got {:?}", other),
    }
}

#[test]
fn trend_analysis_echoes_null_request_id() {
    let msg = ServerMessage::trend_analysis(TrendReport::insufficient(), None);
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["type"], "trend_analysis");
    assert_eq!(json["trends"]["trend"], "insufficient_data");
    assert!(json["request_id"].is_null());
    assert!(json.as_object().unwrap().contains_key("request_id"));
}

#[test]
fn analysis_result_roundtrip() {
    let msg = ServerMessage::analysis_result(MetricResult::empty(), Some(json!("abc")));
    let text = serde_json::to_string(&msg).unwrap();
    let back: ServerMessage = serde_json::from_str(&text).unwrap();
    assert_eq!(back, msg);
}

#[test]
fn unsupported_type_frames() {
    assert_eq!(
        ServerMessage::unsupported_type(Some("ping")),
        ServerMessage::error("Unsupported message type: ping")
    );
    assert_eq!(
        ServerMessage::unsupported_type(None),
        ServerMessage::error("Missing message type")
    );
}

// ===========================================================================
// Config loading
// ===========================================================================

#[test]
fn load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = KappaConfig::load(&dir.path().join("nope.toml"));
    assert_eq!(config, KappaConfig::default());
}

#[test]
fn load_malformed_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kappa.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();
    assert_eq!(KappaConfig::load(&path), KappaConfig::default());
}

#[test]
fn load_roundtrips_written_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kappa.toml");
    let mut config = KappaConfig::default();
    config.engine.sensitivity = 1.5;
    config.server.port = 9000;
    config.server.reject_unknown_types = true;
    std::fs::write(&path, config.to_toml()).unwrap();
    assert_eq!(KappaConfig::load(&path), config);
}

// ===========================================================================
// Error
// ===========================================================================

#[test]
fn error_display() {
    assert_eq!(
        Error::config("bad threshold").to_string(),
        "config error: bad threshold"
    );
    assert_eq!(
        Error::invalid_message("nope").to_string(),
        "invalid message: nope"
    );
    let io: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(io.to_string().starts_with("io error"));
}
