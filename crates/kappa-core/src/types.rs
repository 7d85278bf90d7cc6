//! Core types for Kappa

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied key/value data carried through a scoring call untouched.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Categorical risk derived from coherence, stability and entropy.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scoring result. Every metric field lies in [0, 1].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetricResult {
    pub coherence: f64,
    pub stability: f64,
    pub entropy: f64,
    pub resonance: f64,
    pub complexity: f64,
    pub coherence_variance: f64,
    pub token_count: usize,
    pub confidence_score: f64,
    pub risk_assessment: RiskLevel,
    pub timestamp: DateTime<Utc>,
    /// Wall-clock cost of the scoring call, filled in by whoever timed it.
    pub processing_time_ms: f64,
    #[serde(default)]
    pub metadata: Metadata,
}

impl MetricResult {
    /// Fixed result for empty or whitespace-only input.
    pub fn empty() -> Self {
        Self {
            coherence: 0.0,
            stability: 0.0,
            entropy: 1.0,
            resonance: 0.0,
            complexity: 0.0,
            coherence_variance: 1.0,
            token_count: 0,
            confidence_score: 0.0,
            risk_assessment: RiskLevel::High,
            timestamp: Utc::now(),
            processing_time_ms: 0.0,
            metadata: Metadata::new(),
        }
    }

    pub fn with_processing_time(mut self, elapsed_ms: f64) -> Self {
        self.processing_time_ms = elapsed_ms.max(0.0);
        self
    }
}

/// Direction of the coherence trend over the history window.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
    Unknown,
}

/// Trend over the most recent history entries.
///
/// Serializes as `{"trend": "insufficient_data", "direction": "unknown"}` or
/// `{"trend": "analyzed", "direction": ..., "slope": ..., ...}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "trend", rename_all = "snake_case")]
pub enum TrendReport {
    InsufficientData {
        direction: TrendDirection,
    },
    Analyzed {
        direction: TrendDirection,
        slope: f64,
        average_coherence: f64,
        coherence_std: f64,
        sample_size: usize,
    },
}

impl TrendReport {
    pub fn insufficient() -> Self {
        Self::InsufficientData {
            direction: TrendDirection::Unknown,
        }
    }

    pub fn direction(&self) -> TrendDirection {
        match self {
            TrendReport::InsufficientData { direction } => *direction,
            TrendReport::Analyzed { direction, .. } => *direction,
        }
    }

    pub fn is_analyzed(&self) -> bool {
        matches!(self, TrendReport::Analyzed { .. })
    }
}
