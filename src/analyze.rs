//! One-shot analysis: pick the input, score it, write the report.

use anyhow::Context;
use chrono::{DateTime, Local};
use kappa_core::MetricResult;
use kappa_engine::{BraidMap, KappaEngine};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Scored when neither `--text` nor `--file` is given.
pub const SAMPLE_TEXT: &str = "The patient presents with symptoms of fatigue and shortness of breath. \
Lab results show elevated white blood cell count. Differential diagnosis \
includes infection, inflammatory conditions, or early-stage hematologic \
malignancy. Further testing recommended.";

/// Where the text to analyze comes from. Inline text wins over a file.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Text(String),
    File(PathBuf),
    Sample,
}

impl InputSource {
    pub fn from_args(text: Option<String>, file: Option<PathBuf>) -> Self {
        match (text, file) {
            (Some(text), _) => Self::Text(text),
            (None, Some(path)) => Self::File(path),
            (None, None) => Self::Sample,
        }
    }

    pub fn read(&self) -> anyhow::Result<String> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read input file {}", path.display())),
            Self::Sample => Ok(SAMPLE_TEXT.to_string()),
        }
    }
}

/// On-disk report: the result plus its visualizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis: MetricResult,
    pub braid_map: BraidMap,
}

impl AnalysisReport {
    /// Score `text` with wall-clock timing and derive the braid map.
    pub fn run(engine: &KappaEngine, text: &str) -> Self {
        let started = Instant::now();
        let result = engine.score(text.trim(), None);
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        let analysis = result.with_processing_time(elapsed_ms);
        let braid_map = BraidMap::from_result(&analysis);
        Self {
            analysis,
            braid_map,
        }
    }

    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}

/// `kappa_analysis_<YYYYmmdd_HHMMSS>.json` in the working directory.
pub fn default_output_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("kappa_analysis_{}.json", now.format("%Y%m%d_%H%M%S")))
}

/// Human-readable summary printed after an analysis.
pub fn summary(result: &MetricResult) -> String {
    let mut out = String::from("=== Kappa Coherence Analysis ===\n");
    let rows = [
        ("Coherence Score", result.coherence),
        ("Stability Index", result.stability),
        ("Pattern Entropy", result.entropy),
        ("Resonance Level", result.resonance),
        ("Complexity Factor", result.complexity),
        ("Coherence Variance", result.coherence_variance),
        ("Confidence Score", result.confidence_score),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{}: {:.3}", label, value);
    }
    let _ = writeln!(out, "Risk Assessment: {}", result.risk_assessment);
    let _ = writeln!(out, "Processing Time: {:.1}ms", result.processing_time_ms);
    let _ = writeln!(out, "Token Count: {}", result.token_count);
    out
}
