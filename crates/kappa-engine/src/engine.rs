//! Scoring entry point.
//!
//! `KappaEngine` owns the configuration and the result history. It is shared
//! across sessions behind an `Arc`; history mutations are guarded by a
//! `parking_lot::Mutex` so confidence reads and appends stay consistent when
//! requests are handled on several threads.

use crate::assess;
use crate::correction;
use crate::history::History;
use crate::metrics::{self, PrimaryMetrics};
use crate::preprocess::preprocess;
use chrono::Utc;
use kappa_core::{EngineConfig, Metadata, MetricResult, Result, TrendReport};
use parking_lot::Mutex;
use tracing::debug;

pub struct KappaEngine {
    config: EngineConfig,
    history: Mutex<History>,
}

impl KappaEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            history: Mutex::new(History::new()),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score `text` and record the result.
    ///
    /// Empty or whitespace-only text returns [`MetricResult::empty`] and leaves the
    /// history untouched. `processing_time_ms` is left at zero for the caller to fill.
    pub fn score(&self, text: &str, metadata: Option<Metadata>) -> MetricResult {
        if text.trim().is_empty() {
            debug!("empty input, returning sentinel result");
            return MetricResult::empty();
        }

        let tokens = preprocess(text);
        let primary = PrimaryMetrics::compute(&tokens, self.config.sensitivity);
        let coherence_variance =
            metrics::coherence_variance(&tokens, self.config.sensitivity, self.config.threshold);
        let coherence = correction::corrected_coherence(&primary, self.config.threshold);
        let risk = assess::risk_level(coherence, primary.stability, primary.entropy);

        let mut history = self.history.lock();
        let recent = (history.len() > assess::CONSISTENCY_MIN_HISTORY)
            .then(|| history.recent_coherences(assess::CONSISTENCY_WINDOW));
        let confidence = assess::confidence(
            coherence,
            primary.stability,
            primary.entropy,
            recent.as_deref(),
        );

        let result = MetricResult {
            coherence,
            stability: primary.stability,
            entropy: primary.entropy,
            resonance: primary.resonance,
            complexity: primary.complexity,
            coherence_variance,
            token_count: tokens.len(),
            confidence_score: confidence,
            risk_assessment: risk,
            timestamp: Utc::now(),
            processing_time_ms: 0.0,
            metadata: metadata.unwrap_or_default(),
        };
        history.push(result.clone());

        debug!(
            tokens = result.token_count,
            coherence = result.coherence,
            risk = %result.risk_assessment,
            history = history.len(),
            "scored text"
        );
        result
    }

    /// Trend over the newest `window_size` results.
    pub fn trend(&self, window_size: usize) -> TrendReport {
        self.history.lock().trend(window_size)
    }

    /// Trend over the configured default window.
    pub fn default_trend(&self) -> TrendReport {
        self.trend(self.config.trend_window)
    }

    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }

    /// Copy of the stored results, oldest first.
    ///
    /// Stored results keep `processing_time_ms` at zero; only the copy returned
    /// from [`KappaEngine::score`] is timed by the caller.
    pub fn history_snapshot(&self) -> Vec<MetricResult> {
        self.history.lock().iter().cloned().collect()
    }
}
