//! Bounded FIFO of past results and linear trend analysis over it.

use crate::stats;
use kappa_core::{MetricResult, TrendDirection, TrendReport};
use std::collections::VecDeque;

/// Maximum number of results retained.
pub const HISTORY_CAPACITY: usize = 1000;

/// Slope magnitude beyond which a trend counts as improving or declining.
pub const TREND_SLOPE_EPSILON: f64 = 0.01;

/// Chronological store of scoring results. Oldest entries are evicted first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<MetricResult>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
            capacity: HISTORY_CAPACITY,
        }
    }

    pub fn push(&mut self, result: MetricResult) {
        self.entries.push_back(result);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            tracing::trace!("history full, evicted oldest result");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &MetricResult> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&MetricResult> {
        self.entries.back()
    }

    /// Coherence of the newest `n` entries, oldest first.
    pub fn recent_coherences(&self, n: usize) -> Vec<f64> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).map(|r| r.coherence).collect()
    }

    /// Fit a line through the newest `window_size` coherences.
    pub fn trend(&self, window_size: usize) -> TrendReport {
        if window_size == 0 || self.entries.len() < window_size {
            return TrendReport::insufficient();
        }
        let coherences = self.recent_coherences(window_size);
        let (direction, slope) = match stats::linear_slope(&coherences) {
            Some(slope) if slope > TREND_SLOPE_EPSILON => (TrendDirection::Improving, slope),
            Some(slope) if slope < -TREND_SLOPE_EPSILON => (TrendDirection::Declining, slope),
            Some(slope) => (TrendDirection::Stable, slope),
            None => (TrendDirection::Unknown, 0.0),
        };
        TrendReport::Analyzed {
            direction,
            slope,
            average_coherence: stats::mean(&coherences),
            coherence_std: stats::std_dev(&coherences),
            sample_size: coherences.len(),
        }
    }
}
