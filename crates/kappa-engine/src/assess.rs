//! Confidence and risk assessment.

use crate::stats;
use kappa_core::RiskLevel;

/// Prior results needed before history consistency feeds into confidence.
pub const CONSISTENCY_MIN_HISTORY: usize = 5;

/// How many recent coherences the consistency term looks at.
pub const CONSISTENCY_WINDOW: usize = 5;

/// Confidence in a measurement.
///
/// `recent` holds the coherence of the latest prior results; it only counts once
/// more than [`CONSISTENCY_MIN_HISTORY`] results exist, which the caller decides by
/// passing `None` otherwise.
pub fn confidence(coherence: f64, stability: f64, entropy: f64, recent: Option<&[f64]>) -> f64 {
    let mut value = (coherence + stability + (1.0 - entropy)) / 3.0;
    if let Some(recent) = recent {
        let consistency = 1.0 - stats::std_dev(recent);
        value = (value + consistency) / 2.0;
    }
    value.clamp(0.0, 1.0)
}

pub fn risk_score(coherence: f64, stability: f64, entropy: f64) -> f64 {
    (1.0 - coherence) * 0.4 + (1.0 - stability) * 0.4 + entropy * 0.2
}

pub fn risk_level(coherence: f64, stability: f64, entropy: f64) -> RiskLevel {
    let score = risk_score(coherence, stability, entropy);
    if score < 0.3 {
        RiskLevel::Low
    } else if score < 0.6 {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}
