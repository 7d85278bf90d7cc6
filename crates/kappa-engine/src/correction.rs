//! Threshold correction that turns the four primary metrics into one coherence score.

use crate::metrics::PrimaryMetrics;

/// Exponent and boost factor of the correction.
pub const GOLDEN_RATIO: f64 = 0.618033988749;

/// Weighted blend before correction:
/// `0.35(1 - entropy) + 0.35 stability + 0.20 resonance + 0.10(1 - complexity)`.
pub fn base_coherence(m: &PrimaryMetrics) -> f64 {
    0.35 * (1.0 - m.entropy) + 0.35 * m.stability + 0.20 * m.resonance + 0.10 * (1.0 - m.complexity)
}

/// Multiplier applied to the base score.
///
/// At or above `threshold` the score is boosted linearly; below it the score is
/// scaled by `(base / threshold)^φ`.
pub fn correction_factor(base: f64, threshold: f64) -> f64 {
    if base >= threshold {
        1.0 + (base - threshold) * GOLDEN_RATIO
    } else {
        (base / threshold).powf(GOLDEN_RATIO)
    }
}

/// Corrected coherence, clamped to [0, 1].
pub fn corrected_coherence(m: &PrimaryMetrics, threshold: f64) -> f64 {
    let base = base_coherence(m);
    (base * correction_factor(base, threshold)).clamp(0.0, 1.0)
}
