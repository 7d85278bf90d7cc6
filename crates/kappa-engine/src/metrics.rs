//! The five metric calculators. All are pure functions over a token sequence.
//!
//! Frequency tables are kept in first-occurrence order so floating-point sums
//! accumulate in the same order on every run.

use crate::correction;
use crate::stats;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Segment-size ratio used by the resonance metric.
pub const RESONANCE_RATIO: f64 = 0.618033988749;

/// Complexity assumed for per-segment coherence inside [`coherence_variance`].
pub const SEGMENT_COMPLEXITY: f64 = 0.5;

/// The four metrics the corrector combines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimaryMetrics {
    pub entropy: f64,
    pub stability: f64,
    pub resonance: f64,
    pub complexity: f64,
}

impl PrimaryMetrics {
    pub fn compute(tokens: &[String], sensitivity: f64) -> Self {
        Self {
            entropy: entropy(tokens),
            stability: stability(tokens, sensitivity),
            resonance: resonance(tokens),
            complexity: complexity(tokens),
        }
    }
}

/// Occurrence counts in first-seen order.
fn ordered_counts<T: Hash + Eq>(items: impl IntoIterator<Item = T>) -> Vec<usize> {
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<usize> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&slot) => counts[slot] += 1,
            None => {
                index.insert(item, counts.len());
                counts.push(1);
            }
        }
    }
    counts
}

/// Shannon entropy of the token distribution normalized by `log2(distinct)`.
///
/// `1.0` for an empty sequence, `0.0` when there is at most one distinct token.
pub fn entropy(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 1.0;
    }
    let counts = ordered_counts(tokens.iter().map(String::as_str));
    let total = tokens.len() as f64;
    let mut raw = 0.0;
    for &count in &counts {
        let p = count as f64 / total;
        raw -= p * p.log2();
    }
    let max_entropy = (counts.len() as f64).log2();
    if max_entropy > 0.0 {
        (raw / max_entropy).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Inverse of the variance of adjacent-bigram counts, scaled by `sensitivity`.
pub fn stability(tokens: &[String], sensitivity: f64) -> f64 {
    if tokens.len() < 2 {
        return 1.0;
    }
    let counts: Vec<f64> = ordered_counts(
        tokens
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str())),
    )
    .into_iter()
    .map(|c| c as f64)
    .collect();
    let variance = stats::variance(&counts);
    (1.0 / (1.0 + variance * sensitivity)).clamp(0.0, 1.0)
}

/// Mean Jaccard similarity between every pair of golden-ratio sized segments.
pub fn resonance(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let segment_size = ((tokens.len() as f64 * RESONANCE_RATIO) as usize).max(1);
    let segments: Vec<HashSet<&str>> = tokens
        .chunks(segment_size)
        .map(|chunk| chunk.iter().map(String::as_str).collect())
        .collect();

    let mut sum = 0.0;
    let mut comparisons = 0usize;
    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            sum += jaccard(a, b);
            comparisons += 1;
        }
    }
    if comparisons > 0 {
        sum / comparisons as f64
    } else {
        0.0
    }
}

fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// Weighted blend of vocabulary richness, mean token length and positional spread.
pub fn complexity(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let total = tokens.len() as f64;
    let distinct = tokens.iter().map(String::as_str).collect::<HashSet<_>>().len() as f64;
    let vocabulary_richness = distinct / total;

    let avg_token_length =
        tokens.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / total;

    let positional_spread = if tokens.len() > 1 {
        let positions: Vec<f64> = (0..tokens.len()).map(|i| i as f64).collect();
        stats::variance(&positions) / (total * total)
    } else {
        0.0
    };

    let complexity = 0.4 * vocabulary_richness
        + 0.3 * (avg_token_length / 10.0).min(1.0)
        + 0.3 * positional_spread;
    complexity.clamp(0.0, 1.0)
}

/// Variance of corrected coherence across roughly four contiguous segments.
///
/// `0.0` for fewer than four tokens. Segments shorter than two tokens are skipped.
pub fn coherence_variance(tokens: &[String], sensitivity: f64, threshold: f64) -> f64 {
    if tokens.len() < 4 {
        return 0.0;
    }
    let segment_size = (tokens.len() / 4).max(2);
    let coherences: Vec<f64> = tokens
        .chunks(segment_size)
        .filter(|segment| segment.len() >= 2)
        .map(|segment| {
            let metrics = PrimaryMetrics {
                entropy: entropy(segment),
                stability: stability(segment, sensitivity),
                resonance: resonance(segment),
                complexity: SEGMENT_COMPLEXITY,
            };
            correction::corrected_coherence(&metrics, threshold)
        })
        .collect();
    stats::variance(&coherences)
}
