//! Braid-map: particle and environment configuration for the visualizer.
//!
//! Every field is a fixed linear function of a [`MetricResult`]; the renderer
//! that consumes it lives outside this crate.

use chrono::{DateTime, Utc};
use kappa_core::MetricResult;
use serde::{Deserialize, Serialize};

pub const BRAID_MAP_VERSION: &str = "2.0";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BraidMap {
    pub particles: Particles,
    pub environment: Environment,
    pub metrics: MetricResult,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Particles {
    pub stabilizer: Stabilizer,
    pub orb: Orb,
    pub wings: Wings,
    pub refiner: Refiner,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stabilizer {
    pub count: usize,
    pub base_x: f64,
    pub oscillation: f64,
    pub color: String,
    pub behavior: String,
    pub frequency: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Orb {
    pub count: usize,
    pub radius: f64,
    pub rotation_speed: f64,
    pub color: String,
    pub behavior: String,
    pub coherence_influence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wings {
    pub count: usize,
    pub flutter_intensity: f64,
    pub spread: f64,
    pub color: String,
    pub behavior: String,
    pub complexity_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Refiner {
    pub count: usize,
    pub flow_rate: f64,
    pub chaos_factor: f64,
    pub color: String,
    pub behavior: String,
    pub direction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Environment {
    pub background_intensity: f64,
    pub glow_radius: f64,
    pub field_strength: f64,
    pub chaos_indicators: usize,
    pub resonance_lines: usize,
}

impl BraidMap {
    pub fn from_result(result: &MetricResult) -> Self {
        let coherence = result.coherence;
        let stability = result.stability;
        let entropy = result.entropy;
        let complexity = result.complexity;

        let particles = Particles {
            stabilizer: Stabilizer {
                count: 20,
                base_x: 0.5,
                oscillation: 0.05 * (1.0 - stability),
                color: "#3b82f6".into(),
                behavior: "oscillate".into(),
                frequency: 0.5 + stability * 1.5,
            },
            orb: Orb {
                count: (50.0 * (0.5 + coherence * 0.5)) as usize,
                radius: 0.1 + (1.0 - coherence) * 0.15,
                rotation_speed: coherence * 2.0,
                color: "#10b981".into(),
                behavior: "orbit".into(),
                coherence_influence: coherence,
            },
            wings: Wings {
                count: 80,
                flutter_intensity: (1.0 - stability) * 3.0,
                spread: 0.3 + entropy * 0.2,
                color: "#8b5cf6".into(),
                behavior: "flutter".into(),
                complexity_factor: complexity,
            },
            refiner: Refiner {
                count: (40.0 * (0.3 + complexity * 0.7)) as usize,
                flow_rate: 1.0 + (1.0 - coherence) * 2.0,
                chaos_factor: entropy,
                color: "#f59e0b".into(),
                behavior: "flow".into(),
                direction: "diagonal_down".into(),
            },
        };

        let environment = Environment {
            background_intensity: coherence * 0.8,
            glow_radius: 50.0 + coherence * 30.0,
            field_strength: stability * 100.0,
            chaos_indicators: if entropy > 0.5 {
                (entropy * 20.0) as usize
            } else {
                0
            },
            resonance_lines: (result.resonance * 10.0) as usize,
        };

        Self {
            particles,
            environment,
            metrics: result.clone(),
            timestamp: Utc::now(),
            version: BRAID_MAP_VERSION.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_result_map() {
        let map = BraidMap::from_result(&MetricResult::empty());
        assert_eq!(map.particles.orb.count, 25);
        assert_eq!(map.particles.refiner.count, 12);
        assert_eq!(map.particles.stabilizer.count, 20);
        assert_eq!(map.particles.wings.count, 80);
        assert_eq!(map.environment.chaos_indicators, 20);
        assert_eq!(map.environment.resonance_lines, 0);
        assert_eq!(map.environment.field_strength, 0.0);
        assert_eq!(map.version, "2.0");
    }

    #[test]
    fn low_entropy_hides_chaos() {
        let result = MetricResult {
            coherence: 1.0,
            stability: 1.0,
            entropy: 0.5,
            resonance: 0.75,
            ..MetricResult::empty()
        };
        let map = BraidMap::from_result(&result);
        assert_eq!(map.environment.chaos_indicators, 0);
        assert_eq!(map.environment.resonance_lines, 7);
        assert_eq!(map.particles.orb.count, 50);
        assert_eq!(map.environment.glow_radius, 80.0);
        assert_eq!(map.particles.wings.flutter_intensity, 0.0);
    }

    #[test]
    fn particle_keys_on_the_wire() {
        let json = serde_json::to_value(BraidMap::from_result(&MetricResult::empty())).unwrap();
        for key in ["stabilizer", "orb", "wings", "refiner"] {
            assert!(json["particles"].get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["particles"]["refiner"]["direction"], "diagonal_down");
        assert_eq!(json["metrics"]["risk_assessment"], "high");
    }
}
