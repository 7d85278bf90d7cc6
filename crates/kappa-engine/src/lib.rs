//! Kappa Engine - deterministic coherence scoring over token sequences
//!
//! Pipeline: [`preprocess`] → [`metrics`] → [`correction`] → [`assess`],
//! orchestrated by [`KappaEngine`], which also owns the bounded [`History`].

pub mod assess;
pub mod braid;
pub mod correction;
pub mod engine;
pub mod history;
pub mod metrics;
pub mod preprocess;
pub mod stats;

pub use braid::BraidMap;
pub use correction::GOLDEN_RATIO;
pub use engine::KappaEngine;
pub use history::{History, HISTORY_CAPACITY};
pub use preprocess::preprocess;
