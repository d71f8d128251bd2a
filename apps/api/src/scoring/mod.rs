// Job scoring: six assessor factors, a weight table, a weighted total, a tier.
// Shared by the scoring runs, the job feed and the metrics endpoints.

pub mod breakdown;
pub mod engine;
pub mod factors;
pub mod handlers;
pub mod tier;
pub mod weights;

pub use breakdown::{ScoringBreakdown, Verification};
pub use engine::ScoringEngine;
pub use factors::{FactorScores, ScoringFactor};
pub use tier::Tier;
pub use weights::ScoringWeights;
