//! Scoring engine: pure conversion of verified factor scores into a total
//! and a tier. Performs no I/O and holds no shared state.

use crate::assessment::Assessment;
use crate::scoring::breakdown::{ScoringBreakdown, Verification};
use crate::scoring::factors::FactorScores;
use crate::scoring::tier::compute_tier;
use crate::scoring::weights::{ScoringWeights, WeightsError, DEFAULT_WEIGHTS};

/// Weighted sum of the six factors. No clamping, no rounding: out-of-range
/// inputs or weights propagate straight into the result.
pub fn compute_total_score(factors: &FactorScores, weights: &ScoringWeights) -> f64 {
    factors.skill_match * weights.skill_match
        + factors.experience_level * weights.experience_level
        + factors.location_match * weights.location_match
        + factors.salary_fit * weights.salary_fit
        + factors.company_signals * weights.company_signals
        + factors.recency * weights.recency
}

/// Holds a weight table that passed validation.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
        }
    }
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights) -> Result<Self, WeightsError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn total(&self, factors: &FactorScores) -> f64 {
        compute_total_score(factors, &self.weights)
    }

    pub fn score(&self, assessment: Assessment) -> ScoringBreakdown {
        let total = self.total(&assessment.factors);
        ScoringBreakdown {
            factors: assessment.factors,
            total,
            tier: compute_tier(total),
            matched_skills: assessment.matched_skills,
            missing_skills: assessment.missing_skills,
            explanation: assessment.explanation,
        }
    }

    /// Re-derives total and tier from the stored factors. Consistent only on
    /// a bit-exact match.
    pub fn verify(&self, breakdown: &ScoringBreakdown) -> Verification {
        let expected_total = self.total(&breakdown.factors);
        let expected_tier = compute_tier(expected_total);
        Verification {
            consistent: expected_total.to_bits() == breakdown.total.to_bits()
                && expected_tier == breakdown.tier,
            expected_total,
            expected_tier,
            stored_total: breakdown.total,
            stored_tier: breakdown.tier,
        }
    }
}
