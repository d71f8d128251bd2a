use serde::{Deserialize, Serialize};

use crate::scoring::factors::FactorScores;
use crate::scoring::tier::Tier;

/// Full record of one job-to-profile match. Built once by the engine and
/// never patched; a re-score yields a new breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringBreakdown {
    #[serde(flatten)]
    pub factors: FactorScores,
    pub total: f64,
    pub tier: Tier,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}

/// Result of re-deriving a stored breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub consistent: bool,
    pub expected_total: f64,
    pub expected_tier: Tier,
    pub stored_total: f64,
    pub stored_tier: Tier,
}
