use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::factors::ScoringFactor;

/// Maximum distance from 1.0 a validated weight table may sum to.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    skill_match: 0.35,
    experience_level: 0.20,
    location_match: 0.15,
    salary_fit: 0.15,
    company_signals: 0.10,
    recency: 0.05,
};

/// Weight per scoring factor. Callers must keep the table normalized;
/// `validate` is the check applied once at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScoringWeights {
    pub skill_match: f64,
    pub experience_level: f64,
    pub location_match: f64,
    pub salary_fit: f64,
    pub company_signals: f64,
    pub recency: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    #[error("weight for '{factor}' is not a finite number ({weight})")]
    NonFinite { factor: ScoringFactor, weight: f64 },

    #[error("weight for '{factor}' is negative ({weight})")]
    Negative { factor: ScoringFactor, weight: f64 },

    #[error("weights sum to {sum}, expected 1.0")]
    NotNormalized { sum: f64 },
}

impl ScoringWeights {
    pub fn get(&self, factor: ScoringFactor) -> f64 {
        match factor {
            ScoringFactor::SkillMatch => self.skill_match,
            ScoringFactor::ExperienceLevel => self.experience_level,
            ScoringFactor::LocationMatch => self.location_match,
            ScoringFactor::SalaryFit => self.salary_fit,
            ScoringFactor::CompanySignals => self.company_signals,
            ScoringFactor::Recency => self.recency,
        }
    }

    pub fn sum(&self) -> f64 {
        ScoringFactor::ALL.iter().map(|f| self.get(*f)).sum()
    }

    /// Rejects non-finite or negative weights and tables that do not sum to 1.0.
    pub fn validate(&self) -> Result<(), WeightsError> {
        for factor in ScoringFactor::ALL {
            let weight = self.get(factor);
            if !weight.is_finite() {
                return Err(WeightsError::NonFinite { factor, weight });
            }
            if weight < 0.0 {
                return Err(WeightsError::Negative { factor, weight });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightsError::NotNormalized { sum });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill_only() -> ScoringWeights {
        ScoringWeights {
            skill_match: 1.0,
            experience_level: 0.0,
            location_match: 0.0,
            salary_fit: 0.0,
            company_signals: 0.0,
            recency: 0.0,
        }
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((DEFAULT_WEIGHTS.sum() - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
        assert!(DEFAULT_WEIGHTS.validate().is_ok());
    }

    #[test]
    fn test_zero_weights_allowed_when_normalized() {
        assert!(skill_only().validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ScoringWeights {
            recency: -0.05,
            skill_match: 0.45,
            ..DEFAULT_WEIGHTS
        };
        assert_eq!(
            weights.validate(),
            Err(WeightsError::Negative {
                factor: ScoringFactor::Recency,
                weight: -0.05
            })
        );
    }

    #[test]
    fn test_over_weighted_table_rejected() {
        let weights = ScoringWeights {
            skill_match: 0.9,
            ..DEFAULT_WEIGHTS
        };
        assert!(matches!(
            weights.validate(),
            Err(WeightsError::NotNormalized { .. })
        ));
    }

    #[test]
    fn test_nan_weight_rejected() {
        let weights = ScoringWeights {
            salary_fit: f64::NAN,
            ..DEFAULT_WEIGHTS
        };
        assert!(matches!(
            weights.validate(),
            Err(WeightsError::NonFinite {
                factor: ScoringFactor::SalaryFit,
                ..
            })
        ));
    }

    #[test]
    fn test_deserialize_rejects_unknown_and_missing_keys() {
        let typo = r#"{"skillMatch":1,"experienceLevel":0,"locationMatch":0,"salaryFit":0,"companySignals":0,"recencyy":0}"#;
        assert!(serde_json::from_str::<ScoringWeights>(typo).is_err());

        let missing = r#"{"skillMatch":1}"#;
        assert!(serde_json::from_str::<ScoringWeights>(missing).is_err());
    }
}
