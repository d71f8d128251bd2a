use std::fmt;

use serde::{Deserialize, Serialize};

/// The six dimensions an assessor rates a job on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoringFactor {
    SkillMatch,
    ExperienceLevel,
    LocationMatch,
    SalaryFit,
    CompanySignals,
    Recency,
}

impl ScoringFactor {
    pub const ALL: [ScoringFactor; 6] = [
        ScoringFactor::SkillMatch,
        ScoringFactor::ExperienceLevel,
        ScoringFactor::LocationMatch,
        ScoringFactor::SalaryFit,
        ScoringFactor::CompanySignals,
        ScoringFactor::Recency,
    ];

    /// Wire name, identical to the JSON field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringFactor::SkillMatch => "skillMatch",
            ScoringFactor::ExperienceLevel => "experienceLevel",
            ScoringFactor::LocationMatch => "locationMatch",
            ScoringFactor::SalaryFit => "salaryFit",
            ScoringFactor::CompanySignals => "companySignals",
            ScoringFactor::Recency => "recency",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoringFactor::SkillMatch => "How well your skills match the job requirements",
            ScoringFactor::ExperienceLevel => "Years of experience alignment",
            ScoringFactor::LocationMatch => "Remote/location preference fit",
            ScoringFactor::SalaryFit => "Salary within your target range",
            ScoringFactor::CompanySignals => "Company reputation and culture signals",
            ScoringFactor::Recency => "How recently the job was posted",
        }
    }
}

impl fmt::Display for ScoringFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-factor sub-scores, each expected in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorScores {
    pub skill_match: f64,
    pub experience_level: f64,
    pub location_match: f64,
    pub salary_fit: f64,
    pub company_signals: f64,
    pub recency: f64,
}

impl FactorScores {
    /// Every factor set to the same value.
    #[cfg(test)]
    pub fn uniform(value: f64) -> Self {
        Self {
            skill_match: value,
            experience_level: value,
            location_match: value,
            salary_fit: value,
            company_signals: value,
            recency: value,
        }
    }

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

    /// Returns a copy with one factor replaced.
    pub fn with(mut self, factor: ScoringFactor, value: f64) -> Self {
        let slot = match factor {
            ScoringFactor::SkillMatch => &mut self.skill_match,
            ScoringFactor::ExperienceLevel => &mut self.experience_level,
            ScoringFactor::LocationMatch => &mut self.location_match,
            ScoringFactor::SalaryFit => &mut self.salary_fit,
            ScoringFactor::CompanySignals => &mut self.company_signals,
            ScoringFactor::Recency => &mut self.recency,
        };
        *slot = value;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoringFactor, f64)> + '_ {
        ScoringFactor::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for factor in ScoringFactor::ALL {
            let json = serde_json::to_value(factor).unwrap();
            assert_eq!(json, factor.as_str());
        }
    }

    #[test]
    fn test_with_replaces_single_factor() {
        let scores = FactorScores::uniform(0.2).with(ScoringFactor::SalaryFit, 0.9);
        assert_eq!(scores.salary_fit, 0.9);
        assert_eq!(scores.skill_match, 0.2);
        assert_eq!(scores.recency, 0.2);
    }

    #[test]
    fn test_iter_visits_all_factors_in_order() {
        let factors: Vec<_> = FactorScores::default().iter().map(|(f, _)| f).collect();
        assert_eq!(factors, ScoringFactor::ALL.to_vec());
    }

    #[test]
    fn test_scores_serialize_camel_case() {
        let json = serde_json::to_value(FactorScores::uniform(1.0)).unwrap();
        assert_eq!(json["skillMatch"], 1.0);
        assert_eq!(json["companySignals"], 1.0);
    }
}
