//! Assessment boundary: turns assessor output (structured JSON or raw LLM
//! text) into verified factor scores before they reach the scoring engine.
//!
//! Nothing here clamps or substitutes defaults. A malformed assessment is an
//! `AssessmentError`; the caller decides how to surface "scoring unavailable".

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::scoring::{FactorScores, ScoringFactor};

/// Assessor output that passed validation: every factor present, finite and
/// within [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub factors: FactorScores,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub explanation: String,
}

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("assessor output is empty")]
    Empty,

    #[error("assessor output is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("assessor output must be a JSON object or a JSON string")]
    UnexpectedShape,

    #[error("factor '{0}' is missing")]
    MissingFactor(ScoringFactor),

    #[error("factor '{0}' is not a number")]
    NonNumeric(ScoringFactor),

    #[error("factor '{0}' is not a finite number")]
    NonFinite(ScoringFactor),

    #[error("factor '{factor}' is {value}, outside [0, 1]")]
    OutOfRange { factor: ScoringFactor, value: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAssessment {
    #[serde(default, alias = "skill_match")]
    skill_match: Option<Value>,
    #[serde(default, alias = "experience_level")]
    experience_level: Option<Value>,
    #[serde(default, alias = "location_match")]
    location_match: Option<Value>,
    #[serde(default, alias = "salary_fit")]
    salary_fit: Option<Value>,
    #[serde(default, alias = "company_signals")]
    company_signals: Option<Value>,
    #[serde(default)]
    recency: Option<Value>,
    #[serde(default, alias = "matched_skills")]
    matched_skills: Vec<String>,
    #[serde(default, alias = "missing_skills")]
    missing_skills: Vec<String>,
    #[serde(default)]
    explanation: String,
}

impl RawAssessment {
    fn field(&self, factor: ScoringFactor) -> Option<&Value> {
        let slot = match factor {
            ScoringFactor::SkillMatch => &self.skill_match,
            ScoringFactor::ExperienceLevel => &self.experience_level,
            ScoringFactor::LocationMatch => &self.location_match,
            ScoringFactor::SalaryFit => &self.salary_fit,
            ScoringFactor::CompanySignals => &self.company_signals,
            ScoringFactor::Recency => &self.recency,
        };
        slot.as_ref().filter(|v| !v.is_null())
    }

    fn into_assessment(self) -> Result<Assessment, AssessmentError> {
        let mut factors = FactorScores::default();
        for factor in ScoringFactor::ALL {
            let value = self
                .field(factor)
                .ok_or(AssessmentError::MissingFactor(factor))
                .map(factor_number)?
                .ok_or(AssessmentError::NonNumeric(factor))?;
            factors = factors.with(factor, value);
        }
        validate_factors(&factors)?;

        Ok(Assessment {
            factors,
            matched_skills: self.matched_skills,
            missing_skills: self.missing_skills,
            explanation: self.explanation,
        })
    }
}

/// A JSON number, or a string holding one (LLMs often quote numbers).
/// The parsed value still goes through `validate_factors`.
fn factor_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Checks every factor is finite and within [0, 1].
pub fn validate_factors(factors: &FactorScores) -> Result<(), AssessmentError> {
    for (factor, value) in factors.iter() {
        if !value.is_finite() {
            return Err(AssessmentError::NonFinite(factor));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(AssessmentError::OutOfRange { factor, value });
        }
    }
    Ok(())
}

/// Removes a surrounding markdown code fence, with or without a `json` tag.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = rest.split("```").next().unwrap_or(rest);
    inner.strip_prefix("json").unwrap_or(inner).trim()
}

/// Parses raw assessor text, e.g. an LLM reply.
pub fn parse_assessor_text(text: &str) -> Result<Assessment, AssessmentError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(AssessmentError::Empty);
    }
    let raw: RawAssessment = serde_json::from_str(body)?;
    raw.into_assessment()
}

/// Accepts either a structured object or a string holding raw assessor text.
pub fn parse_assessor_value(value: Value) -> Result<Assessment, AssessmentError> {
    match value {
        Value::String(text) => parse_assessor_text(&text),
        Value::Object(map) => {
            let raw: RawAssessment = serde_json::from_value(Value::Object(map))?;
            raw.into_assessment()
        }
        Value::Null => Err(AssessmentError::Empty),
        _ => Err(AssessmentError::UnexpectedShape),
    }
}
