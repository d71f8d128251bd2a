use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::{ScoringBreakdown, ScoringEngine, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    New,
    Applied,
    Saved,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSource {
    Indeed,
    Linkedin,
    Glassdoor,
    Ziprecruiter,
    Google,
    #[default]
    #[serde(other)]
    Other,
}

/// A posting as delivered by the scraper, before scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(default)]
    pub external_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary_min: Option<i64>,
    #[serde(default)]
    pub salary_max: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source: JobSource,
}

/// A stored job. `score`, `tier` and `scoring_breakdown` are set together or
/// not at all; when absent, `scoring_error` says why.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_id: Option<Uuid>,
    pub external_id: Option<String>,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub source: JobSource,
    pub score: Option<f64>,
    pub tier: Option<Tier>,
    pub matched_skills: Vec<String>,
    pub scoring_breakdown: Option<ScoringBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_error: Option<String>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

impl Job {
    fn from_posting(user_id: Uuid, profile_id: Option<Uuid>, posting: JobPosting) -> Self {
        Job {
            id: Uuid::new_v4(),
            user_id,
            profile_id,
            external_id: posting.external_id,
            title: posting.title,
            company: posting.company,
            location: posting.location,
            salary_min: posting.salary_min,
            salary_max: posting.salary_max,
            description: posting.description,
            url: posting.url,
            source: posting.source,
            score: None,
            tier: None,
            matched_skills: vec![],
            scoring_breakdown: None,
            scoring_error: None,
            status: JobStatus::New,
            created_at: Utc::now(),
        }
    }

    pub fn scored(
        user_id: Uuid,
        profile_id: Option<Uuid>,
        posting: JobPosting,
        breakdown: ScoringBreakdown,
    ) -> Self {
        Job {
            score: Some(breakdown.total),
            tier: Some(breakdown.tier),
            matched_skills: breakdown.matched_skills.clone(),
            scoring_breakdown: Some(breakdown),
            ..Job::from_posting(user_id, profile_id, posting)
        }
    }

    pub fn unscored(
        user_id: Uuid,
        profile_id: Option<Uuid>,
        posting: JobPosting,
        reason: String,
    ) -> Self {
        Job {
            scoring_error: Some(reason),
            ..Job::from_posting(user_id, profile_id, posting)
        }
    }

    /// True when the stored score/tier are exactly what the engine derives
    /// from the stored breakdown. An unscored job is trivially consistent.
    pub fn is_score_consistent(&self, engine: &ScoringEngine) -> bool {
        match (&self.scoring_breakdown, self.score, self.tier) {
            (Some(breakdown), Some(score), Some(tier)) => {
                let verification = engine.verify(breakdown);
                verification.consistent
                    && score.to_bits() == verification.expected_total.to_bits()
                    && tier == verification.expected_tier
            }
            (None, None, None) => true,
            _ => false,
        }
    }
}
