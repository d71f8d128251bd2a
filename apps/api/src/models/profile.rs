use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::{JobPosting, JobSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScheduleInterval {
    #[default]
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "1h")]
    Hourly,
    #[serde(rename = "3h")]
    EveryThreeHours,
    #[serde(rename = "6h")]
    EverySixHours,
    #[serde(rename = "12h")]
    TwiceDaily,
    #[serde(rename = "24h")]
    Daily,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
}

/// Parsed résumé, produced by the résumé parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<WorkExperience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub sources: Vec<JobSource>,
    pub search_terms: Vec<String>,
    pub locations: Vec<String>,
    pub remote_only: bool,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub exclude_keywords: Vec<String>,
    pub exclude_senior: bool,
    pub exclude_international: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sources: vec![JobSource::Indeed, JobSource::Linkedin, JobSource::Glassdoor],
            search_terms: vec![],
            locations: vec![],
            remote_only: false,
            salary_min: None,
            salary_max: None,
            exclude_keywords: vec![],
            exclude_senior: false,
            exclude_international: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub resume_data: Option<ResumeData>,
    #[serde(default)]
    pub search_config: SearchConfig,
    #[serde(default)]
    pub schedule_interval: ScheduleInterval,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Post-scrape search filter
// ────────────────────────────────────────────────────────────────────────────

const SENIOR_KEYWORDS: &[&str] = &[
    "senior",
    "lead",
    "principal",
    "staff",
    "director",
    "vp",
    "head of",
];

const US_INDICATORS: &[&str] = &["usa", "united states", "remote"];

const US_STATE_CODES: &[&str] = &["ca", "ny", "tx", "wa", "fl", "il", "ma", "pa", "ga", "nc"];

/// Why a posting was dropped before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    Keyword(String),
    Seniority,
    International,
    SalaryBelowMinimum,
    SalaryAboveMaximum,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Keyword(kw) => write!(f, "matches excluded keyword '{kw}'"),
            Exclusion::Seniority => f.write_str("senior role"),
            Exclusion::International => f.write_str("outside the United States"),
            Exclusion::SalaryBelowMinimum => f.write_str("pays below the minimum salary"),
            Exclusion::SalaryAboveMaximum => f.write_str("pays above the maximum salary"),
        }
    }
}

impl SearchConfig {
    /// Applies the profile's exclusion rules to a scraped posting.
    pub fn check(&self, posting: &JobPosting) -> Result<(), Exclusion> {
        let title = posting.title.to_lowercase();
        let description = posting
            .description
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        if let Some(keyword) = self.exclude_keywords.iter().find(|kw| {
            let kw = kw.trim().to_lowercase();
            !kw.is_empty() && (title.contains(&kw) || description.contains(&kw))
        }) {
            return Err(Exclusion::Keyword(keyword.clone()));
        }

        if self.exclude_senior && SENIOR_KEYWORDS.iter().any(|kw| title.contains(kw)) {
            return Err(Exclusion::Seniority);
        }

        if self.exclude_international {
            let location = posting
                .location
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();
            if !location.is_empty() && !looks_domestic(&location) {
                return Err(Exclusion::International);
            }
        }

        if let (Some(wanted_min), Some(offered_max)) = (self.salary_min, posting.salary_max) {
            if offered_max < wanted_min {
                return Err(Exclusion::SalaryBelowMinimum);
            }
        }
        if let (Some(wanted_max), Some(offered_min)) = (self.salary_max, posting.salary_min) {
            if offered_min > wanted_max {
                return Err(Exclusion::SalaryAboveMaximum);
            }
        }

        Ok(())
    }
}

fn looks_domestic(location: &str) -> bool {
    if US_INDICATORS.iter().any(|ind| location.contains(ind)) {
        return true;
    }
    location
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| US_STATE_CODES.contains(&token))
}
