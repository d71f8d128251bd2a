use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::AppError;
use crate::models::job::{Job, JobSource, JobStatus};
use crate::scoring::Tier;

const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Score,
    CreatedAt,
    SalaryMax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query-string parameters of `GET /api/v1/jobs`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobsQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub status: Option<JobStatus>,
    pub source: Option<JobSource>,
    #[serde(default, deserialize_with = "deserialize_tier")]
    pub tier: Option<Tier>,
    pub min_score: Option<f64>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
    pub search: Option<String>,
}

/// Tier letters in either case, as on `/scoring/tiers/:tier`. Empty means no filter.
fn deserialize_tier<'de, D>(deserializer: D) -> Result<Option<Tier>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Tier>().map_err(serde::de::Error::custom))
        .transpose()
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

impl Default for JobsQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            status: None,
            source: None,
            tier: None,
            min_score: None,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            search: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    pub data: Vec<Job>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: usize,
}

impl JobsQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page < 1 {
            return Err(AppError::Validation("page must be at least 1".to_string()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(AppError::Validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if self.min_score.is_some_and(|s| !s.is_finite()) {
            return Err(AppError::Validation(
                "min_score must be a finite number".to_string(),
            ));
        }
        Ok(())
    }

    fn matches(&self, job: &Job) -> bool {
        if self.status.is_some_and(|s| job.status != s) {
            return false;
        }
        if self.source.is_some_and(|s| job.source != s) {
            return false;
        }
        if self.tier.is_some() && job.tier != self.tier {
            return false;
        }
        if let Some(min) = self.min_score {
            // Unscored jobs never pass a score floor.
            if !job.score.is_some_and(|score| score >= min) {
                return false;
            }
        }
        if let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            let in_title = job.title.to_lowercase().contains(&needle);
            let in_company = job
                .company
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle));
            if !in_title && !in_company {
                return false;
            }
        }
        true
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        match self.sort_by {
            SortBy::Score => present_first(a.score, b.score, self.sort_order, f64::total_cmp),
            SortBy::CreatedAt => present_first(
                Some(a.created_at),
                Some(b.created_at),
                self.sort_order,
                Ord::cmp,
            ),
            SortBy::SalaryMax => {
                present_first(a.salary_max, b.salary_max, self.sort_order, Ord::cmp)
            }
        }
    }

    /// Filters, sorts and slices one page. Ties keep store order.
    pub fn apply(&self, jobs: Vec<Job>) -> JobPage {
        let mut matching: Vec<Job> = jobs.into_iter().filter(|j| self.matches(j)).collect();
        matching.sort_by(|a, b| self.compare(a, b));

        let total = matching.len();
        let page_size = self.page_size.max(1) as usize;
        let total_pages = total.div_ceil(page_size);
        let offset = (self.page.max(1) as usize - 1) * page_size;

        JobPage {
            data: matching.into_iter().skip(offset).take(page_size).collect(),
            total,
            page: self.page,
            page_size: self.page_size,
            total_pages,
        }
    }
}

/// Orders present keys by `order`; missing keys always sort last.
fn present_first<T>(
    a: Option<T>,
    b: Option<T>,
    order: SortOrder,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => match order {
            SortOrder::Asc => cmp(&x, &y),
            SortOrder::Desc => cmp(&y, &x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
