// Dashboard statistics and scoring-formula disclosure.

pub mod handlers;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::job::{Job, JobStatus};
use crate::models::run::{SearchRun, SearchRunStatus};
use crate::scoring::{ScoringFactor, ScoringWeights, Tier};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_jobs: usize,
    pub new_count: usize,
    pub applied_count: usize,
    pub saved_count: usize,
    pub hidden_count: usize,
    pub average_score: f64,
    /// Share of applied jobs in tier A or B, as a percentage.
    pub interview_likelihood: f64,
    pub tier_distribution: BTreeMap<Tier, usize>,
}

pub fn compute_dashboard_stats(jobs: &[Job]) -> DashboardStats {
    let count_status = |status: JobStatus| jobs.iter().filter(|j| j.status == status).count();
    let applied_count = count_status(JobStatus::Applied);

    let scores: Vec<f64> = jobs.iter().filter_map(|j| j.score).collect();
    let average_score = if scores.is_empty() {
        0.0
    } else {
        round_to(scores.iter().sum::<f64>() / scores.len() as f64, 2)
    };

    let mut tier_distribution: BTreeMap<Tier, usize> =
        Tier::ALL.iter().map(|t| (*t, 0)).collect();
    for tier in jobs.iter().filter_map(|j| j.tier) {
        *tier_distribution.entry(tier).or_default() += 1;
    }

    let high_tier_applied = jobs
        .iter()
        .filter(|j| j.status == JobStatus::Applied)
        .filter(|j| j.tier.is_some_and(|t| t >= Tier::B))
        .count();
    let interview_likelihood = if applied_count > 0 {
        round_to(high_tier_applied as f64 / applied_count as f64 * 100.0, 1)
    } else {
        0.0
    };

    DashboardStats {
        total_jobs: jobs.len(),
        new_count: count_status(JobStatus::New),
        applied_count,
        saved_count: count_status(JobStatus::Saved),
        hidden_count: count_status(JobStatus::Hidden),
        average_score,
        interview_likelihood,
        tier_distribution,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorWeight {
    pub factor: ScoringFactor,
    pub weight: f64,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRow {
    pub tier: Tier,
    pub min_score: f64,
    pub label: &'static str,
    pub description: &'static str,
}

/// The active formula, for transparency in the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringFormula {
    pub weights: Vec<FactorWeight>,
    pub tiers: Vec<TierRow>,
}

pub fn scoring_formula(weights: &ScoringWeights) -> ScoringFormula {
    ScoringFormula {
        weights: ScoringFactor::ALL
            .iter()
            .map(|f| FactorWeight {
                factor: *f,
                weight: weights.get(*f),
                description: f.description(),
            })
            .collect(),
        tiers: Tier::ALL.iter().map(|t| tier_row(*t)).collect(),
    }
}

pub fn tier_row(tier: Tier) -> TierRow {
    let meta = tier.metadata();
    TierRow {
        tier,
        min_score: tier.min_score(),
        label: meta.label,
        description: meta.description,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    pub last_search_run: Option<SearchRun>,
    /// Whole days since the newest completed run finished; -1 when none has.
    pub data_freshness_days: i64,
}

/// `runs` must be newest first, as `JobRepository::runs_for_user` returns them.
pub fn system_health(runs: &[SearchRun], now: DateTime<Utc>) -> SystemHealth {
    let data_freshness_days = runs
        .iter()
        .filter(|r| r.status == SearchRunStatus::Completed)
        .find_map(|r| r.completed_at)
        .map_or(-1, |done| (now - done).num_days().max(0));

    SystemHealth {
        last_search_run: runs.first().cloned(),
        data_freshness_days,
    }
}
