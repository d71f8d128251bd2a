//! Scoring runs: one batch of assessed postings for a user.
//!
//! Each posting is validated and scored on its own. A rejected assessment
//! never blocks the rest of the batch: the job is stored without a score and
//! with the reason scoring is unavailable.

pub mod handlers;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::assessment::parse_assessor_value;
use crate::models::job::{Job, JobPosting};
use crate::models::profile::Profile;
use crate::models::run::SearchRun;
use crate::scoring::ScoringEngine;
use crate::store::{JobRepository, StoreError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRunRequest {
    #[serde(default)]
    pub profile: Option<Profile>,
    pub jobs: Vec<ScoringRunItem>,
}

/// A scraped posting with the assessor's verdict on it. The assessment is
/// kept as raw JSON so one malformed item cannot fail the whole request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRunItem {
    pub posting: JobPosting,
    #[serde(default)]
    pub assessment: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringFailure {
    pub index: usize,
    pub job_id: Uuid,
    pub title: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRunResponse {
    pub run: SearchRun,
    pub failures: Vec<ScoringFailure>,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub jobs: Vec<Job>,
    pub filtered: usize,
    pub scored: usize,
    pub failures: Vec<ScoringFailure>,
}

/// Applies the profile's search filter, then scores each remaining posting.
pub fn score_postings(
    engine: &ScoringEngine,
    user_id: Uuid,
    profile: Option<&Profile>,
    items: Vec<ScoringRunItem>,
) -> RunOutcome {
    let profile_id = profile.map(|p| p.id);
    let mut jobs = Vec::with_capacity(items.len());
    let mut failures = Vec::new();
    let mut filtered = 0;
    let mut scored = 0;

    for (index, item) in items.into_iter().enumerate() {
        if let Some(profile) = profile {
            if let Err(exclusion) = profile.search_config.check(&item.posting) {
                debug!(index, title = %item.posting.title, reason = %exclusion, "Posting excluded by search config");
                filtered += 1;
                continue;
            }
        }

        match parse_assessor_value(item.assessment) {
            Ok(assessment) => {
                let breakdown = engine.score(assessment);
                jobs.push(Job::scored(user_id, profile_id, item.posting, breakdown));
                scored += 1;
            }
            Err(e) => {
                warn!(index, title = %item.posting.title, error = %e, "Scoring unavailable for job");
                let title = item.posting.title.clone();
                let job = Job::unscored(user_id, profile_id, item.posting, e.to_string());
                failures.push(ScoringFailure {
                    index,
                    job_id: job.id,
                    title,
                    reason: e.to_string(),
                });
                jobs.push(job);
            }
        }
    }

    RunOutcome {
        jobs,
        filtered,
        scored,
        failures,
    }
}

/// Records a run, scores the batch and stores the jobs in one write.
/// A storage failure marks the run failed instead of erroring the request.
pub async fn execute_run(
    store: &dyn JobRepository,
    engine: &ScoringEngine,
    user_id: Uuid,
    request: ScoringRunRequest,
) -> Result<ScoringRunResponse, StoreError> {
    let profile_id = request.profile.as_ref().map(|p| p.id);
    let mut run = SearchRun::start(user_id, profile_id, request.jobs.len());
    store.save_run(run.clone()).await?;

    let outcome = score_postings(engine, user_id, request.profile.as_ref(), request.jobs);
    debug_assert!(outcome.jobs.iter().all(|j| j.is_score_consistent(engine)));

    match store.insert_jobs(outcome.jobs).await {
        Ok(()) => {
            run.complete(outcome.filtered, outcome.scored);
            info!(
                run_id = %run.id,
                jobs_found = run.jobs_found,
                jobs_filtered = run.jobs_filtered,
                jobs_scored = run.jobs_scored,
                failures = outcome.failures.len(),
                "Scoring run completed"
            );
        }
        Err(e) => {
            error!(run_id = %run.id, error = %e, "Scoring run failed to store jobs");
            run.fail(e.to_string());
        }
    }
    store.save_run(run.clone()).await?;

    Ok(ScoringRunResponse {
        run,
        failures: outcome.failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::SearchConfig;
    use crate::models::run::SearchRunStatus;
    use crate::scoring::Tier;
    use crate::store::InMemoryStore;
    use chrono::Utc;
    use serde_json::json;

    fn item(title: &str, assessment: Value) -> ScoringRunItem {
        ScoringRunItem {
            posting: JobPosting {
                title: title.to_string(),
                ..Default::default()
            },
            assessment,
        }
    }

    fn uniform(v: f64) -> Value {
        json!({
            "skillMatch": v, "experienceLevel": v, "locationMatch": v,
            "salaryFit": v, "companySignals": v, "recency": v,
            "matchedSkills": ["rust"], "explanation": "fit"
        })
    }

    fn profile(user_id: Uuid, search_config: SearchConfig) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user_id,
            name: "default".to_string(),
            resume_data: None,
            search_config,
            schedule_interval: Default::default(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_bad_item_does_not_block_others() {
        let engine = ScoringEngine::default();
        let items = vec![
            item("good-a", uniform(0.9)),
            item("broken", json!("Sorry, I cannot help with that.")),
            item("good-b", uniform(0.55)),
        ];
        let outcome = score_postings(&engine, Uuid::new_v4(), None, items);

        assert_eq!(outcome.jobs.len(), 3);
        assert_eq!(outcome.scored, 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 1);
        assert_eq!(outcome.failures[0].title, "broken");

        assert_eq!(outcome.jobs[0].tier, Some(Tier::A));
        assert!(outcome.jobs[1].tier.is_none());
        assert!(outcome.jobs[1].scoring_error.is_some());
        assert_eq!(outcome.jobs[2].tier, Some(Tier::C));
    }

    #[test]
    fn test_out_of_range_item_is_not_clamped_into_a_tier() {
        let engine = ScoringEngine::default();
        let outcome = score_postings(&engine, Uuid::new_v4(), None, vec![item("x", uniform(1.4))]);
        assert_eq!(outcome.scored, 0);
        assert!(outcome.jobs[0].score.is_none());
    }

    #[test]
    fn test_profile_filter_drops_postings() {
        let engine = ScoringEngine::default();
        let user = Uuid::new_v4();
        let p = profile(
            user,
            SearchConfig {
                exclude_senior: true,
                ..Default::default()
            },
        );
        let items = vec![
            item("Senior Engineer", uniform(0.9)),
            item("Engineer", uniform(0.9)),
        ];
        let outcome = score_postings(&engine, user, Some(&p), items);
        assert_eq!(outcome.filtered, 1);
        assert_eq!(outcome.jobs.len(), 1);
        assert_eq!(outcome.jobs[0].profile_id, Some(p.id));
    }

    #[tokio::test]
    async fn test_execute_run_records_counts() {
        let store = InMemoryStore::new(100, 100);
        let engine = ScoringEngine::default();
        let user = Uuid::new_v4();
        let request = ScoringRunRequest {
            profile: None,
            jobs: vec![item("a", uniform(0.8)), item("b", Value::Null)],
        };

        let response = execute_run(&store, &engine, user, request).await.unwrap();
        assert_eq!(response.run.status, SearchRunStatus::Completed);
        assert_eq!(response.run.jobs_found, 2);
        assert_eq!(response.run.jobs_scored, 1);
        assert_eq!(response.failures.len(), 1);

        let stored = store.jobs_for_user(user).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|j| j.is_score_consistent(&engine)));

        let runs = store.runs_for_user(user).await.unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].status, SearchRunStatus::Completed);
    }

    #[tokio::test]
    async fn test_empty_run_completes() {
        let store = InMemoryStore::new(100, 100);
        let request = ScoringRunRequest {
            profile: None,
            jobs: vec![],
        };
        let response = execute_run(&store, &ScoringEngine::default(), Uuid::new_v4(), request)
            .await
            .unwrap();
        assert_eq!(response.run.status, SearchRunStatus::Completed);
        assert_eq!(response.run.jobs_scored, 0);
    }

    #[tokio::test]
    async fn test_storage_failure_marks_run_failed() {
        let store = InMemoryStore::new(1, 100);
        let user = Uuid::new_v4();
        let request = ScoringRunRequest {
            profile: None,
            jobs: vec![item("a", uniform(0.8)), item("b", uniform(0.8))],
        };
        let response = execute_run(&store, &ScoringEngine::default(), user, request)
            .await
            .unwrap();
        assert_eq!(response.run.status, SearchRunStatus::Failed);
        assert!(response.run.error_message.is_some());
        assert!(store.jobs_for_user(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_runs_keep_run_log_bounded() {
        let store = InMemoryStore::new(1, 3);
        let engine = ScoringEngine::default();
        let user = Uuid::new_v4();
        for _ in 0..50 {
            let request = ScoringRunRequest {
                profile: None,
                jobs: vec![item("a", uniform(0.8)), item("b", uniform(0.8))],
            };
            let response = execute_run(&store, &engine, user, request).await.unwrap();
            assert_eq!(response.run.status, SearchRunStatus::Failed);
        }
        assert_eq!(store.runs_for_user(user).await.unwrap().len(), 3);
    }
}
