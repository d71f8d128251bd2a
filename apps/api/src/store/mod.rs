//! Job and run storage behind a trait, so the HTTP layer never depends on a
//! concrete backend. `AppState` carries an `Arc<dyn JobRepository>`.
//!
//! The only backend is `InMemoryStore`: process-local, lost on restart.

use std::collections::VecDeque;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::job::{Job, JobStatus};
use crate::models::run::SearchRun;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storing {incoming} more jobs would exceed the limit of {limit}")]
    CapacityExceeded { incoming: usize, limit: usize },
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Inserts all jobs or none.
    async fn insert_jobs(&self, jobs: Vec<Job>) -> Result<(), StoreError>;

    /// All jobs of a user, oldest first.
    async fn jobs_for_user(&self, user_id: Uuid) -> Result<Vec<Job>, StoreError>;

    async fn get_job(&self, user_id: Uuid, job_id: Uuid) -> Result<Option<Job>, StoreError>;

    /// Changes only the status; scoring fields are left untouched.
    async fn update_status(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        status: JobStatus,
    ) -> Result<Option<Job>, StoreError>;

    /// Inserts or replaces a run record by id. Backends may evict the
    /// oldest run records to stay within their limit.
    async fn save_run(&self, run: SearchRun) -> Result<(), StoreError>;

    /// Runs of a user, newest first.
    async fn runs_for_user(&self, user_id: Uuid) -> Result<Vec<SearchRun>, StoreError>;
}

#[derive(Default)]
struct StoreInner {
    jobs: Vec<Job>,
    /// Insertion order, oldest at the front.
    runs: VecDeque<SearchRun>,
}

pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
    max_jobs: usize,
    max_runs: usize,
}

impl InMemoryStore {
    /// `max_runs` bounds the run log across all users; at least one run is kept.
    pub fn new(max_jobs: usize, max_runs: usize) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            max_jobs,
            max_runs: max_runs.max(1),
        }
    }
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn insert_jobs(&self, jobs: Vec<Job>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.jobs.len() + jobs.len() > self.max_jobs {
            return Err(StoreError::CapacityExceeded {
                incoming: jobs.len(),
                limit: self.max_jobs,
            });
        }
        inner.jobs.extend(jobs);
        Ok(())
    }

    async fn jobs_for_user(&self, user_id: Uuid) -> Result<Vec<Job>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .jobs
            .iter()
            .filter(|j| j.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_job(&self, user_id: Uuid, job_id: Uuid) -> Result<Option<Job>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .jobs
            .iter()
            .find(|j| j.id == job_id && j.user_id == user_id)
            .cloned())
    }

    async fn update_status(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        status: JobStatus,
    ) -> Result<Option<Job>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .jobs
            .iter_mut()
            .find(|j| j.id == job_id && j.user_id == user_id)
            .map(|job| {
                job.status = status;
                job.clone()
            }))
    }

    async fn save_run(&self, run: SearchRun) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        match inner.runs.iter_mut().find(|r| r.id == run.id) {
            Some(existing) => *existing = run,
            None => {
                inner.runs.push_back(run);
                while inner.runs.len() > self.max_runs {
                    if let Some(evicted) = inner.runs.pop_front() {
                        tracing::debug!(run_id = %evicted.id, "Evicted oldest run record");
                    }
                }
            }
        }
        Ok(())
    }

    async fn runs_for_user(&self, user_id: Uuid) -> Result<Vec<SearchRun>, StoreError> {
        let inner = self.inner.read().await;
        let mut runs: Vec<SearchRun> = inner
            .runs
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        runs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Assessment;
    use crate::models::job::JobPosting;
    use crate::scoring::{FactorScores, ScoringEngine};

    fn scored_job(user_id: Uuid, title: &str) -> Job {
        let breakdown = ScoringEngine::default().score(Assessment {
            factors: FactorScores::uniform(0.8),
            matched_skills: vec![],
            missing_skills: vec![],
            explanation: String::new(),
        });
        let posting = JobPosting {
            title: title.to_string(),
            ..Default::default()
        };
        Job::scored(user_id, None, posting, breakdown)
    }

    #[tokio::test]
    async fn test_jobs_scoped_to_user() {
        let store = InMemoryStore::new(100, 100);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store
            .insert_jobs(vec![scored_job(alice, "a1"), scored_job(bob, "b1")])
            .await
            .unwrap();

        let jobs = store.jobs_for_user(alice).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "a1");

        let bob_job = store.jobs_for_user(bob).await.unwrap()[0].id;
        assert!(store.get_job(alice, bob_job).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_status_update_leaves_scoring_untouched() {
        let store = InMemoryStore::new(100, 100);
        let user = Uuid::new_v4();
        let job = scored_job(user, "x");
        let (id, score, tier, breakdown) =
            (job.id, job.score, job.tier, job.scoring_breakdown.clone());
        store.insert_jobs(vec![job]).await.unwrap();

        let updated = store
            .update_status(user, id, JobStatus::Applied)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, JobStatus::Applied);
        assert_eq!(updated.score, score);
        assert_eq!(updated.tier, tier);
        assert_eq!(updated.scoring_breakdown, breakdown);
    }

    #[tokio::test]
    async fn test_update_unknown_job_returns_none() {
        let store = InMemoryStore::new(100, 100);
        let res = store
            .update_status(Uuid::new_v4(), Uuid::new_v4(), JobStatus::Saved)
            .await
            .unwrap();
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn test_capacity_is_all_or_nothing() {
        let store = InMemoryStore::new(2, 10);
        let user = Uuid::new_v4();
        store.insert_jobs(vec![scored_job(user, "1")]).await.unwrap();

        let err = store
            .insert_jobs(vec![scored_job(user, "2"), scored_job(user, "3")])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::CapacityExceeded {
                incoming: 2,
                limit: 2
            }
        ));
        assert_eq!(store.jobs_for_user(user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_run_replaces_by_id() {
        let store = InMemoryStore::new(10, 10);
        let user = Uuid::new_v4();
        let mut run = SearchRun::start(user, None, 3);
        store.save_run(run.clone()).await.unwrap();
        run.complete(0, 3);
        store.save_run(run.clone()).await.unwrap();

        let runs = store.runs_for_user(user).await.unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].jobs_scored, 3);
    }

    #[tokio::test]
    async fn test_run_log_is_bounded() {
        let store = InMemoryStore::new(1, 5);
        let user = Uuid::new_v4();
        let mut last = None;
        for _ in 0..1000 {
            let mut run = SearchRun::start(user, None, 2);
            store.save_run(run.clone()).await.unwrap();
            run.fail("storing 2 more jobs would exceed the limit of 1".to_string());
            store.save_run(run.clone()).await.unwrap();
            last = Some(run.id);
        }

        let runs = store.runs_for_user(user).await.unwrap();
        assert_eq!(runs.len(), 5);
        assert!(runs.iter().any(|r| Some(r.id) == last));
    }

    #[tokio::test]
    async fn test_eviction_drops_oldest_across_users() {
        let store = InMemoryStore::new(10, 2);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let first = SearchRun::start(alice, None, 0);
        store.save_run(first.clone()).await.unwrap();
        store.save_run(SearchRun::start(bob, None, 0)).await.unwrap();
        store.save_run(SearchRun::start(alice, None, 0)).await.unwrap();

        let alice_runs = store.runs_for_user(alice).await.unwrap();
        assert_eq!(alice_runs.len(), 1);
        assert_ne!(alice_runs[0].id, first.id);
        assert_eq!(store.runs_for_user(bob).await.unwrap().len(), 1);
    }
}
