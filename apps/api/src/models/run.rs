use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchRunStatus {
    Running,
    Completed,
    Failed,
}

/// One batch of assessed postings scored together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRun {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: SearchRunStatus,
    pub jobs_found: usize,
    pub jobs_filtered: usize,
    pub jobs_scored: usize,
    pub error_message: Option<String>,
}

impl SearchRun {
    pub fn start(user_id: Uuid, profile_id: Option<Uuid>, jobs_found: usize) -> Self {
        SearchRun {
            id: Uuid::new_v4(),
            user_id,
            profile_id,
            started_at: Utc::now(),
            completed_at: None,
            status: SearchRunStatus::Running,
            jobs_found,
            jobs_filtered: 0,
            jobs_scored: 0,
            error_message: None,
        }
    }

    pub fn complete(&mut self, jobs_filtered: usize, jobs_scored: usize) {
        self.status = SearchRunStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.jobs_filtered = jobs_filtered;
        self.jobs_scored = jobs_scored;
    }

    pub fn fail(&mut self, message: String) {
        self.status = SearchRunStatus::Failed;
        self.completed_at = Some(Utc::now());
        self.error_message = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_lifecycle() {
        let mut run = SearchRun::start(Uuid::new_v4(), None, 5);
        assert_eq!(run.status, SearchRunStatus::Running);
        assert!(run.completed_at.is_none());

        run.complete(1, 3);
        assert_eq!(run.status, SearchRunStatus::Completed);
        assert_eq!(run.jobs_found, 5);
        assert_eq!(run.jobs_filtered, 1);
        assert_eq!(run.jobs_scored, 3);
        assert!(run.completed_at.is_some());
    }

    #[test]
    fn test_failed_run_keeps_message() {
        let mut run = SearchRun::start(Uuid::new_v4(), None, 2);
        run.fail("store unavailable".to_string());
        assert_eq!(run.status, SearchRunStatus::Failed);
        assert_eq!(run.error_message.as_deref(), Some("store unavailable"));
    }
}
