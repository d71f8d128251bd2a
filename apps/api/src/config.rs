use anyhow::{Context, Result};

use crate::scoring::ScoringWeights;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Override of the default weight table, from `SCORING_WEIGHTS` (JSON).
    /// Validated when the scoring engine is built.
    pub scoring_weights: ScoringWeights,
    pub max_stored_jobs: usize,
    /// Run records kept across all users; the oldest are evicted first.
    pub max_stored_runs: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            scoring_weights: parse_weights(std::env::var("SCORING_WEIGHTS").ok().as_deref())?,
            max_stored_jobs: std::env::var("MAX_STORED_JOBS")
                .unwrap_or_else(|_| "50000".to_string())
                .parse::<usize>()
                .context("MAX_STORED_JOBS must be a non-negative integer")?,
            max_stored_runs: std::env::var("MAX_STORED_RUNS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse::<usize>()
                .context("MAX_STORED_RUNS must be a non-negative integer")?,
        })
    }
}

fn parse_weights(raw: Option<&str>) -> Result<ScoringWeights> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(json) => serde_json::from_str(json)
            .context("SCORING_WEIGHTS must be a JSON object with the six camelCase factor keys"),
        None => Ok(ScoringWeights::default()),
    }
}
