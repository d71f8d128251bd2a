use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discrete match quality. Ordered `A > B > C > D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    A,
    B,
    C,
    D,
}

/// Inclusive lower bounds, scanned highest first. Anything below the last
/// entry (including NaN) is `Tier::D`.
pub const TIER_THRESHOLDS: [(f64, Tier); 3] = [(0.85, Tier::A), (0.70, Tier::B), (0.50, Tier::C)];

/// Maps a total score to its tier. First threshold the score reaches wins.
pub fn compute_tier(total_score: f64) -> Tier {
    TIER_THRESHOLDS
        .iter()
        .find(|(min_score, _)| total_score >= *min_score)
        .map(|(_, tier)| *tier)
        .unwrap_or(Tier::D)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierMetadata {
    pub label: &'static str,
    pub description: &'static str,
}

pub fn tier_metadata(tier: Tier) -> TierMetadata {
    let (label, description) = match tier {
        Tier::A => ("Excellent Match", "Strong fit - apply immediately"),
        Tier::B => ("Good Match", "Worth applying - solid opportunity"),
        Tier::C => ("Fair Match", "Consider applying - some gaps"),
        Tier::D => ("Low Match", "Not recommended - significant gaps"),
    };
    TierMetadata { label, description }
}

impl Tier {
    /// Best first.
    pub const ALL: [Tier; 4] = [Tier::A, Tier::B, Tier::C, Tier::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        }
    }

    /// Lowest total that lands in this tier. `D` has no floor; 0.0 is
    /// reported for display.
    pub fn min_score(&self) -> f64 {
        TIER_THRESHOLDS
            .iter()
            .find(|(_, tier)| tier == self)
            .map(|(min_score, _)| *min_score)
            .unwrap_or(0.0)
    }

    pub fn metadata(&self) -> TierMetadata {
        tier_metadata(*self)
    }

    fn rank(&self) -> u8 {
        match self {
            Tier::A => 3,
            Tier::B => 2,
            Tier::C => 1,
            Tier::D => 0,
        }
    }
}

impl Ord for Tier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Tier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tier '{0}', expected one of A, B, C, D")]
pub struct TierParseError(pub String);

impl FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Tier::A),
            "B" | "b" => Ok(Tier::B),
            "C" | "c" => Ok(Tier::C),
            "D" | "d" => Ok(Tier::D),
            other => Err(TierParseError(other.to_string())),
        }
    }
}
