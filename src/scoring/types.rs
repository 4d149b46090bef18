use serde::Serialize;
use std::fmt;

use crate::domain::PlayerSummary;
use crate::errors::ScoreError;

pub type Score = f64;

/// One player's score for one role
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntry {
    pub player: PlayerSummary,
    pub score: Score,
    pub gap_pct: f64,
}

/// Players ranked for a role, best first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResultSet {
    pub role_abbr: String,
    pub role_name: String,
    pub top_score: Score,
    pub entries: Vec<ScoredEntry>,
}

impl RankedResultSet {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The first `n` entries; the gap baseline is unchanged
    pub fn top(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }
}

/// Why a selected role produced no ranking
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    ZeroMultiplier,
    Unclassified,
    /// Weighted attributes absent from the imported table
    MissingAttributes(Vec<String>),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ZeroMultiplier => f.write_str("role has no effective weights"),
            SkipReason::Unclassified => f.write_str("role has no position eligibility rule"),
            SkipReason::MissingAttributes(missing) => {
                write!(f, "table has no column for {}", missing.join(", "))
            }
        }
    }
}

/// Result for one role in a batch
#[derive(Debug, Clone, PartialEq)]
pub enum RoleOutcome {
    Ranked(RankedResultSet),
    Skipped {
        role_abbr: String,
        role_name: String,
        reason: SkipReason,
    },
}

impl From<ScoreError> for SkipReason {
    fn from(err: ScoreError) -> Self {
        match err {
            ScoreError::ZeroMultiplier { .. } => SkipReason::ZeroMultiplier,
            ScoreError::MissingAttributes { missing, .. } => SkipReason::MissingAttributes(missing),
        }
    }
}

/// Every filtered player against every catalog role
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMatrix {
    pub role_abbrs: Vec<String>,
    pub rows: Vec<MatrixRow>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub player: PlayerSummary,
    /// One entry per role column; `None` means not applicable
    pub scores: Vec<Option<Score>>,
}
