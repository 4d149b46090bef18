pub mod eligibility;
pub mod engine;
pub mod types;

pub use eligibility::{is_classified, is_eligible, rule_for_role};
pub use engine::{score_matrix, score_role, score_selected};
pub use types::{MatrixRow, RankedResultSet, RoleOutcome, ScoreMatrix, ScoredEntry, SkipReason};
