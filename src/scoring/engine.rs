use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::HashMap;

use super::eligibility::{is_classified, is_eligible};
use super::types::{MatrixRow, RankedResultSet, RoleOutcome, Score, ScoreMatrix, ScoredEntry, SkipReason};
use crate::catalog::{RoleCatalog, RoleDefinition};
use crate::config::settings::ScoringSettings;
use crate::domain::{DivisionFilter, PlayerRecord, PlayerSummary, PlayerTable};
use crate::errors::ScoreError;

/// Rank every eligible player for one role.
///
/// Ties keep table order. The result holds all eligible players; use
/// [`RankedResultSet::top`] for the top-N view. A role weighting a column the
/// table does not have fails instead of scoring that attribute as unrated.
pub fn score_role(
    role: &RoleDefinition,
    table: &PlayerTable,
    filter: &DivisionFilter,
    settings: &ScoringSettings,
) -> Result<RankedResultSet, ScoreError> {
    // 1. Guard the divisor before touching any player
    let multiplier = checked_multiplier(role)?;

    // 2. Every weighted attribute must be a table column
    check_columns(role, table)?;

    // 3. Division filter, then position eligibility
    let eligible = filter_eligible(role, &table.players, filter);
    debug!(
        "{}: {} eligible players (division: {})",
        role.role_abbr,
        eligible.len(),
        filter
    );

    // 4. Normalized weighted scores
    let mut entries: Vec<ScoredEntry> = eligible
        .into_iter()
        .map(|(row, player)| ScoredEntry {
            player: PlayerSummary::from_record(row, player),
            score: weighted_score(role, player, multiplier, settings.floor_value),
            gap_pct: 0.0,
        })
        .collect();

    // 5. Rank, best first
    rank_entries(&mut entries);

    // 6. Gap to the top score
    let top_score = entries.first().map(|e| e.score).unwrap_or(0.0);
    apply_gaps(&mut entries, top_score);

    Ok(RankedResultSet {
        role_abbr: role.role_abbr.clone(),
        role_name: role.role.clone(),
        top_score,
        entries,
    })
}

/// Score the selected roles independently, truncated to the configured top-N
pub fn score_selected(
    roles: &[&RoleDefinition],
    table: &PlayerTable,
    filter: &DivisionFilter,
    settings: &ScoringSettings,
) -> Vec<RoleOutcome> {
    info!(
        "Scoring {} roles for {} players (division: {})",
        roles.len(),
        table.len(),
        filter
    );

    roles
        .par_iter()
        .map(|role| role_outcome(role, table, filter, settings))
        .collect()
}

/// Score every catalog role for every player passing the division filter
pub fn score_matrix(
    catalog: &RoleCatalog,
    table: &PlayerTable,
    filter: &DivisionFilter,
    settings: &ScoringSettings,
) -> ScoreMatrix {
    let roles: Vec<&RoleDefinition> = catalog.roles().collect();
    info!(
        "Scoring all {} roles for {} players (division: {})",
        roles.len(),
        table.len(),
        filter
    );

    let mut rows: Vec<MatrixRow> = table
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| filter.matches(p))
        .map(|(row, p)| MatrixRow {
            player: PlayerSummary::from_record(row, p),
            scores: vec![None; roles.len()],
        })
        .collect();
    let position_of: HashMap<usize, usize> = rows
        .iter()
        .enumerate()
        .map(|(pos, r)| (r.player.row, pos))
        .collect();

    let columns: Vec<Result<RankedResultSet, ScoreError>> = roles
        .par_iter()
        .map(|role| score_role(role, table, filter, settings))
        .collect();

    let mut skipped = Vec::new();
    for (col, (role, column)) in roles.iter().zip(columns).enumerate() {
        match column {
            Ok(set) => {
                for entry in set.entries {
                    if let Some(&pos) = position_of.get(&entry.player.row) {
                        rows[pos].scores[col] = Some(entry.score);
                    }
                }
            }
            Err(e) => {
                warn!("{}", e);
                skipped.push(role.role_abbr.clone());
            }
        }
    }

    ScoreMatrix {
        role_abbrs: roles.iter().map(|r| r.role_abbr.clone()).collect(),
        rows,
        skipped,
    }
}

// --- Per-Role Steps ---

fn role_outcome(
    role: &RoleDefinition,
    table: &PlayerTable,
    filter: &DivisionFilter,
    settings: &ScoringSettings,
) -> RoleOutcome {
    if !is_classified(&role.role_abbr) {
        debug!("{}: no eligibility rule, not evaluated", role.role_abbr);
        return skipped(role, SkipReason::Unclassified);
    }

    match score_role(role, table, filter, settings) {
        Ok(set) => RoleOutcome::Ranked(set.top(settings.top_n)),
        Err(e) => {
            warn!("{}", e);
            skipped(role, e.into())
        }
    }
}

fn skipped(role: &RoleDefinition, reason: SkipReason) -> RoleOutcome {
    RoleOutcome::Skipped {
        role_abbr: role.role_abbr.clone(),
        role_name: role.role.clone(),
        reason,
    }
}

fn checked_multiplier(role: &RoleDefinition) -> Result<f64, ScoreError> {
    let multiplier = role.total_multiplier();
    if multiplier == 0.0 {
        return Err(ScoreError::ZeroMultiplier {
            role_abbr: role.role_abbr.clone(),
        });
    }
    Ok(multiplier)
}

fn check_columns(role: &RoleDefinition, table: &PlayerTable) -> Result<(), ScoreError> {
    let missing: Vec<String> = role
        .weights
        .iter()
        .filter(|(attribute, weight)| **weight > 0.0 && !table.has_column(attribute))
        .map(|(attribute, _)| attribute.clone())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ScoreError::MissingAttributes {
            role_abbr: role.role_abbr.clone(),
            missing,
        })
    }
}

fn filter_eligible<'a>(
    role: &RoleDefinition,
    players: &'a [PlayerRecord],
    filter: &DivisionFilter,
) -> Vec<(usize, &'a PlayerRecord)> {
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| filter.matches(p))
        .filter(|(_, p)| is_eligible(p.position(), &role.role_abbr))
        .collect()
}

fn weighted_score(role: &RoleDefinition, player: &PlayerRecord, multiplier: f64, floor: f64) -> Score {
    let raw: f64 = role
        .weights
        .iter()
        .map(|(attribute, weight)| player.attribute(attribute, floor) * weight)
        .sum();
    raw / multiplier
}

/// Stable: equal scores keep their input order
fn rank_entries(entries: &mut [ScoredEntry]) {
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
}

fn apply_gaps(entries: &mut [ScoredEntry], top_score: Score) {
    for entry in entries.iter_mut() {
        entry.gap_pct = gap_to_top(entry.score, top_score);
    }
}

fn gap_to_top(score: Score, top_score: Score) -> f64 {
    if top_score != 0.0 {
        100.0 * (top_score - score) / top_score
    } else {
        0.0
    }
}
