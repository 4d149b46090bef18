use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;

use crate::scoring::{RankedResultSet, RoleOutcome};

pub const ROLE_HEADER: [&str; 9] = [
    "Rank", "Name", "Nat", "Club", "Division", "Position", "Age", "Score", "Gap %",
];

/// One displayable row of a role's top-N table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub rank: usize,
    pub name: String,
    pub nat: String,
    pub club: String,
    pub division: String,
    pub position: String,
    pub age: String,
    pub score: String,
    pub gap: String,
}

impl ReportRow {
    /// Fields in [`ROLE_HEADER`] order
    pub fn fields(&self) -> [String; 9] {
        [
            self.rank.to_string(),
            self.name.clone(),
            self.nat.clone(),
            self.club.clone(),
            self.division.clone(),
            self.position.clone(),
            self.age.clone(),
            self.score.clone(),
            self.gap.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleReport {
    pub role_abbr: String,
    pub title: String,
    pub rows: Vec<ReportRow>,
}

/// Everything the top-players view shows, in selection order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopReport {
    pub blocks: Vec<RoleReport>,
    pub notices: Vec<String>,
}

pub fn assemble_top_report(outcomes: &[RoleOutcome]) -> TopReport {
    let mut report = TopReport::default();

    for outcome in outcomes {
        match outcome {
            RoleOutcome::Ranked(set) => report.blocks.push(role_block(set)),
            RoleOutcome::Skipped {
                role_abbr,
                role_name,
                reason,
            } => report.notices.push(format!(
                "{} ({}) skipped: {}",
                role_name, role_abbr, reason
            )),
        }
    }

    report
}

pub fn role_block(set: &RankedResultSet) -> RoleReport {
    let rows = set
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| ReportRow {
            rank: idx + 1,
            name: entry.player.name.clone(),
            nat: entry.player.nat.clone(),
            club: entry.player.club.clone(),
            division: entry.player.division.clone(),
            position: entry.player.position.clone(),
            age: entry.player.age.clone(),
            score: format!("{:.2}", entry.score),
            gap: format!("{:.2}", entry.gap_pct),
        })
        .collect();

    RoleReport {
        role_abbr: set.role_abbr.clone(),
        title: format!("{} ({})", set.role_name, set.role_abbr),
        rows,
    }
}

// --- Text rendering ---

/// Render the report as aligned plain-text tables
pub fn render_text(report: &TopReport) -> String {
    let mut out = String::new();

    for block in &report.blocks {
        let _ = writeln!(out, "{}", block.title.bold().green());
        if block.rows.is_empty() {
            let _ = writeln!(out, "  {}\n", "no eligible players".dimmed());
            continue;
        }
        render_table(&mut out, block);
        out.push('\n');
    }

    for notice in &report.notices {
        let _ = writeln!(out, "{}", notice.yellow());
    }

    out
}

fn render_table(out: &mut String, block: &RoleReport) {
    let rows: Vec<[String; 9]> = block.rows.iter().map(ReportRow::fields).collect();

    let mut widths: Vec<usize> = ROLE_HEADER.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, field) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(field.chars().count());
        }
    }

    let header: Vec<String> = ROLE_HEADER.iter().map(|h| h.to_string()).collect();
    let _ = writeln!(out, "  {}", pad_line(&header, &widths).bold());
    for row in &rows {
        let _ = writeln!(out, "  {}", pad_line(row, &widths));
    }
}

fn pad_line(fields: &[String], widths: &[usize]) -> String {
    fields
        .iter()
        .zip(widths)
        .map(|(field, &width)| format!("{:<width$}", field, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlayerSummary;
    use crate::scoring::{ScoredEntry, SkipReason};

    fn entry(row: usize, name: &str, score: f64, gap_pct: f64) -> ScoredEntry {
        ScoredEntry {
            player: PlayerSummary {
                row,
                name: name.to_string(),
                nat: "ENG".to_string(),
                club: "Leeds".to_string(),
                division: "Championship".to_string(),
                position: "D (C)".to_string(),
                age: "24".to_string(),
            },
            score,
            gap_pct,
        }
    }

    fn ranked() -> RankedResultSet {
        RankedResultSet {
            role_abbr: "bpdd_defend".to_string(),
            role_name: "Ball Playing Defender - Defend".to_string(),
            top_score: 13.0,
            entries: vec![entry(2, "First", 13.0, 0.0), entry(0, "Second", 8.0, 38.461538)],
        }
    }

    #[test]
    fn test_block_formats_scores() {
        let block = role_block(&ranked());

        assert_eq!(block.title, "Ball Playing Defender - Defend (bpdd_defend)");
        assert_eq!(block.rows[0].rank, 1);
        assert_eq!(block.rows[0].score, "13.00");
        assert_eq!(block.rows[0].gap, "0.00");
        assert_eq!(block.rows[1].rank, 2);
        assert_eq!(block.rows[1].gap, "38.46");
    }

    #[test]
    fn test_skipped_roles_become_notices() {
        let outcomes = vec![
            RoleOutcome::Ranked(ranked()),
            RoleOutcome::Skipped {
                role_abbr: "bwmd_defend".to_string(),
                role_name: "Ball Winning Midfielder - Defend".to_string(),
                reason: SkipReason::Unclassified,
            },
            RoleOutcome::Skipped {
                role_abbr: "cdd_defend".to_string(),
                role_name: "Central Defender - Defend".to_string(),
                reason: SkipReason::MissingAttributes(vec!["Heading".to_string(), "Marking".to_string()]),
            },
        ];
        let report = assemble_top_report(&outcomes);

        assert_eq!(report.blocks.len(), 1);
        assert_eq!(report.notices.len(), 2);
        assert!(report.notices[0].contains("bwmd_defend"));
        assert_eq!(
            report.notices[1],
            "Central Defender - Defend (cdd_defend) skipped: table has no column for Heading, Marking"
        );
    }

    #[test]
    fn test_render_text_lists_players_in_rank_order() {
        colored::control::set_override(false);
        let report = assemble_top_report(&[RoleOutcome::Ranked(ranked())]);
        let text = render_text(&report);

        let first = text.find("First").unwrap();
        let second = text.find("Second").unwrap();
        assert!(text.starts_with("Ball Playing Defender - Defend (bpdd_defend)"));
        assert!(first < second);
        assert!(text.contains("38.46"));
    }
}
