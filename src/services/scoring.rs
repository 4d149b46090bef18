use anyhow::{Context, Result};
use chrono::Local;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::catalog::{RoleCatalog, RoleDefinition};
use crate::config::settings::AppConfig;
use crate::domain::{DivisionFilter, PlayerTable};
use crate::errors::{export_context, import_context, ConfigError};
use crate::ingest::{HtmlTableImporter, ImportedTable};
use crate::report::{assemble_top_report, CsvExporter, TopReport};
use crate::scoring::{self, ScoreMatrix};

/// Which catalog roles a request scores
#[derive(Debug, Clone, PartialEq)]
pub enum RoleSelection {
    Roles(Vec<String>),
    All,
}

#[derive(Debug, Clone)]
pub struct TopRequest {
    pub input: PathBuf,
    pub selection: RoleSelection,
    pub division: DivisionFilter,
    /// Export directory; `None` keeps the report in memory only
    pub save_to: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct TopResponse {
    pub report: TopReport,
    pub divisions: Vec<String>,
    pub exported: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct MatrixRequest {
    pub input: PathBuf,
    pub division: DivisionFilter,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct MatrixResponse {
    pub matrix: ScoreMatrix,
    pub exported: PathBuf,
}

/// Import → score → report, one request at a time
pub struct ScoringService {
    config: AppConfig,
    catalog: RoleCatalog,
    catalog_warning: Option<ConfigError>,
    importer: HtmlTableImporter,
}

impl ScoringService {
    /// Loads the catalog named by the config; a broken catalog degrades to an empty one
    pub fn new(config: AppConfig) -> Self {
        let (catalog, catalog_warning) = RoleCatalog::load_or_empty(&config.catalog.path);
        Self::with_catalog(config, catalog, catalog_warning)
    }

    pub fn with_catalog(
        config: AppConfig,
        catalog: RoleCatalog,
        catalog_warning: Option<ConfigError>,
    ) -> Self {
        Self {
            config,
            catalog,
            catalog_warning,
            importer: HtmlTableImporter::new(),
        }
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn catalog_warning(&self) -> Option<&ConfigError> {
        self.catalog_warning.as_ref()
    }

    pub fn import(&self, input: &Path) -> Result<ImportedTable> {
        self.importer
            .import_file(input)
            .with_context(|| import_context(input))
    }

    // --- Requests ---

    pub fn run_top(&self, request: &TopRequest) -> Result<TopResponse> {
        info!("=== Scoring Top Players ===");

        // Step 1: Import the table
        let imported = self.import(&request.input)?;
        check_division(&request.division, &imported.divisions);

        // Step 2: Resolve the selection against the catalog
        let roles = self.resolve(&request.selection)?;
        info!("  → {} roles selected", roles.len());

        // Step 3: Score and assemble
        let report = self.top_report(&imported.table, &roles, &request.division);

        // Step 4: Optional export
        let exported = match &request.save_to {
            Some(dir) => self.export_top(&report, dir)?,
            None => Vec::new(),
        };

        info!("=== Scoring Complete ===");
        Ok(TopResponse {
            report,
            divisions: imported.divisions,
            exported,
        })
    }

    pub fn run_matrix(&self, request: &MatrixRequest) -> Result<MatrixResponse> {
        info!("=== Scoring All Roles ===");

        let imported = self.import(&request.input)?;
        check_division(&request.division, &imported.divisions);

        let matrix = self.score_matrix(&imported.table, &request.division);
        if !matrix.skipped.is_empty() {
            warn!("Roles left unscored: {}", matrix.skipped.join(", "));
        }

        let exporter = CsvExporter::new(&self.config.export)?;
        let exported = exporter
            .export_matrix(&matrix, &request.out_dir, &Local::now())
            .with_context(|| export_context("score matrix"))?;

        info!("=== Scoring Complete ===");
        Ok(MatrixResponse { matrix, exported })
    }

    // --- Building blocks ---

    pub fn resolve(&self, selection: &RoleSelection) -> Result<Vec<&RoleDefinition>> {
        match selection {
            RoleSelection::All => Ok(self.catalog.roles().collect()),
            RoleSelection::Roles(ids) => Ok(self.catalog.resolve(ids)?),
        }
    }

    pub fn top_report(
        &self,
        table: &PlayerTable,
        roles: &[&RoleDefinition],
        filter: &DivisionFilter,
    ) -> TopReport {
        let outcomes = scoring::score_selected(roles, table, filter, &self.config.scoring);
        assemble_top_report(&outcomes)
    }

    pub fn score_matrix(&self, table: &PlayerTable, filter: &DivisionFilter) -> ScoreMatrix {
        scoring::score_matrix(&self.catalog, table, filter, &self.config.scoring)
    }

    pub fn export_top(&self, report: &TopReport, dir: &Path) -> Result<Vec<PathBuf>> {
        let exporter = CsvExporter::new(&self.config.export)?;
        exporter
            .export_top_report(report, dir, &Local::now())
            .with_context(|| export_context("top players"))
    }
}

fn check_division(filter: &DivisionFilter, divisions: &[String]) {
    if let DivisionFilter::Only(name) = filter {
        if !divisions.iter().any(|d| d == name) {
            warn!("Division \"{}\" does not appear in the table", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RoleGroup;
    use std::fs;

    const TABLE: &str = r#"<html><body><table>
        <tr><th>Name</th><th>Position</th><th>Division</th><th>Acceleration</th><th>Marking</th></tr>
        <tr><td>Second</td><td>D (C)</td><td>Premier</td><td>5</td><td>10</td></tr>
        <tr><td>First</td><td>D (RLC)</td><td>Premier</td><td>10</td><td>15</td></tr>
        <tr><td>Elsewhere</td><td>D (C)</td><td>Second Tier</td><td>20</td><td>20</td></tr>
    </table></body></html>"#;

    fn service() -> ScoringService {
        let catalog = RoleCatalog::from_groups(vec![RoleGroup {
            name: "Central Defenders".to_string(),
            roles: vec![
                RoleDefinition::new(
                    "bpdd_defend",
                    "Ball Playing Defender - Defend",
                    "Central Defenders",
                    [("Acceleration", 2.0), ("Marking", 3.0)],
                ),
                RoleDefinition::new(
                    "bwmd_defend",
                    "Ball Winning Midfielder - Defend",
                    "Central Defenders",
                    [("Marking", 1.0)],
                ),
            ],
        }])
        .unwrap();
        ScoringService::with_catalog(AppConfig::new(), catalog, None)
    }

    #[test]
    fn test_run_top_filters_division_and_reports_unclassified() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("players.html");
        fs::write(&input, TABLE).unwrap();

        let response = service()
            .run_top(&TopRequest {
                input,
                selection: RoleSelection::All,
                division: DivisionFilter::Only("Premier".to_string()),
                save_to: Some(dir.path().join("out")),
            })
            .unwrap();

        assert_eq!(response.divisions, vec!["Premier", "Second Tier"]);
        assert_eq!(response.report.blocks.len(), 1);
        let names: Vec<&str> = response.report.blocks[0]
            .rows
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(response.report.notices.len(), 1);
        assert_eq!(response.exported.len(), 1);
        assert!(response.exported[0].exists());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let service = service();
        let result = service.resolve(&RoleSelection::Roles(vec!["nope".to_string()]));
        assert!(result.is_err());

        let known = service
            .resolve(&RoleSelection::Roles(vec!["bpdd_defend".to_string()]))
            .unwrap();
        assert_eq!(known.len(), 1);
    }

    #[test]
    fn test_missing_input_has_context() {
        let err = service().import(Path::new("does/not/exist.html")).unwrap_err();
        assert!(err.to_string().contains("Failed to import player table"));
    }
}
