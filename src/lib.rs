pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ingest;
pub mod report;
pub mod scoring;
pub mod services;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::DivisionFilter;
use crate::ingest::HtmlTableImporter;
use crate::report::render_text;
use crate::services::{MatrixRequest, RoleSelection, ScoringService, TopRequest};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_roles(catalog: Option<PathBuf>) -> Result<()> {
    let service = scoring_service(catalog);

    for group in service.catalog().groups() {
        println!("{}", group.name.bold());
        for role in &group.roles {
            println!("  {:<20} {}", role.role_abbr, role.role);
        }
    }
    Ok(())
}

pub fn handle_divisions(input: &Path) -> Result<()> {
    let imported = HtmlTableImporter::new()
        .import_file(input)
        .with_context(|| errors::import_context(input))?;

    println!("{}", domain::ALL_DIVISIONS);
    for division in &imported.divisions {
        println!("{}", division);
    }
    Ok(())
}

pub fn handle_top(
    input: &Path,
    catalog: Option<PathBuf>,
    roles: &[String],
    all_roles: bool,
    division: Option<&str>,
    save: bool,
    out_dir: &Path,
) -> Result<()> {
    let service = scoring_service(catalog);
    let request = TopRequest {
        input: input.to_path_buf(),
        selection: if all_roles {
            RoleSelection::All
        } else {
            RoleSelection::Roles(roles.to_vec())
        },
        division: DivisionFilter::parse(division),
        save_to: save.then(|| out_dir.to_path_buf()),
    };

    let response = service.run_top(&request)?;
    print!("{}", render_text(&response.report));
    for path in &response.exported {
        println!("Saved {}", path.display());
    }
    Ok(())
}

pub fn handle_matrix(
    input: &Path,
    catalog: Option<PathBuf>,
    division: Option<&str>,
    out_dir: &Path,
) -> Result<()> {
    let service = scoring_service(catalog);
    let request = MatrixRequest {
        input: input.to_path_buf(),
        division: DivisionFilter::parse(division),
        out_dir: out_dir.to_path_buf(),
    };

    let response = service.run_matrix(&request)?;
    println!(
        "Saved {} players x {} roles to {}",
        response.matrix.rows.len(),
        response.matrix.role_abbrs.len(),
        response.exported.display()
    );
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn scoring_service(catalog: Option<PathBuf>) -> ScoringService {
    let config = AppConfig::new().with_catalog_path(catalog);
    let service = ScoringService::new(config);
    if let Some(warning) = service.catalog_warning() {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }
    service
}
