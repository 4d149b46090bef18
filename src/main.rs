use anyhow::Result;

use fm_role_score::cli::Command;
use fm_role_score::{
    handle_completions, handle_divisions, handle_matrix, handle_roles, handle_top, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Roles { catalog } => handle_roles(catalog.clone()),
        Command::Divisions { input } => handle_divisions(input),
        Command::Top {
            input,
            catalog,
            roles,
            all_roles,
            division,
            save,
            out_dir,
        } => handle_top(
            input,
            catalog.clone(),
            roles,
            *all_roles,
            division.as_deref(),
            *save,
            out_dir,
        ),
        Command::Matrix {
            input,
            catalog,
            division,
            out_dir,
        } => handle_matrix(input, catalog.clone(), division.as_deref(), out_dir),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
