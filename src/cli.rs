use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Score and rank football-manager players by role")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// List the role catalog grouped by category
    Roles {
        /// Role catalog JSON (defaults to $FM_ROLES_PATH or data/player_roles.json)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// List the divisions found in a player table
    Divisions {
        /// Exported HTML player table
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Show the top players for the selected roles
    Top {
        /// Exported HTML player table
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Role identifier, e.g. bpdd_defend (repeatable)
        #[arg(short, long = "role", required_unless_present = "all_roles")]
        roles: Vec<String>,
        /// Score every role in the catalog
        #[arg(long, conflicts_with = "roles")]
        all_roles: bool,
        /// Only players from this division ("All" for everyone)
        #[arg(short, long)]
        division: Option<String>,
        /// Also write one CSV per role
        #[arg(short, long)]
        save: bool,
        #[arg(short, long, default_value = "exports")]
        out_dir: PathBuf,
    },
    /// Export every player's score for every role as one CSV
    Matrix {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        #[arg(short, long)]
        division: Option<String>,
        #[arg(short, long, default_value = "exports")]
        out_dir: PathBuf,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_requires_a_selection() {
        assert!(Cli::try_parse_from(["fm_role_score", "top", "-i", "players.html"]).is_err());
        assert!(
            Cli::try_parse_from(["fm_role_score", "top", "-i", "p.html", "--all-roles", "-r", "cdd_defend"])
                .is_err()
        );
    }

    #[test]
    fn test_top_collects_repeated_roles() {
        let cli = Cli::try_parse_from([
            "fm_role_score", "top", "-i", "players.html", "-r", "bpdd_defend", "-r", "gkd_defend", "-s",
        ])
        .unwrap();

        match cli.command {
            Command::Top { roles, save, out_dir, division, .. } => {
                assert_eq!(roles, vec!["bpdd_defend", "gkd_defend"]);
                assert!(save);
                assert_eq!(out_dir, PathBuf::from("exports"));
                assert_eq!(division, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
