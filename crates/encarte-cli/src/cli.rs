use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "encarte")]
#[command(about = "Maintenance utilities for the encarte product list", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "ENCARTE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rename known duplicate product names and overwrite the spreadsheet
    Dedupe {
        /// Spreadsheet to correct (default from config: produtos.xlsx)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Sheet name (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Header of the product name column (default from config: nome)
        #[arg(long)]
        column: Option<String>,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Copy the file aside before overwriting it
        #[arg(long)]
        backup: bool,
    },

    /// Print the columns and first rows of spreadsheet files
    Inspect {
        /// Files to inspect (default from config: exemplo.xlsx produtos.xlsx)
        files: Vec<PathBuf>,

        /// Number of rows to show
        #[arg(long, short = 'n')]
        rows: Option<usize>,

        /// Sheet name (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Replace secret-looking strings in a file or stdin
    Redact {
        /// File to redact (stdin when omitted)
        path: Option<PathBuf>,

        /// Overwrite the file instead of printing the result
        #[arg(long, requires = "path")]
        in_place: bool,
    },

    /// Rewrite git history with git-filter-repo, redacting secrets from every blob
    ScrubHistory {
        /// Repository to rewrite
        #[arg(long, default_value = ".")]
        repo: PathBuf,

        /// Do not pass --force to git-filter-repo
        #[arg(long)]
        no_force: bool,

        /// Also redact commit messages
        #[arg(long)]
        messages: bool,

        /// Print the expressions file and command without running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the effective configuration
    Show,
}
