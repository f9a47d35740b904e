//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::render::RenderMode;

/// Surat Desa - letter template engine
#[derive(Parser)]
#[command(
    name = "sd",
    about = "Render and print village administration letters from templates",
    version = env!("CARGO_PKG_VERSION"),
    after_help = generate_after_help(),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Settings YAML overriding the config file's settings section
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Letter date (YYYY-MM-DD) instead of today
    #[arg(short, long, global = true, value_name = "DATE")]
    pub date: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List document types
    Tags,

    /// List template variables
    Vars {
        /// Document type tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Filter by category (identity, applicant, document)
        #[arg(short = 'k', long)]
        category: Option<String>,
    },

    /// Print the variable dictionary for a record as JSON
    Map {
        /// Document type tag
        tag: String,

        /// Record JSON file
        record: PathBuf,
    },

    /// Render a record into its template
    Render {
        /// Document type tag
        tag: String,

        /// Record JSON file
        record: PathBuf,

        /// Render mode (preview, final)
        #[arg(short, long, default_value = "preview")]
        mode: RenderMode,

        /// Template file instead of the default for the tag
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render in final mode and send to the printer
    Print {
        /// Document type tag
        tag: String,

        /// Record JSON file
        record: PathBuf,

        /// Template file instead of the default for the tag
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Print even if variables are left unresolved
        #[arg(long)]
        allow_unresolved: bool,
    },

    /// List templates available through the loader chain
    Templates,

    /// Check the variable registry against the dispatcher
    Check,
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("suratdesa")
        .join("logs")
        .join("suratdesa.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// The after_help text
pub fn generate_after_help() -> String {
    format!("Logs are written to: {}\n", get_log_path().display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_tags() {
        let cli = Cli::parse_from(["sd", "tags"]);
        assert!(matches!(cli.command, Command::Tags));
    }

    #[test]
    fn test_cli_parse_render_defaults() {
        let cli = Cli::parse_from(["sd", "render", "surat-pengantar-skck", "rec.json"]);
        match cli.command {
            Command::Render {
                tag,
                record,
                mode,
                template,
                output,
            } => {
                assert_eq!(tag, "surat-pengantar-skck");
                assert_eq!(record, PathBuf::from("rec.json"));
                assert_eq!(mode, RenderMode::Preview);
                assert!(template.is_none());
                assert!(output.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_render_final_with_globals() {
        let cli = Cli::parse_from([
            "sd",
            "render",
            "surat-pengantar-skck",
            "rec.json",
            "--mode",
            "final",
            "--date",
            "2025-08-17",
            "-l",
            "debug",
        ]);
        assert_eq!(cli.date.as_deref(), Some("2025-08-17"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(
            cli.command,
            Command::Render {
                mode: RenderMode::Final,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_parse_print() {
        let cli = Cli::parse_from(["sd", "print", "surat-keterangan-usaha", "rec.json", "--allow-unresolved"]);
        assert!(matches!(
            cli.command,
            Command::Print {
                allow_unresolved: true,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["sd", "render", "t", "r.json", "--mode", "draft"]).is_err());
    }

    #[test]
    fn test_cli_parse_vars_filters() {
        let cli = Cli::parse_from(["sd", "vars", "--tag", "surat-pengantar-nikah", "-k", "applicant"]);
        match cli.command {
            Command::Vars { tag, category } => {
                assert_eq!(tag.as_deref(), Some("surat-pengantar-nikah"));
                assert_eq!(category.as_deref(), Some("applicant"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
