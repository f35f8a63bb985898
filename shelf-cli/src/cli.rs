//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Shelf -- page through library collections the way the reader UI does.
///
/// Use `shelf <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "shelf", version, about, long_about = None)]
pub struct Cli {
    /// Path to the shelf.toml configuration file.
    #[arg(short, long, default_value = "shelf.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Page through a JSON fixture with the infinite scroll state manager.
    Browse(BrowseArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- browse ----

/// Load pages from a fixture file and print the rendered entries.
#[derive(Args, Debug, Clone)]
pub struct BrowseArgs {
    /// JSON file holding an array of records, pre-sorted by the group field.
    pub fixture: PathBuf,

    /// Backend collection the fixture stands in for ([backend].*_path).
    #[arg(long, value_enum, default_value = "books")]
    pub collection: Collection,

    /// Insert letter separators grouped by this record field.
    #[arg(long, conflicts_with = "no_groups")]
    pub group_by: Option<String>,

    /// Disable letter separators even if enabled in the configuration.
    #[arg(long)]
    pub no_groups: bool,

    /// Items per page (overrides [pagination].page_size).
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Number of pages to load, including the first one.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Keep loading until the last page.
    #[arg(long, conflicts_with = "pages")]
    pub all: bool,

    /// Make the first fetch after the initial page fail with this HTTP status
    /// (0 simulates an unreachable backend).
    #[arg(long)]
    pub fail_status: Option<u16>,
}

/// Library collections served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Collection {
    /// [backend].books_path
    Books,
    /// [backend].series_path
    Series,
    /// [backend].authors_path
    Authors,
}

// ---- config ----

/// Manage shelf configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, pagination, backend).
        #[arg(long)]
        section: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_browse_defaults() {
        let cli = Cli::try_parse_from(["shelf", "browse", "books.json"]).expect("should parse");
        match cli.command {
            Commands::Browse(args) => {
                assert_eq!(args.fixture, PathBuf::from("books.json"));
                assert_eq!(args.pages, 1);
                assert!(!args.all);
                assert!(!args.no_groups);
                assert!(args.group_by.is_none());
                assert!(args.page_size.is_none());
                assert!(args.fail_status.is_none());
                assert_eq!(args.collection, Collection::Books);
            }
            _ => panic!("expected Browse command"),
        }
    }

    #[test]
    fn test_cli_parse_browse_all_options() {
        let cli = Cli::try_parse_from([
            "shelf",
            "browse",
            "demos/books.json",
            "--group-by",
            "name",
            "--page-size",
            "5",
            "--pages",
            "3",
            "--fail-status",
            "503",
        ])
        .expect("should parse");
        match cli.command {
            Commands::Browse(args) => {
                assert_eq!(args.group_by.as_deref(), Some("name"));
                assert_eq!(args.page_size, Some(5));
                assert_eq!(args.pages, 3);
                assert_eq!(args.fail_status, Some(503));
            }
            _ => panic!("expected Browse command"),
        }
    }

    #[test]
    fn test_cli_parse_browse_collection() {
        let cli = Cli::try_parse_from(["shelf", "browse", "s.json", "--collection", "series"])
            .expect("should parse");
        match cli.command {
            Commands::Browse(args) => assert_eq!(args.collection, Collection::Series),
            _ => panic!("expected Browse command"),
        }

        let bad = Cli::try_parse_from(["shelf", "browse", "s.json", "--collection", "shelves"]);
        assert!(bad.is_err(), "unknown collection must be rejected");
    }

    #[test]
    fn test_cli_parse_browse_all_conflicts_with_pages() {
        let args = Cli::try_parse_from(["shelf", "browse", "b.json", "--all", "--pages", "2"]);
        assert!(args.is_err(), "--all and --pages are mutually exclusive");
    }

    #[test]
    fn test_cli_parse_browse_group_by_conflicts_with_no_groups() {
        let args =
            Cli::try_parse_from(["shelf", "browse", "b.json", "--group-by", "name", "--no-groups"]);
        assert!(args.is_err(), "--group-by and --no-groups are mutually exclusive");
    }

    #[test]
    fn test_cli_parse_browse_zero_pages_fails() {
        let args = Cli::try_parse_from(["shelf", "browse", "b.json", "--pages", "0"]);
        assert!(args.is_err(), "at least one page must be requested");
    }

    #[test]
    fn test_cli_parse_browse_requires_fixture() {
        let args = Cli::try_parse_from(["shelf", "browse"]);
        assert!(args.is_err(), "fixture path is required");
    }

    #[test]
    fn test_cli_parse_config_show_section() {
        let cli = Cli::try_parse_from(["shelf", "config", "show", "--section", "pagination"])
            .expect("should parse");
        match cli.command {
            Commands::Config(config_args) => match config_args.action {
                ConfigAction::Show { section } => {
                    assert_eq!(section.as_deref(), Some("pagination"));
                }
                ConfigAction::Validate => panic!("expected Show action"),
            },
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_config_validate() {
        let cli = Cli::try_parse_from(["shelf", "config", "validate"]).expect("should parse");
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs {
                action: ConfigAction::Validate
            })
        ));
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "shelf",
            "-c",
            "/etc/shelf.toml",
            "--log-level",
            "debug",
            "--output",
            "json",
            "config",
            "validate",
        ])
        .expect("should parse");
        assert_eq!(cli.config, PathBuf::from("/etc/shelf.toml"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.output, OutputFormat::Json));
    }

    #[test]
    fn test_cli_parse_default_config_path() {
        let cli = Cli::try_parse_from(["shelf", "config", "show"]).expect("should parse");
        assert_eq!(cli.config, PathBuf::from("shelf.toml"));
        assert!(matches!(cli.output, OutputFormat::Text));
    }

    #[test]
    fn test_cli_parse_missing_command_fails() {
        assert!(Cli::try_parse_from(["shelf"]).is_err());
    }

    #[test]
    fn test_cli_verify_command_structure() {
        let cmd = Cli::command();
        cmd.clone().debug_assert();
        assert_eq!(cmd.get_name(), "shelf");

        let subcommands: Vec<_> = cmd.get_subcommands().map(|s| s.get_name()).collect();
        assert!(subcommands.contains(&"browse"), "should have 'browse' subcommand");
        assert!(subcommands.contains(&"config"), "should have 'config' subcommand");
    }
}
