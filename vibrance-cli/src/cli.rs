//! CLI argument parsing using clap

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::time::Duration;

/// What to fetch from the profile page
#[derive(Debug, Clone, Copy, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Personal details (ID, name, email, phone, college)
    User,
    /// Registered events
    Events,
    /// Merchandise orders
    Merchandise,
}

/// Output format for fetched records
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned plain-text table (default)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Vibrance profile scraper
///
/// The password is read from VIBRANCE_PASSWORD or prompted for; it is never
/// accepted as a command-line argument.
#[derive(Parser, Debug)]
#[command(
    name = "vibrance",
    about = "Fetch your Vibrance profile, events and merchandise",
    version
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Login name (prompted for if omitted)
    #[arg(short, long, env = "VIBRANCE_USERNAME", global = true)]
    pub username: Option<String>,

    /// Base URL of the Vibrance site
    #[arg(long, env = "VIBRANCE_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout, e.g. "30s" or "1m"
    #[arg(long, default_value = "30s", value_parser = humantime::parse_duration, global = true)]
    pub timeout: Duration,

    /// Output format: table or json
    #[arg(long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode - no table headers, only error logs
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events_with_options() {
        let args = Args::try_parse_from([
            "vibrance",
            "events",
            "--username",
            "21BCE1234",
            "--format",
            "json",
            "--timeout",
            "1m 30s",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.command, Command::Events);
        assert_eq!(args.username.as_deref(), Some("21BCE1234"));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.timeout, Duration::from_secs(90));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["vibrance", "merchandise"]).unwrap();
        assert_eq!(args.command, Command::Merchandise);
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.timeout, Duration::from_secs(30));
        assert!(!args.quiet);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["vibrance"]).is_err());
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        assert!(Args::try_parse_from(["vibrance", "user", "--timeout", "soon"]).is_err());
    }
}
