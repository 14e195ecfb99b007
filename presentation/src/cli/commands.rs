//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the resolved turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable reply
    Text,
    /// JSON object (`reply` or `error`)
    Json,
}

/// CLI arguments for assistant-dispatch
#[derive(Parser, Debug)]
#[command(name = "assistant-dispatch")]
#[command(author, version, about = "Resolve one assistant turn against a business task catalog")]
#[command(long_about = r#"
assistant-dispatch compiles a task catalog into callable tools, sends one
turn to the model and prints the resolved reply: text, a function call,
or both.

Configuration files are loaded from (in priority order):
1. DISPATCH_* environment variables (e.g. DISPATCH_RESOLVER__MODEL)
2. --config <path>       Explicit config file
3. ./dispatch.toml       Project-level config
4. ~/.config/assistant-dispatch/config.toml   Global config

Example:
  assistant-dispatch --catalog tasks.toml "Quiero una cita para mañana"
  assistant-dispatch --catalog tasks.toml --history turns.json -o json "Sí, confirmo"
  assistant-dispatch --catalog tasks.toml --fixture response.json "Hola"
  assistant-dispatch --catalog tasks.toml --schema-only
"#)]
pub struct Cli {
    /// The user's new message (not required with --schema-only)
    pub message: Option<String>,

    /// Task catalog file (.toml or .json)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Prior conversation turns (.json or .toml)
    #[arg(long, value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Replay a recorded Gemini response instead of calling the API
    #[arg(long, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    /// Print the compiled tool schema and exit
    #[arg(long)]
    pub schema_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the merged config, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_turn() {
        let cli = Cli::try_parse_from([
            "assistant-dispatch",
            "--catalog",
            "tasks.toml",
            "--history",
            "turns.json",
            "-o",
            "json",
            "-vv",
            "Quiero una cita",
        ])
        .unwrap();

        assert_eq!(cli.message.as_deref(), Some("Quiero una cita"));
        assert_eq!(cli.catalog, Some(PathBuf::from("tasks.toml")));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.schema_only);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["assistant-dispatch", "--schema-only"]).unwrap();
        assert!(cli.message.is_none());
        assert!(cli.schema_only);
        assert_eq!(cli.output, OutputFormat::Text);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_unknown_output_rejected() {
        assert!(Cli::try_parse_from(["assistant-dispatch", "-o", "yaml", "Hola"]).is_err());
    }
}
