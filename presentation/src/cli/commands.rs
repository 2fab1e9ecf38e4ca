//! CLI command definitions

use arena_domain::{Difficulty, Topic};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the debate result
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Transcript followed by the verdict
    Full,
    /// Only the verdict
    Verdict,
    /// JSON document with the session and the verdict
    Json,
}

impl From<OutputFormat> for arena_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => arena_domain::OutputFormat::Full,
            OutputFormat::Verdict => arena_domain::OutputFormat::Verdict,
            OutputFormat::Json => arena_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for debate-arena
#[derive(Parser, Debug)]
#[command(name = "debate-arena")]
#[command(author, version, about = "Debate a language model, then let another one judge")]
#[command(long_about = r#"
Debate Arena pits you against an AI opponent on one of eight fixed motions.

A debate has three steps:
1. Setup: pick your name, a topic and a difficulty
2. Rounds: you make a statement, the AI rebuts it (5 rounds by default)
3. Result: a judge model scores both sides and names a winner (/result)

Configuration files are loaded from (in priority order):
1. DEBATE_ARENA_* environment variables (e.g. DEBATE_ARENA_MODELS__JUDGE)
2. --config <path>          Explicit config file
3. ./debate-arena.toml      Project-level config
4. ~/.config/debate-arena/config.toml   Global config

Example:
  debate-arena
  debate-arena --name Ada --topic 5 --difficulty hard
  debate-arena --opponent gpt-4o-mini --output full
"#)]
pub struct Cli {
    /// Participant name (prompted for when omitted)
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Topic, by its number (1-8) or its exact text
    #[arg(short, long, value_name = "TOPIC")]
    pub topic: Option<Topic>,

    /// Difficulty: easy, medium or hard
    #[arg(short, long, value_name = "LEVEL")]
    pub difficulty: Option<Difficulty>,

    /// Model the participant debates against
    #[arg(long, value_name = "MODEL")]
    pub opponent: Option<String>,

    /// Model that judges the finished debate
    #[arg(long, value_name = "MODEL")]
    pub judge: Option<String>,

    /// Output format of the result (defaults to the config, then "verdict")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write diagnostic logs to a daily rotated file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["debate-arena"]).unwrap();
        assert!(cli.name.is_none());
        assert!(cli.topic.is_none());
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_setup_flags() {
        let cli = Cli::try_parse_from([
            "debate-arena",
            "--name",
            "Ada",
            "--topic",
            "5",
            "--difficulty",
            "hard",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.name.as_deref(), Some("Ada"));
        assert_eq!(cli.topic, Some(Topic::RecreationalDrugs));
        assert_eq!(cli.difficulty, Some(Difficulty::Hard));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_topic_is_rejected() {
        assert!(Cli::try_parse_from(["debate-arena", "--topic", "9"]).is_err());
    }

    #[test]
    fn test_output_maps_to_domain_format() {
        let cli = Cli::try_parse_from(["debate-arena", "-o", "json"]).unwrap();
        let format: arena_domain::OutputFormat = cli.output.unwrap().into();
        assert_eq!(format, arena_domain::OutputFormat::Json);
    }
}
