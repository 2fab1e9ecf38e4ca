//! CLI entrypoint for debate-arena
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use arena_application::{
    ConversationLogger, EvaluateDebateUseCase, NoConversationLogger, PlayRoundUseCase,
};
use arena_domain::Model;
use arena_infrastructure::{ConfigLoader, JsonlConversationLogger, OpenAiCompatibleGateway};
use arena_presentation::{Cli, DebateRepl, OutputConfig, ReplConfig, SetupPreset};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber. The returned guard flushes the log file
/// and must live until the end of `main`.
fn init_logging(cli: &Cli) -> Option<WorkerGuard> {
    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "debate-arena.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            None
        }
    }
}

fn parse_model(flag: &str, name: &str) -> Result<Model> {
    let name = name.trim();
    if name.is_empty() {
        bail!("{} needs a model name", flag);
    }
    Ok(Model::from(name))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli);

    if cli.show_config {
        println!("Configuration sources (highest priority first):");
        for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    info!("Starting Debate Arena");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    for issue in config.check()? {
        warn!("{}", issue.message);
        eprintln!("Config warning: {}", issue.message);
    }

    let mut models = config.models.to_model_config();
    if let Some(name) = &cli.opponent {
        models = models.with_opponent(parse_model("--opponent", name)?);
    }
    if let Some(name) = &cli.judge {
        models = models.with_judge(parse_model("--judge", name)?);
    }
    info!("Opponent: {}, judge: {}", models.opponent, models.judge);

    // === Dependency Injection ===
    let openai = &config.providers.openai;
    let Some(api_key) = openai.resolve_api_key() else {
        bail!(
            "No API key found. Set the {} environment variable or providers.openai.api_key.",
            openai.api_key_env
        );
    };
    let gateway = Arc::new(OpenAiCompatibleGateway::from_config(openai, api_key)?);

    let conversation_logger: Arc<dyn ConversationLogger> = match config
        .logging
        .conversation_log_path()
        .and_then(|path| JsonlConversationLogger::try_open(path))
    {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    };

    let play_round = PlayRoundUseCase::new(gateway.clone(), models.clone())
        .with_conversation_logger(conversation_logger.clone());
    let evaluate = EvaluateDebateUseCase::new(
        gateway,
        models.clone(),
        config.evaluation.to_evaluation_params(),
    )
    .with_conversation_logger(conversation_logger);

    let output = OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color && !cli.no_color,
    };
    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.repl.history_path(),
    };
    let preset = SetupPreset {
        name: cli.name.clone(),
        topic: cli.topic,
        difficulty: cli.difficulty,
    };

    DebateRepl::new(play_round, evaluate, models)
        .with_rules(config.debate.to_rules())
        .with_config(repl_config)
        .with_output(output)
        .with_preset(preset)
        .run()
        .await?;

    Ok(())
}
