//! Configuration file loading for debate-arena
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed `DEBATE_ARENA_`
//! 2. `--config <path>` specified file
//! 3. Project root: `./debate-arena.toml` or `./.debate-arena.toml`
//! 4. Global: `$XDG_CONFIG_HOME/debate-arena/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDebateConfig, FileEvaluationConfig,
    FileLoggingConfig, FileModelsConfig, FileOpenAiConfig, FileOutputConfig,
    FileProvidersConfig, FileReplConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
