//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished debate is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Transcript followed by the verdict
    Full,
    /// Only the verdict (default)
    #[default]
    Verdict,
    /// JSON document with session metadata, transcript and verdict
    Json,
}
