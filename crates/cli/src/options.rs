use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How progress lines are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `[HH:MM:SS] action file` lines for humans
    #[default]
    Text,
    /// One JSON object per line
    Jsonl,
}
