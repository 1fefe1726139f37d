use serde::Serialize;

/// What caused a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// The one-shot pass over the source directory.
    Initial,
    /// A change notification from the watcher.
    Change,
}

/// Why the watcher dropped a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// A copy of the same file finished within the debounce interval.
    Debounced,
    /// The source mtime is not newer than the last copied one.
    Unchanged,
}

/// Per-file outcome reported to the caller as it happens.
///
/// Failures are delivered here instead of being dropped, so callers decide
/// whether to print, collect or ignore them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SyncEvent {
    Copied { file: String, trigger: Trigger },
    Skipped { file: String },
    Suppressed { file: String, reason: SuppressReason },
    Failed { file: String, error: String },
}

impl SyncEvent {
    pub fn file(&self) -> &str {
        match self {
            Self::Copied { file, .. }
            | Self::Skipped { file }
            | Self::Suppressed { file, .. }
            | Self::Failed { file, .. } => file,
        }
    }

    pub const fn action(&self) -> &'static str {
        match self {
            Self::Copied { .. } => "copied",
            Self::Skipped { .. } => "skipped",
            Self::Suppressed { .. } => "suppressed",
            Self::Failed { .. } => "failed",
        }
    }
}
