use derive_builder::Builder;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PATTERN: &str = "*.lua";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(200);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Where scripts come from, where they go, and which of them to copy.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct SyncOptions {
    #[builder(default = "PathBuf::from(\".\")")]
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    /// Glob matched against the file name only.
    #[builder(default = "DEFAULT_PATTERN.to_string()")]
    pub pattern: String,
    /// Copy every matching file regardless of timestamps.
    #[builder(default)]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, Builder)]
#[builder(setter(into))]
pub struct WatchOptions {
    /// Events arriving this soon after a completed copy of the same file are dropped.
    #[builder(default = "DEFAULT_DEBOUNCE")]
    pub debounce: Duration,
    /// Pause before copying so the writer can finish flushing.
    #[builder(default = "DEFAULT_SETTLE")]
    pub settle: Duration,
    /// How often the event loop wakes up to check for shutdown.
    #[builder(default = "DEFAULT_POLL_INTERVAL")]
    pub poll_interval: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            settle: DEFAULT_SETTLE,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    pub sync: SyncOptions,
    #[builder(default)]
    pub watch: WatchOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_options_defaults() {
        let opts = SyncOptionsBuilder::default()
            .dest_dir("/tmp/scripts")
            .build()
            .unwrap();

        assert_eq!(opts.source_dir, PathBuf::from("."));
        assert_eq!(opts.pattern, "*.lua");
        assert!(!opts.force);
    }

    #[test]
    fn sync_options_require_destination() {
        assert!(SyncOptionsBuilder::default().build().is_err());
    }

    #[test]
    fn watch_options_defaults_match_builder() {
        let built = WatchOptionsBuilder::default().build().unwrap();
        let default = WatchOptions::default();

        assert_eq!(built.debounce, default.debounce);
        assert_eq!(built.settle, default.settle);
        assert_eq!(built.poll_interval, default.poll_interval);
        assert_eq!(default.debounce, Duration::from_millis(500));
        assert_eq!(default.settle, Duration::from_millis(200));
    }
}
