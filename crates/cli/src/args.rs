// crates/cli/src/args.rs
use crate::options::OutputFormat;
use crate::parsers::DurationArg;
use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "script_sync",
    version = crate::VERSION,
    about = "Copy Lua scripts into the Aseprite scripts folder",
    long_about = "Copy scripts matching a pattern from a working directory into the \
                  Aseprite scripts folder. By default only missing or outdated files are \
                  copied; --watch copies everything once and then keeps copying changes \
                  until interrupted with Ctrl+C."
)]
pub struct Args {
    /// Directory containing the scripts
    #[arg(
        long,
        short = 's',
        env = "SCRIPT_SYNC_SOURCE",
        default_value = ".",
        value_hint = ValueHint::DirPath,
        help_heading = "Paths"
    )]
    pub source: PathBuf,

    /// Destination directory [default: the platform's Aseprite scripts folder]
    #[arg(
        long,
        short = 'd',
        env = "SCRIPT_SYNC_DEST",
        value_hint = ValueHint::DirPath,
        help_heading = "Paths"
    )]
    pub dest: Option<PathBuf>,

    /// File name pattern to copy
    #[arg(long, short = 'p', default_value = "*.lua", help_heading = "Paths")]
    pub pattern: String,

    /// Copy every file regardless of timestamps
    #[arg(long, short = 'f', conflicts_with = "watch", help_heading = "Sync")]
    pub force: bool,

    /// Copy everything, then keep copying changed files until Ctrl+C
    #[arg(long, short = 'w', help_heading = "Watch")]
    pub watch: bool,

    /// Ignore further changes to a file for this long after copying it (e.g. 500ms, 1s)
    #[arg(long, default_value = "500ms", requires = "watch", help_heading = "Watch")]
    pub debounce: DurationArg,

    /// Wait this long after a change before copying
    #[arg(long, default_value = "200ms", requires = "watch", help_heading = "Watch")]
    pub settle: DurationArg,

    /// How often the watcher checks for Ctrl+C
    #[arg(long, default_value = "250ms", requires = "watch", help_heading = "Watch")]
    pub poll_interval: DurationArg,

    /// Output format
    #[arg(long, value_enum, default_value = "text", help_heading = "Output")]
    pub format: OutputFormat,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, help_heading = "Output")]
    pub verbose: u8,

    /// Only report errors
    #[arg(long, short = 'q', conflicts_with = "verbose", help_heading = "Output")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::time::Duration;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["script_sync"]).unwrap();

        assert_eq!(args.source, PathBuf::from("."));
        assert_eq!(args.pattern, "*.lua");
        assert!(!args.force);
        assert!(!args.watch);
        assert_eq!(args.debounce.0, Duration::from_millis(500));
        assert_eq!(args.settle.0, Duration::from_millis(200));
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn watch_timings() {
        let args = Args::try_parse_from([
            "script_sync",
            "--watch",
            "--debounce",
            "1s",
            "--settle",
            "50ms",
        ])
        .unwrap();

        assert!(args.watch);
        assert_eq!(args.debounce.0, Duration::from_secs(1));
        assert_eq!(args.settle.0, Duration::from_millis(50));
    }

    #[test]
    fn force_conflicts_with_watch() {
        assert!(Args::try_parse_from(["script_sync", "--force", "--watch"]).is_err());
    }

    #[test]
    fn timings_require_watch() {
        assert!(Args::try_parse_from(["script_sync", "--debounce", "1s"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let args = Args::try_parse_from(["script_sync", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(Args::try_parse_from(["script_sync", "-v", "-q"]).is_err());
    }
}
