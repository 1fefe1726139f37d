// crates/cli/src/config.rs
use crate::args::Args;
use crate::error::{AppError, Result};
use crate::options::OutputFormat;
pub use script_sync_engine::config::{
    Config, ConfigBuilder, SyncOptions, SyncOptionsBuilder, WatchOptions, WatchOptionsBuilder,
};
use script_sync_engine::platform::{DestinationResolver, resolve_destination};

/// Everything `main` needs: the engine configuration plus CLI-only choices.
#[derive(Debug, Clone)]
pub struct Settings {
    pub engine: Config,
    pub watch: bool,
    pub format: OutputFormat,
    pub verbose: u8,
}

impl Settings {
    /// Convert parsed arguments, resolving the destination through `resolver`
    /// when `--dest` is not given.
    ///
    /// # Errors
    /// Returns an error if no destination can be determined or the poll
    /// interval is zero.
    pub fn from_args(args: &Args, resolver: &dyn DestinationResolver) -> Result<Self> {
        let dest_dir = resolve_destination(args.dest.clone(), resolver)?;

        // Watch mode always starts from a full copy.
        let sync = SyncOptionsBuilder::default()
            .source_dir(args.source.clone())
            .dest_dir(dest_dir)
            .pattern(args.pattern.clone())
            .force(args.force || args.watch)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        // A zero timeout would turn the watch loop into a busy spin.
        if args.poll_interval.0.is_zero() {
            return Err(AppError::Config(
                "--poll-interval must be greater than zero".to_string(),
            ));
        }

        let watch = WatchOptionsBuilder::default()
            .debounce(args.debounce)
            .settle(args.settle)
            .poll_interval(args.poll_interval)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let engine = ConfigBuilder::default()
            .sync(sync)
            .watch(watch)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            engine,
            watch: args.watch,
            format: args.format,
            verbose: if args.quiet { 0 } else { args.verbose },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use script_sync_engine::error::EngineError;
    use script_sync_engine::platform::FixedResolver;
    use std::path::PathBuf;
    use std::time::Duration;

    struct Nowhere;

    impl DestinationResolver for Nowhere {
        fn resolve(&self) -> Option<PathBuf> {
            None
        }
    }

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("script_sync").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn uses_resolver_without_dest() {
        let args = parse(&["--source", "scripts"]);
        let settings = Settings::from_args(&args, &FixedResolver(PathBuf::from("/aseprite"))).unwrap();

        assert_eq!(settings.engine.sync.source_dir, PathBuf::from("scripts"));
        assert_eq!(settings.engine.sync.dest_dir, PathBuf::from("/aseprite"));
        assert!(!settings.engine.sync.force);
        assert!(!settings.watch);
    }

    #[test]
    fn explicit_dest_overrides_resolver() {
        let args = parse(&["--dest", "/elsewhere", "--force"]);
        let settings = Settings::from_args(&args, &Nowhere).unwrap();

        assert_eq!(settings.engine.sync.dest_dir, PathBuf::from("/elsewhere"));
        assert!(settings.engine.sync.force);
    }

    #[test]
    fn watch_forces_initial_copy_and_carries_timings() {
        let args = parse(&["--dest", "/d", "--watch", "--debounce", "750ms", "--settle", "0"]);
        let settings = Settings::from_args(&args, &Nowhere).unwrap();

        assert!(settings.watch);
        assert!(settings.engine.sync.force);
        assert_eq!(settings.engine.watch.debounce, Duration::from_millis(750));
        assert_eq!(settings.engine.watch.settle, Duration::ZERO);
        assert_eq!(settings.engine.watch.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let args = parse(&["--dest", "/d", "--watch", "--poll-interval", "0ms"]);
        let err = Settings::from_args(&args, &Nowhere).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let args = parse(&["--dest", "/d", "--watch", "--poll-interval", "1ms"]);
        assert!(Settings::from_args(&args, &Nowhere).is_ok());
    }

    #[test]
    fn missing_destination_is_an_error() {
        let args = parse(&[]);
        let err = Settings::from_args(&args, &Nowhere).unwrap_err();
        assert!(matches!(err, AppError::Engine(EngineError::NoDestination)));
    }
}
