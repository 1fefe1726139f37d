use clap::Parser;
use script_sync_cli::args::Args;
use script_sync_cli::config::Settings;
use script_sync_cli::error::Result;
use script_sync_cli::logging;
use script_sync_cli::presentation::Printer;
use script_sync_engine::platform::AsepriteScriptsResolver;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(args.verbose, args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = Settings::from_args(args, &AsepriteScriptsResolver)?;
    let printer = Printer::new(settings.format, settings.verbose > 0);
    let sync = &settings.engine.sync;

    if settings.watch {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

        printer.watching(&sync.source_dir, &sync.dest_dir);
        script_sync_engine::watch::watch_loop(&settings.engine, &shutdown, |event| {
            printer.event(event);
        })?;
        printer.stopped();
    } else {
        // Per-file failures are already reported as events and never fail the run.
        let report = script_sync_engine::sync_once(sync, |event| printer.event(event))?;
        printer.summary(&report);
    }

    Ok(())
}
