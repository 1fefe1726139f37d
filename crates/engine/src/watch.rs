// crates/engine/src/watch.rs
use crate::config::{Config, SyncOptions, WatchOptions};
use crate::error::{EngineError, Result};
use crate::event::{SyncEvent, Trigger};
use crate::filesystem::{self, ScriptMatcher};
use crate::ledger::CopyLedger;
use crate::sync::sync_once;
use crossbeam_channel::RecvTimeoutError;
use log::{debug, info, warn};
use notify::event::{AccessKind, AccessMode, CreateKind};
use notify::{EventKind, RecursiveMode, Watcher};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

/// Turns change notifications into copies, one file at a time.
///
/// Each matching path goes through the debounce and staleness filters of
/// the [`CopyLedger`], waits for the settle delay and is copied. Copy
/// failures are reported as [`SyncEvent::Failed`] and otherwise dropped;
/// the next change to the file retries.
pub struct ChangeHandler<'a> {
    sync: &'a SyncOptions,
    watch: WatchOptions,
    matcher: ScriptMatcher,
    ledger: &'a CopyLedger,
}

impl<'a> ChangeHandler<'a> {
    /// # Errors
    /// Returns an error if the configured pattern is not a valid glob.
    pub fn new(
        sync: &'a SyncOptions,
        watch: WatchOptions,
        ledger: &'a CopyLedger,
    ) -> Result<Self> {
        Ok(Self {
            sync,
            watch,
            matcher: ScriptMatcher::new(&sync.pattern)?,
            ledger,
        })
    }

    pub fn handle<F>(&self, event: &notify::Event, on_event: &mut F)
    where
        F: FnMut(&SyncEvent),
    {
        if !is_relevant(event.kind) {
            return;
        }
        for path in &event.paths {
            if let Some(outcome) = self.handle_path(path) {
                on_event(&outcome);
            }
        }
    }

    /// Process a single changed path. Returns `None` for paths that are
    /// not scripts (non-matching names, directories, files already gone).
    pub fn handle_path(&self, path: &Path) -> Option<SyncEvent> {
        if !self.matcher.matches(path) {
            return None;
        }
        let file_name = path.file_name()?;
        let name = file_name.to_string_lossy().into_owned();

        let meta = match fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta,
            Ok(_) => return None,
            Err(e) => {
                debug!("ignoring change to {name}: {e}");
                return None;
            }
        };
        let modified = meta.modified().ok()?;

        let now = Instant::now();
        if let Some(reason) = self.ledger.check(&name, modified, now, self.watch.debounce) {
            debug!("dropped change to {name}: {reason:?}");
            return Some(SyncEvent::Suppressed { file: name, reason });
        }

        thread::sleep(self.watch.settle);

        let dest = self.sync.dest_dir.join(file_name);
        let copied = filesystem::ensure_dir(&self.sync.dest_dir)
            .and_then(|()| filesystem::copy_preserving(path, &dest));
        match copied {
            Ok(copied_mtime) => {
                self.ledger.record(&name, copied_mtime, Instant::now());
                info!("copied modified file {name}");
                Some(SyncEvent::Copied {
                    file: name,
                    trigger: Trigger::Change,
                })
            }
            Err(e) => {
                warn!("failed to copy {name}: {e}");
                Some(SyncEvent::Failed {
                    file: name,
                    error: e.to_string(),
                })
            }
        }
    }
}

/// Sync once, then watch the source directory and copy changed scripts
/// until `shutdown` is set.
///
/// The initial pass uses `config.sync.force`. Every per-file outcome, from
/// both the initial pass and the watcher, goes to `on_event`.
///
/// # Errors
///
/// Returns an error if the initial pass cannot enumerate the source, the
/// destination cannot be created, or the watcher cannot be set up.
pub fn watch_loop<F>(config: &Config, shutdown: &AtomicBool, mut on_event: F) -> Result<()>
where
    F: FnMut(&SyncEvent),
{
    let ledger = CopyLedger::new();
    let handler = ChangeHandler::new(&config.sync, config.watch, &ledger)?;

    sync_once(&config.sync, &mut on_event)?;

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let _ = tx.send(res);
    })?;
    watcher.watch(&config.sync.source_dir, RecursiveMode::NonRecursive)?;
    info!(
        "watching {} for changes to '{}'",
        config.sync.source_dir.display(),
        config.sync.pattern
    );

    while !shutdown.load(Ordering::SeqCst) {
        match rx.recv_timeout(config.watch.poll_interval) {
            Ok(Ok(event)) => handler.handle(&event, &mut on_event),
            Ok(Err(err)) => warn!("watcher error: {err}"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                return Err(EngineError::Watch(notify::Error::generic(
                    "event channel closed",
                )));
            }
        }
    }

    debug!("shutdown requested, releasing watcher ({} file(s) tracked)", ledger.len());
    drop(watcher);
    Ok(())
}

const fn is_relevant(kind: EventKind) -> bool {
    matches!(
        kind,
        EventKind::Any
            | EventKind::Create(CreateKind::File | CreateKind::Any)
            | EventKind::Modify(_)
            | EventKind::Access(AccessKind::Close(AccessMode::Write))
    )
}
