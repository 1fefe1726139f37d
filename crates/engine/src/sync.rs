use crate::config::SyncOptions;
use crate::error::{EngineError, Result};
use crate::event::{SyncEvent, Trigger};
use crate::filesystem::{self, ScriptMatcher, SourceFile};
use log::{debug, info, warn};
use std::path::Path;

/// Outcome of one pass over the source directory.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub copied: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<(String, EngineError)>,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.copied.len() + self.skipped.len() + self.errors.len()
    }
}

/// Copy every matching script from the source to the destination directory.
///
/// Per-file failures are collected in [`SyncReport::errors`] and reported
/// through `on_event`; the pass always continues with the next file.
///
/// # Errors
///
/// Returns an error only if the pattern is invalid, the destination cannot
/// be created, or the source directory cannot be enumerated.
pub fn sync_once<F>(options: &SyncOptions, mut on_event: F) -> Result<SyncReport>
where
    F: FnMut(&SyncEvent),
{
    let matcher = ScriptMatcher::new(&options.pattern)?;
    let files = filesystem::list_scripts(&options.source_dir, &matcher)?;
    filesystem::ensure_dir(&options.dest_dir)?;
    debug!(
        "found {} script(s) matching '{}' in {}",
        files.len(),
        options.pattern,
        options.source_dir.display()
    );

    let mut report = SyncReport::default();
    for file in files {
        let event = match sync_file(&file, &options.dest_dir, options.force) {
            Ok(true) => {
                info!("copied {}", file.name);
                report.copied.push(file.name.clone());
                SyncEvent::Copied {
                    file: file.name,
                    trigger: Trigger::Initial,
                }
            }
            Ok(false) => {
                debug!("skipped {}: destination is same age or newer", file.name);
                report.skipped.push(file.name.clone());
                SyncEvent::Skipped { file: file.name }
            }
            Err(e) => {
                warn!("failed to copy {}: {e}", file.name);
                let event = SyncEvent::Failed {
                    file: file.name.clone(),
                    error: e.to_string(),
                };
                report.errors.push((file.name, e));
                event
            }
        };
        on_event(&event);
    }

    Ok(report)
}

/// Returns `true` if the file was copied.
fn sync_file(file: &SourceFile, dest_dir: &Path, force: bool) -> Result<bool> {
    let dest = dest_dir.join(&file.file_name);
    if !filesystem::needs_copy(file.modified, &dest, force)? {
        return Ok(false);
    }
    filesystem::copy_preserving(&file.path, &dest)?;
    Ok(true)
}
