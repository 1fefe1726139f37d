// crates/cli/src/presentation.rs
use crate::options::OutputFormat;
use chrono::{DateTime, Local, SecondsFormat};
use script_sync_engine::SyncReport;
use script_sync_engine::event::{SuppressReason, SyncEvent, Trigger};
use serde::Serialize;
use std::path::Path;

/// Writes progress lines to stdout in the selected format.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    format: OutputFormat,
    show_suppressed: bool,
}

#[derive(Serialize)]
struct EventRecord<'a> {
    time: String,
    #[serde(flatten)]
    event: &'a SyncEvent,
}

#[derive(Serialize)]
struct SummaryRecord {
    time: String,
    action: &'static str,
    copied: usize,
    skipped: usize,
    failed: usize,
}

impl Printer {
    /// Dropped duplicate notifications are only shown in text mode when
    /// `verbose` is set; JSON lines always include them.
    pub const fn new(format: OutputFormat, verbose: bool) -> Self {
        Self {
            format,
            show_suppressed: verbose,
        }
    }

    pub fn event(&self, event: &SyncEvent) {
        let now = Local::now();
        match self.format {
            OutputFormat::Text => {
                if matches!(event, SyncEvent::Suppressed { .. }) && !self.show_suppressed {
                    return;
                }
                println!("{}", format_event_line(event, now));
            }
            OutputFormat::Jsonl => match event_json(event, now) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("Error serializing event: {e}"),
            },
        }
    }

    pub fn summary(&self, report: &SyncReport) {
        let now = Local::now();
        match self.format {
            OutputFormat::Text => println!("{}", format_summary(report)),
            OutputFormat::Jsonl => match summary_json(report, now) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("Error serializing summary: {e}"),
            },
        }
    }

    pub fn watching(&self, source: &Path, dest: &Path) {
        if matches!(self.format, OutputFormat::Text) {
            println!(
                "Watching for changes in {} -> {} (press Ctrl+C to stop)",
                source.display(),
                dest.display()
            );
        }
    }

    pub fn stopped(&self) {
        if matches!(self.format, OutputFormat::Text) {
            println!("Stopped watching");
        }
    }
}

pub fn format_event_line(event: &SyncEvent, time: DateTime<Local>) -> String {
    let stamp = time.format("%H:%M:%S");
    match event {
        SyncEvent::Copied {
            file,
            trigger: Trigger::Initial,
        } => format!("[{stamp}] copied   {file}"),
        SyncEvent::Copied {
            file,
            trigger: Trigger::Change,
        } => format!("[{stamp}] updated  {file}"),
        SyncEvent::Skipped { file } => {
            format!("[{stamp}] skipped  {file} (destination is same age or newer)")
        }
        SyncEvent::Suppressed { file, reason } => {
            let why = match reason {
                SuppressReason::Debounced => "just copied",
                SuppressReason::Unchanged => "not modified since last copy",
            };
            format!("[{stamp}] ignored  {file} ({why})")
        }
        SyncEvent::Failed { file, error } => format!("[{stamp}] error    {file}: {error}"),
    }
}

pub fn format_summary(report: &SyncReport) -> String {
    format!(
        "Script copying complete: {} copied, {} skipped, {} failed",
        report.copied.len(),
        report.skipped.len(),
        report.errors.len()
    )
}

/// # Errors
/// Returns an error if the event cannot be serialized.
pub fn event_json(event: &SyncEvent, time: DateTime<Local>) -> serde_json::Result<String> {
    serde_json::to_string(&EventRecord {
        time: time.to_rfc3339_opts(SecondsFormat::Millis, false),
        event,
    })
}

/// # Errors
/// Returns an error if the summary cannot be serialized.
pub fn summary_json(report: &SyncReport, time: DateTime<Local>) -> serde_json::Result<String> {
    serde_json::to_string(&SummaryRecord {
        time: time.to_rfc3339_opts(SecondsFormat::Millis, false),
        action: "summary",
        copied: report.copied.len(),
        skipped: report.skipped.len(),
        failed: report.errors.len(),
    })
}
