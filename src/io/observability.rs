use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::TableError;

use super::unified::TableFormat;

/// How serious a failed load or save is; alerting thresholds compare against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IoSeverity {
    /// The request itself was rejected: bad format, header mismatch, invalid limit.
    Error,
    /// The file system failed underneath (missing file, permissions, full disk).
    Critical,
}

/// Whether a table was being read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoDirection {
    Load,
    Save,
}

impl fmt::Display for IoDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Load => "load",
            Self::Save => "save",
        })
    }
}

/// Context about a load or save attempt.
#[derive(Debug, Clone)]
pub struct IoContext {
    /// Requested paths: the input files for a load, the target path for a save.
    pub paths: Vec<PathBuf>,
    /// Format used.
    pub format: TableFormat,
    /// Load or save.
    pub direction: IoDirection,
}

impl IoContext {
    fn paths_display(&self) -> String {
        self.paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `<direction> <outcome> format=<format> paths=<a,b>`, shared by the built-in observers.
    fn event_line(&self, outcome: &str) -> String {
        format!(
            "{} {outcome} format={:?} paths={}",
            self.direction,
            self.format,
            self.paths_display()
        )
    }

    fn success_line(&self, stats: IoStats) -> String {
        format!("{} rows={} files={}", self.event_line("ok"), stats.rows, stats.files)
    }

    fn failure_line(&self, outcome: &str, severity: IoSeverity, error: &TableError) -> String {
        format!("{} err={error}", self.event_line(&format!("{outcome} severity={severity:?}")))
    }
}

/// Minimal stats reported on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoStats {
    /// Rows loaded or saved.
    pub rows: usize,
    /// Files read or written (more than one for multi-file loads and split saves).
    pub files: usize,
}

/// Receives the outcome of every [`super::load`] and [`super::save`] call.
pub trait IoObserver: Send + Sync {
    /// Called when a load or save succeeds.
    fn on_success(&self, _ctx: &IoContext, _stats: IoStats) {}

    /// Called when a load or save fails.
    fn on_failure(&self, _ctx: &IoContext, _severity: IoSeverity, _error: &TableError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IoContext, severity: IoSeverity, error: &TableError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IoObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IoObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IoObserver for CompositeObserver {
    fn on_success(&self, ctx: &IoContext, stats: IoStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IoContext, severity: IoSeverity, error: &TableError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IoContext, severity: IoSeverity, error: &TableError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs load and save events to stderr, one `[table-io]` line each.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl IoObserver for StdErrObserver {
    fn on_success(&self, ctx: &IoContext, stats: IoStats) {
        eprintln!("[table-io] {}", ctx.success_line(stats));
    }

    fn on_failure(&self, ctx: &IoContext, severity: IoSeverity, error: &TableError) {
        eprintln!("[table-io] {}", ctx.failure_line("fail", severity, error));
    }

    fn on_alert(&self, ctx: &IoContext, severity: IoSeverity, error: &TableError) {
        eprintln!("[table-io] {}", ctx.failure_line("ALERT", severity, error));
    }
}

/// Appends load and save events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl IoObserver for FileObserver {
    fn on_success(&self, ctx: &IoContext, stats: IoStats) {
        self.append_line(&format!("{} {}", unix_ts(), ctx.success_line(stats)));
    }

    fn on_failure(&self, ctx: &IoContext, severity: IoSeverity, error: &TableError) {
        self.append_line(&format!("{} {}", unix_ts(), ctx.failure_line("fail", severity, error)));
    }

    fn on_alert(&self, ctx: &IoContext, severity: IoSeverity, error: &TableError) {
        self.append_line(&format!("{} {}", unix_ts(), ctx.failure_line("ALERT", severity, error)));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
