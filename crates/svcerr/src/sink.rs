//! Process-wide critical-diagnostic sink.
//!
//! Every failure that reaches this crate produces one critical line here,
//! whether or not the caller supplied an error value to populate. The sink
//! is an injected capability: the default writes to stderr, and tests (or
//! an embedding service) install a replacement with [`set_sink`].
//!
//! # Environment Variables
//!
//! - `SVCERR_QUIET=1` - silence the default stderr sink (installed sinks
//!   are unaffected)

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// A destination for critical diagnostic lines.
///
/// Fire-and-forget: implementations must not fail in a way callers have to
/// handle, and must be callable from any thread.
pub trait DiagnosticSink: Send + Sync {
    fn critical(&self, message: fmt::Arguments<'_>);
}

static SINK: RwLock<Option<Box<dyn DiagnosticSink>>> = RwLock::new(None);

/// Install a replacement sink process-wide.
pub fn set_sink(sink: Box<dyn DiagnosticSink>) {
    if let Ok(mut slot) = SINK.write() {
        *slot = Some(sink);
    }
}

/// Restore the default stderr sink.
pub fn clear_sink() {
    if let Ok(mut slot) = SINK.write() {
        *slot = None;
    }
}

/// Emit one critical line through the installed sink.
///
/// The arguments are rendered by the sink itself; the default stderr path
/// writes them straight to the locked stream without building a `String`,
/// so callers that pass only static text stay allocation-free.
pub fn critical(args: fmt::Arguments<'_>) {
    match SINK.read() {
        Ok(slot) => match slot.as_ref() {
            Some(sink) => sink.critical(args),
            None => stderr_critical(args),
        },
        // A sink panicked mid-write; fall back so the line is not lost.
        Err(_) => stderr_critical(args),
    }
}

// ── Default stderr sink ───────────────────────────────────────────

static QUIET: AtomicBool = AtomicBool::new(false);
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Read `SVCERR_QUIET` once.
///
/// Called automatically on first emit, but can be called explicitly for
/// deterministic initialization.
pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    if let Ok(val) = std::env::var("SVCERR_QUIET") {
        let quiet = matches!(val.as_str(), "1" | "true" | "yes" | "on");
        QUIET.store(quiet, Ordering::Relaxed);
    }
}

#[inline]
fn quiet() -> bool {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
    QUIET.load(Ordering::Relaxed)
}

fn stderr_critical(args: fmt::Arguments<'_>) {
    if quiet() {
        return;
    }
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = handle.write_all(b"CRITICAL: ");
    let _ = handle.write_fmt(args);
    let _ = handle.write_all(b"\n");
}

// ── Capturing sink ────────────────────────────────────────────────

/// A sink that records every line, for asserting on diagnostics in tests.
///
/// Clones share the same buffer, so keep one handle and [`install`] a
/// clone:
///
/// ```
/// use svcerr::{clear_sink, CaptureSink};
///
/// let capture = CaptureSink::new();
/// capture.install();
/// svcerr::sink::critical(format_args!("connect refused"));
/// clear_sink();
/// assert!(capture.contains("connect refused"));
/// ```
///
/// [`install`]: CaptureSink::install
#[derive(Clone, Default)]
pub struct CaptureSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make this capture the process-wide sink.
    pub fn install(&self) {
        set_sink(Box::new(self.clone()));
    }

    /// Snapshot of every captured line.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// True if any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl DiagnosticSink for CaptureSink {
    fn critical(&self, message: fmt::Arguments<'_>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SvcError;

    // The registry is process-wide; tests that swap it out serialize here.
    static LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn capture_round_trip() {
        let _guard = LOCK.lock().unwrap();
        let capture = CaptureSink::new();
        capture.install();
        critical(format_args!("line one"));
        critical(format_args!("line {}", 2));
        clear_sink();
        assert!(capture.contains("line one"));
        assert!(capture.contains("line 2"));
        assert!(!capture.contains("line three"));
    }

    #[test]
    fn capture_observes_construction_macros() {
        let _guard = LOCK.lock().unwrap();
        let capture = CaptureSink::new();
        capture.install();
        let mut error = SvcError::new();
        crate::set_error_literal!(
            &mut error,
            crate::codes::ERR_CONNECT_FAILURE,
            "unable to connect to com.example.hub"
        );
        clear_sink();
        assert!(capture.contains("unable to connect to com.example.hub"));
        // The line names the call site.
        assert!(capture.contains("sink.rs"));
        assert!(error.is_set());
    }

    #[test]
    fn diagnostics_survive_missing_error_value() {
        let _guard = LOCK.lock().unwrap();
        let capture = CaptureSink::new();
        capture.install();
        let ok = crate::set_error!(None, crate::codes::ERR_DEPRECATED, "deprecated API called");
        clear_sink();
        assert!(ok);
        assert!(capture.contains("deprecated API called"));
    }

    #[test]
    fn log_replays_recorded_failure() {
        let _guard = LOCK.lock().unwrap();
        let capture = CaptureSink::new();
        capture.install();
        let mut error = SvcError::new();
        crate::set_error_literal!(&mut error, 13, "permission denied");
        capture.clear();
        error.log("dispatch");
        clear_sink();
        assert!(capture.contains("dispatch: permission denied (13)"));
    }

    #[test]
    fn guard_logs_condition_text() {
        let _guard = LOCK.lock().unwrap();
        let capture = CaptureSink::new();
        capture.install();

        fn guarded(value: i32, error: Option<&mut SvcError>) -> bool {
            crate::ensure!(value > 0, error);
            true
        }

        let failed = guarded(-1, None);
        clear_sink();
        assert!(!failed);
        assert!(capture.contains("value > 0"));
    }
}
