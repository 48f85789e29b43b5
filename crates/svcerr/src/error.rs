use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use crate::magic::compute_tag;
use crate::sink;
use crate::site::CallSite;

/// Tag stamped into every initialized `SvcError`.
pub(crate) const SVC_ERROR_TAG: u32 = compute_tag("SvcError");

/// One recorded failure, scoped to a single call chain.
///
/// The value is an out-parameter: the outermost caller of a fallible
/// operation creates one, passes it down by mutable reference, and whoever
/// fails first populates it through the `set_error!` family or a guard.
/// Exactly one writer touches it between [`init`](SvcError::init) and
/// [`free`](SvcError::free); it is never shared across threads (callers
/// that need to hand a failure to another thread copy `code` and `message`
/// into their own container).
///
/// Three states, distinguished by the embedded validity tag:
///
/// - **uninitialized**: `Default` yields this; the tag is absent and code
///   and message are meaningless. Models a declared-but-not-initialized
///   value; using it is a usage defect caught by [`validate`](SvcError::validate).
/// - **initialized-empty**: tag present, code 0, message empty.
/// - **set**: tag present, code and message meaningful.
///
/// The message is a `Cow`: formatted and copied text is owned, while the
/// out-of-memory text, errno descriptions, and guard condition literals are
/// borrowed `&'static str`s, keeping those paths free of allocation.
pub struct SvcError {
    code: i32,
    message: Cow<'static, str>,
    magic: u32,
    site: Option<CallSite>,
}

impl Default for SvcError {
    /// An *uninitialized* value, as if freshly declared. Call
    /// [`init`](SvcError::init) (or use [`new`](SvcError::new)) before
    /// passing it to any construction operation.
    fn default() -> Self {
        Self {
            code: 0,
            message: Cow::Borrowed(""),
            magic: 0,
            site: None,
        }
    }
}

impl SvcError {
    /// An initialized-empty value, ready to hand to a fallible operation.
    pub fn new() -> Self {
        let mut error = Self::default();
        error.init();
        error
    }

    /// Reset to initialized-empty and stamp the validity tag.
    ///
    /// No failure mode. Re-initializing a populated value leaks nothing
    /// (the old message buffer is dropped) but discards its contents; call
    /// [`free`](SvcError::free) first if the distinction matters to you.
    pub fn init(&mut self) {
        self.code = 0;
        self.message = Cow::Borrowed("");
        self.site = None;
        self.magic = SVC_ERROR_TAG;
    }

    /// True if the validity tag is present.
    ///
    /// Non-fatal query: a freed or never-initialized value answers `false`
    /// here without being treated as a defect.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.magic == SVC_ERROR_TAG
    }

    /// Fatal tag check, run by every construction path before it writes.
    ///
    /// # Panics
    ///
    /// Panics (after a critical diagnostic) if the tag is absent or wrong:
    /// the caller handed in a value that was never initialized, or reused
    /// one after [`free`](SvcError::free). That is a defect in the calling
    /// code, not a runtime condition, so there is no recovery path.
    pub fn validate(&self) {
        if !self.is_initialized() {
            sink::critical(format_args!(
                "SvcError tag {:#010x} invalid (expected {:#010x}); was it initialized with init()?",
                self.magic, SVC_ERROR_TAG
            ));
            panic!("SvcError used without init()");
        }
    }

    /// True if a failure has been recorded.
    pub fn is_set(&self) -> bool {
        self.validate();
        self.code != 0 || !self.message.is_empty()
    }

    #[inline]
    pub fn code(&self) -> i32 {
        debug_assert!(
            self.is_initialized(),
            "SvcError read after free() or before init()"
        );
        self.code
    }

    #[inline]
    pub fn message(&self) -> &str {
        debug_assert!(
            self.is_initialized(),
            "SvcError read after free() or before init()"
        );
        &self.message
    }

    /// Where the failure was recorded, if one has been.
    #[inline]
    pub fn site(&self) -> Option<CallSite> {
        debug_assert!(
            self.is_initialized(),
            "SvcError read after free() or before init()"
        );
        self.site
    }

    /// Release the message buffer and return to the uninitialized state.
    ///
    /// Idempotent: calling it again, or on a value that was never
    /// initialized, is a no-op. After `free` the value is
    /// indistinguishable from freshly declared; re-`init` before reuse.
    pub fn free(&mut self) {
        if !self.is_initialized() {
            return;
        }
        self.code = 0;
        self.message = Cow::Borrowed("");
        self.site = None;
        self.magic = 0;
    }

    /// Emit the recorded failure through the diagnostic sink.
    pub fn log(&self, label: &str) {
        self.validate();
        sink::critical(format_args!("{}: {}", label, self));
    }

    /// Write layer under the construction macros: validate, then replace
    /// code, message, and recording site in one step. Dropping the old
    /// message releases its buffer.
    pub(crate) fn assign(&mut self, site: CallSite, code: i32, message: Cow<'static, str>) {
        self.validate();
        self.code = code;
        self.message = message;
        self.site = Some(site);
    }
}

impl fmt::Display for SvcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_initialized() {
            return write!(f, "(invalid error value)");
        }
        if self.code == 0 && self.message.is_empty() {
            return write!(f, "(no error)");
        }
        write!(f, "{} ({})", self.message, self.code)?;
        if let Some(site) = self.site {
            write!(f, " at {}", site)?;
        }
        Ok(())
    }
}

impl fmt::Debug for SvcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SvcError")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("magic", &format_args!("{:#010x}", self.magic))
            .field("site", &self.site)
            .finish()
    }
}

impl Error for SvcError {}
