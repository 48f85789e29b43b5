//! # svcerr — Service Error
//!
//! The error-reporting core of an IPC service-call library: one canonical
//! error value ([`SvcError`]) plus a disciplined set of construction paths
//! that normalize failures from heterogeneous sources (internal
//! preconditions, OS errnos, allocation exhaustion, foreign subsystems)
//! into that one representation, with a validity tag that catches
//! uninitialized values and a critical diagnostic line on every failure.
//!
//! ## Design
//!
//! - **Out-parameter, not `Result`**: operations in the embedding library
//!   return `bool` and take an optional `&mut SvcError` sink. A `None`
//!   sink means the caller opted out of error reporting; every operation
//!   treats that as success-with-no-effect. The diagnostic line is emitted
//!   either way, so swallowed errors still leave an audit trail.
//! - **Validity tag**: each value embeds a `u32` derived from its type
//!   name ([`compute_tag`]). Construction checks it before any write and
//!   treats a mismatch as a fatal usage defect.
//! - **Zero-allocation paths**: the out-of-memory report, errno
//!   descriptions, and bare-guard condition text are stored as borrowed
//!   static strings; reporting allocation exhaustion allocates nothing.
//! - **Exactly-once guards**: [`ensure!`] and friends bind the condition's
//!   result before testing it, so side-effecting conditions run once,
//!   pass or fail.
//!
//! ## Quick Start
//!
//! ```rust
//! use svcerr::{codes, ensure, set_error_from_errno, SvcError};
//!
//! fn open_device(path: &str, mut error: Option<&mut SvcError>) -> bool {
//!     // Reborrow the sink for each guard so later calls can still use it.
//!     ensure!(!path.is_empty(), error.as_deref_mut());
//!     if path != "/dev/hub" {
//!         set_error_from_errno!(error, 2);
//!         return false;
//!     }
//!     true
//! }
//!
//! let mut error = SvcError::new();
//! assert!(!open_device("/dev/missing", Some(&mut error)));
//! assert!(error.is_set());
//! assert_eq!(error.code(), 2);
//! error.free();
//! ```
//!
//! ## Lifecycle
//!
//! | state | tag | meaning |
//! |---|---|---|
//! | uninitialized | absent | declared but never [`init`](SvcError::init)ed, or [`free`](SvcError::free)d |
//! | initialized-empty | present | ready; no failure recorded |
//! | set | present | code and message meaningful |
//!
//! An `SvcError` lives on one call chain: created by the outermost caller,
//! populated at most once somewhere inside, inspected by the caller,
//! freed by whoever created it. It is not `Clone` and must not be retained
//! or shared across threads.

mod error;
mod foreign;
mod magic;
#[macro_use]
mod macros;
pub mod codes;
pub mod set;
pub mod sink;
pub mod site;

// ── Public API ────────────────────────────────────────────────────

pub use error::SvcError;
pub use foreign::{AdoptedError, ForeignError};
pub use magic::compute_tag;
pub use sink::{clear_sink, set_sink, CaptureSink, DiagnosticSink};
pub use site::CallSite;
