//! Write layer under the construction macros.
//!
//! These functions validate the error value's tag and perform the write;
//! they emit no diagnostics of their own. The `set_error!` macro family is
//! the public construction surface: it captures the call site, logs one
//! critical line, and then calls down here. Use these directly only when
//! you already hold a [`CallSite`] from somewhere meaningful.
//!
//! Every function takes the error sink as `impl Into<Option<&mut
//! SvcError>>`: pass `&mut error`, `Some(&mut error)`, or `None`. `None`
//! means the caller opted out of error reporting; the write is skipped and
//! the operation still succeeds.

use std::borrow::Cow;
use std::fmt;

use crate::codes;
use crate::error::SvcError;
use crate::foreign::ForeignError;
use crate::site::CallSite;

/// Render a formatted message into a fresh owned buffer and store it with
/// `code`, replacing (and thereby freeing) any prior message.
///
/// Only format strings controlled by the calling library belong here;
/// externally supplied text goes through [`set_literal`] untouched.
pub fn set_formatted<'a, E>(error: E, site: CallSite, code: i32, args: fmt::Arguments<'_>) -> bool
where
    E: Into<Option<&'a mut SvcError>>,
{
    if let Some(error) = error.into() {
        error.assign(site, code, Cow::Owned(args.to_string()));
    }
    true
}

/// Macro plumbing: store a message the macro already rendered exactly once.
#[doc(hidden)]
pub fn _set_rendered<'a, E>(error: E, site: CallSite, code: i32, message: String) -> bool
where
    E: Into<Option<&'a mut SvcError>>,
{
    if let Some(error) = error.into() {
        error.assign(site, code, Cow::Owned(message));
    }
    true
}

/// Copy `message` verbatim, no interpretation of `{}` or anything else.
pub fn set_literal<'a, E>(error: E, site: CallSite, code: i32, message: &str) -> bool
where
    E: Into<Option<&'a mut SvcError>>,
{
    if let Some(error) = error.into() {
        error.assign(site, code, Cow::Owned(message.to_owned()));
    }
    true
}

/// Store a static message borrowed: no allocation. Used by the
/// out-of-memory path and by guards storing a condition's literal text.
pub fn set_literal_static<'a, E>(
    error: E,
    site: CallSite,
    code: i32,
    message: &'static str,
) -> bool
where
    E: Into<Option<&'a mut SvcError>>,
{
    if let Some(error) = error.into() {
        error.assign(site, code, Cow::Borrowed(message));
    }
    true
}

/// Store an OS error: `code` is the errno, the message is the platform's
/// description of it (static, so this path does not allocate either).
pub fn set_from_errno<'a, E>(error: E, site: CallSite, errno: i32) -> bool
where
    E: Into<Option<&'a mut SvcError>>,
{
    set_literal_static(error.into(), site, errno, codes::describe(errno))
}

/// Record allocation exhaustion: fixed code, fixed static message, and no
/// dynamic allocation anywhere on the path. Must never route through the
/// formatted path or touch an allocator.
pub fn set_out_of_memory<'a, E>(error: E, site: CallSite) -> bool
where
    E: Into<Option<&'a mut SvcError>>,
{
    set_literal_static(error.into(), site, codes::ERR_OOM, codes::MSG_OOM)
}

/// Adopt a foreign subsystem's error: copy its code and message, then
/// consume it so its destructor runs exactly once, whether or not an error
/// value was supplied.
pub fn set_from_foreign<'a, E, F>(error: E, site: CallSite, foreign: F) -> bool
where
    E: Into<Option<&'a mut SvcError>>,
    F: ForeignError,
{
    if let Some(error) = error.into() {
        error.assign(site, foreign.code(), Cow::Owned(foreign.message().to_owned()));
    }
    drop(foreign);
    true
}
