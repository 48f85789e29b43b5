/// Populate an error value with a formatted message.
///
/// Captures the call site, emits one critical diagnostic line, and then
/// writes code + message. The diagnostic goes out before the write and
/// regardless of whether the sink is `None`, so a caller that ignores the
/// error value still leaves an audit trail.
///
/// The format string must be controlled by the calling library. Text that
/// arrives from outside (and may itself contain `{}` or `%`) goes through
/// [`set_error_literal!`] instead.
///
/// ```
/// use svcerr::{codes, set_error, SvcError};
///
/// let mut error = SvcError::new();
/// set_error!(&mut error, codes::ERR_PERMISSION, "invalid permissions for {}", "com.example.svc");
/// assert_eq!(error.code(), codes::ERR_PERMISSION);
/// assert_eq!(error.message(), "invalid permissions for com.example.svc");
/// ```
#[macro_export]
macro_rules! set_error {
    ($err:expr, $code:expr, $($arg:tt)+) => {{
        let __site = $crate::call_site!();
        // Rendered once; the same text feeds the diagnostic and the value.
        let __message = ::std::format!($($arg)+);
        $crate::sink::critical(format_args!("error at {}: {}", __site, __message));
        $crate::set::_set_rendered($err, __site, $code, __message)
    }};
}

/// Populate an error value with a message copied verbatim.
///
/// The correct choice whenever the text is not a compile-time-controlled
/// format string: peer-supplied names, payload fragments, anything that
/// could contain format-like sequences.
#[macro_export]
macro_rules! set_error_literal {
    ($err:expr, $code:expr, $msg:expr $(,)?) => {{
        let __site = $crate::call_site!();
        let __message = $msg;
        $crate::sink::critical(format_args!("error at {}: {}", __site, __message));
        $crate::set::set_literal($err, __site, $code, __message)
    }};
}

/// Populate an error value from an OS errno.
///
/// The code is the errno itself; the message is the platform's description
/// of it.
///
/// ```
/// use svcerr::{set_error_from_errno, SvcError};
///
/// let mut error = SvcError::new();
/// set_error_from_errno!(&mut error, 2);
/// assert_eq!(error.code(), 2);
/// assert_eq!(error.message(), "No such file or directory");
/// ```
#[macro_export]
macro_rules! set_error_from_errno {
    ($err:expr, $errno:expr $(,)?) => {{
        let __site = $crate::call_site!();
        let __errno: i32 = $errno;
        $crate::sink::critical(format_args!(
            "error at {}: {} (errno {})",
            __site,
            $crate::codes::describe(__errno),
            __errno
        ));
        $crate::set::set_from_errno($err, __site, __errno)
    }};
}

/// Record allocation exhaustion.
///
/// The one construction path that must work with no spare memory: the
/// diagnostic line is built from static parts, the stored message is a
/// borrowed constant, and nothing on the path allocates.
#[macro_export]
macro_rules! set_error_oom {
    ($err:expr $(,)?) => {{
        let __site = $crate::call_site!();
        $crate::sink::critical(format_args!(
            "error at {}: {}",
            __site,
            $crate::codes::MSG_OOM
        ));
        $crate::set::set_out_of_memory($err, __site)
    }};
}

/// Adopt an error owned by a foreign subsystem.
///
/// Copies its code and message into the error value, then consumes the
/// foreign object; its destructor runs exactly once even when the sink is
/// `None`.
#[macro_export]
macro_rules! set_error_from_foreign {
    ($err:expr, $foreign:expr $(,)?) => {{
        let __site = $crate::call_site!();
        let __foreign = $foreign;
        $crate::sink::critical(format_args!(
            "error at {}: {} ({})",
            __site,
            $crate::ForeignError::message(&__foreign),
            $crate::ForeignError::code(&__foreign)
        ));
        $crate::set::set_from_foreign($err, __site, __foreign)
    }};
}

/// Fail the enclosing `bool` operation if a condition does not hold.
///
/// The condition is evaluated exactly once, side effects included. On
/// failure: one critical line with the condition's literal text and the
/// call site, the error value populated (default code
/// [`ERR_UNKNOWN`](crate::codes::ERR_UNKNOWN) and the condition text as
/// the message; or a caller-chosen code and formatted message prefixed
/// with the condition text), then `return false`.
///
/// ```
/// use svcerr::{codes, ensure, SvcError};
///
/// fn attach(fd: i32, error: Option<&mut SvcError>) -> bool {
///     ensure!(fd >= 0, error);
///     true
/// }
///
/// let mut error = SvcError::new();
/// assert!(!attach(-1, Some(&mut error)));
/// assert_eq!(error.code(), codes::ERR_UNKNOWN);
/// assert!(error.message().contains("fd >= 0"));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {{
        let __ok: bool = $cond;
        if !__ok {
            let __site = $crate::call_site!();
            $crate::sink::critical(format_args!("{} from {}", stringify!($cond), __site));
            $crate::set::set_literal_static(
                $err,
                __site,
                $crate::codes::ERR_UNKNOWN,
                stringify!($cond),
            );
            return false;
        }
    }};
    ($cond:expr, $err:expr, $code:expr, $($arg:tt)+) => {{
        let __ok: bool = $cond;
        if !__ok {
            let __site = $crate::call_site!();
            let __message =
                ::std::format!("{}: {}", stringify!($cond), format_args!($($arg)+));
            $crate::sink::critical(format_args!("{} from {}", __message, __site));
            $crate::set::_set_rendered($err, __site, $code, __message);
            return false;
        }
    }};
}

/// [`ensure!`] for functions that release resources before returning:
/// instead of returning, `break` a caller-named labeled block with `false`.
///
/// Code after the block (and any `Drop` guards in scope) still runs, so
/// release logic scheduled earlier in the function is not skipped.
///
/// ```
/// use svcerr::{codes, ensure_or_break, SvcError};
///
/// fn publish(slot: Option<u32>, error: Option<&mut SvcError>) -> bool {
///     let ok = 'fail: {
///         ensure_or_break!('fail, slot.is_some(), error);
///         true
///     };
///     // release logic shared by both outcomes runs here
///     ok
/// }
///
/// let mut error = SvcError::new();
/// assert!(!publish(None, Some(&mut error)));
/// assert!(error.is_set());
/// ```
#[macro_export]
macro_rules! ensure_or_break {
    ($label:lifetime, $cond:expr, $err:expr $(,)?) => {{
        let __ok: bool = $cond;
        if !__ok {
            let __site = $crate::call_site!();
            $crate::sink::critical(format_args!("{} from {}", stringify!($cond), __site));
            $crate::set::set_literal_static(
                $err,
                __site,
                $crate::codes::ERR_UNKNOWN,
                stringify!($cond),
            );
            break $label false;
        }
    }};
    ($label:lifetime, $cond:expr, $err:expr, $code:expr, $($arg:tt)+) => {{
        let __ok: bool = $cond;
        if !__ok {
            let __site = $crate::call_site!();
            let __message =
                ::std::format!("{}: {}", stringify!($cond), format_args!($($arg)+));
            $crate::sink::critical(format_args!("{} from {}", __message, __site));
            $crate::set::_set_rendered($err, __site, $code, __message);
            break $label false;
        }
    }};
}

/// Assert an invariant of this library itself.
///
/// Evaluates the condition exactly once; on failure logs a critical line
/// and panics. For defects, never for recoverable external failures: a
/// false condition here means the library (or its embedding) is broken,
/// and there is nothing sensible to return to the caller.
#[macro_export]
macro_rules! svc_assert {
    ($cond:expr $(,)?) => {{
        let __ok: bool = $cond;
        if !__ok {
            let __site = $crate::call_site!();
            $crate::sink::critical(format_args!(
                "{}: failed in {}",
                stringify!($cond),
                __site
            ));
            panic!("{}: failed in {}", stringify!($cond), __site);
        }
    }};
}
