//! Call-site identification for diagnostics.
//!
//! Every construction and guard macro records where it fired: file, line,
//! and enclosing function. The record is three `Copy` fields (two
//! `&'static str` and a `u32`), so capturing and storing it never
//! allocates.

use core::fmt;

/// The file, line, and function a diagnostic originated from.
///
/// Captured with [`call_site!`](crate::call_site), never constructed from
/// runtime strings.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} @ {}", self.file, self.line, self.function)
    }
}

/// Resolve the path of the enclosing function.
///
/// Works by naming a local item and stripping its trailing segment from
/// `core::any::type_name`. Inside a closure the result carries the
/// `{{closure}}` marker of the enclosing scope.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __marker() {}
        fn __name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let __full = __name_of(__marker);
        &__full[..__full.len() - "::__marker".len()]
    }};
}

/// Capture the current call site as a [`CallSite`].
///
/// ```
/// let site = svcerr::call_site!();
/// assert!(site.file.ends_with(".rs"));
/// ```
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::site::CallSite::new(file!(), line!(), $crate::__function_name!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let site = CallSite::new("src/transport.rs", 42, "transport::connect");
        assert_eq!(format!("{}", site), "src/transport.rs:42 @ transport::connect");
    }

    #[test]
    fn captures_enclosing_function() {
        let site = crate::call_site!();
        assert_eq!(site.file, file!());
        assert!(
            site.function.ends_with("captures_enclosing_function"),
            "got {}",
            site.function
        );
    }

    #[test]
    fn capture_is_copy() {
        let site = crate::call_site!();
        let copy = site;
        assert_eq!(site, copy);
    }
}
