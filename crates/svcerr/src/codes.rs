//! Reserved error codes and the OS errno description collaborator.
//!
//! # Code Ranges
//!
//! The `i32` code space is partitioned so call sites never collide:
//!
//! | Range      | Purpose                                      |
//! |------------|----------------------------------------------|
//! | `0`        | no failure recorded                          |
//! | `-1 .. -8` | reserved library failures (constants below)  |
//! | `-9 ..`    | reserved for future library failures         |
//! | `> 0`      | OS errno passthrough                         |
//!
//! The reserved constants cover the failure categories the service layer
//! reports. Each documents its message template; in Rust a format template
//! must be a literal at the call site, so callers write
//! `set_error!(err, codes::ERR_PERMISSION, "invalid permissions for {}", name)`
//! rather than interpolating a shared constant.

/// No failure recorded. Never passed to a construction operation.
pub const ERR_NONE: i32 = 0;

/// Unclassified failure. Also the default code for a bare guard, where the
/// failed condition's literal text is the whole message.
pub const ERR_UNKNOWN: i32 = -1;

/// Allocation exhaustion. Always paired with [`MSG_OOM`]; this is the one
/// code whose construction path never allocates.
pub const ERR_OOM: i32 = -2;

/// Caller lacks permission for a service. Template: `invalid permissions
/// for <service>`.
pub const ERR_PERMISSION: i32 = -3;

/// A service name is already registered. Template: `attempted to register
/// a service name that already exists: <service>`.
pub const ERR_DUPLICATE_NAME: i32 = -4;

/// Could not connect to the hub or a peer. Template: `unable to connect
/// to <name> (<reason>)`.
pub const ERR_CONNECT_FAILURE: i32 = -5;

/// A deprecated API was called.
pub const ERR_DEPRECATED: i32 = -6;

/// Caller is not privileged for the requested operation. Template:
/// `call from application <id> but not privileged`.
pub const ERR_NOT_PRIVILEGED: i32 = -7;

/// Protocol version does not match the hub. Template: `protocol version
/// (<n>) does not match the hub`.
pub const ERR_PROTOCOL_VERSION: i32 = -8;

/// Fixed out-of-memory message, stored borrowed so reporting allocation
/// exhaustion performs no allocation itself.
pub const MSG_OOM: &str = "Out of memory";

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        /// Textual description of an OS error code.
        ///
        /// Pure lookup into the platform's errno table; unknown codes get
        /// the platform's unknown-errno text. The returned string is
        /// static, so storing it never allocates.
        pub fn describe(errno: i32) -> &'static str {
            nix::errno::Errno::from_raw(errno).desc()
        }
    } else {
        /// Textual description of an OS error code.
        ///
        /// No errno table on this platform.
        pub fn describe(_errno: i32) -> &'static str {
            "Unknown error"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_codes_are_negative_and_distinct() {
        let codes = [
            ERR_UNKNOWN,
            ERR_OOM,
            ERR_PERMISSION,
            ERR_DUPLICATE_NAME,
            ERR_CONNECT_FAILURE,
            ERR_DEPRECATED,
            ERR_NOT_PRIVILEGED,
            ERR_PROTOCOL_VERSION,
        ];
        for (i, a) in codes.iter().enumerate() {
            assert!(*a < 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(ERR_NONE, 0);
    }

    #[cfg(unix)]
    #[test]
    fn describe_known_errno() {
        assert_eq!(describe(2), "No such file or directory"); // ENOENT
        assert_eq!(describe(13), "Permission denied"); // EACCES
    }

    #[cfg(unix)]
    #[test]
    fn describe_is_stable() {
        assert_eq!(describe(22), describe(22)); // EINVAL
    }
}
