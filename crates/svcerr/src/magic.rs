//! Validity-tag computation for runtime type checking.
//!
//! A tag is a `u32` derived from a type's name at compile time. Every type
//! that wants provenance checking embeds a tag field, stamps it on init,
//! and compares it against its expected constant before reads or writes.
//! A mismatch means the value was never initialized (or the caller handed
//! in the wrong kind of value), which is a usage defect, not a runtime
//! condition to recover from.
//!
//! The tag never leaves process memory, so only in-process reproducibility
//! matters: the same name always yields the same tag.

/// Derive a validity tag from a type name.
///
/// Samples eight bytes spaced evenly across the name (indices
/// `len*k/8` for `k = 0..8`), packs the high four into one word and the
/// low four into another, most-significant sample first, and XORs the
/// two words.
///
/// An empty name yields 0, which no initialized value ever carries.
///
/// ```
/// use svcerr::compute_tag;
///
/// const TAG: u32 = compute_tag("SvcError");
/// assert_eq!(TAG, compute_tag("SvcError"));
/// ```
pub const fn compute_tag(type_name: &str) -> u32 {
    let bytes = type_name.as_bytes();
    let n = bytes.len();
    if n == 0 {
        return 0;
    }

    let hi = ((bytes[n * 7 / 8] as u32) << 24)
        | ((bytes[n * 6 / 8] as u32) << 16)
        | ((bytes[n * 5 / 8] as u32) << 8)
        | (bytes[n * 4 / 8] as u32);
    let lo = ((bytes[n * 3 / 8] as u32) << 24)
        | ((bytes[n * 2 / 8] as u32) << 16)
        | ((bytes[n / 8] as u32) << 8)
        | (bytes[0] as u32);

    hi ^ lo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(compute_tag("SvcError"), compute_tag("SvcError"));
        assert_eq!(compute_tag("Transport"), compute_tag("Transport"));
    }

    #[test]
    fn packing_layout() {
        // "SvcError" has len 8, so the samples are the bytes themselves:
        // hi = r,o,r,r (indices 7,6,5,4), lo = E,c,v,S (indices 3,2,1,0).
        assert_eq!(compute_tag("SvcError"), 0x726f7272 ^ 0x45637653);
        assert_eq!(compute_tag("SvcError"), 0x370c0421);
    }

    #[test]
    fn distinguishes_common_type_names() {
        let names = ["SvcError", "Transport", "Subscription", "CallToken"];
        for a in names {
            for b in names {
                if a != b {
                    assert_ne!(compute_tag(a), compute_tag(b), "{} vs {}", a, b);
                }
            }
        }
    }

    #[test]
    fn degenerate_names() {
        // A one-byte name samples the same byte in both words, so the XOR
        // cancels. Single-character type names cannot use tag validation.
        assert_eq!(compute_tag("A"), 0);
        assert_eq!(compute_tag(""), 0);
    }

    #[test]
    fn usable_in_const_context() {
        const TAG: u32 = compute_tag("SvcError");
        assert_eq!(TAG, compute_tag("SvcError"));
    }
}
