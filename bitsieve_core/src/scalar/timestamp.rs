//! Timestamp match kernels over UNIX epoch nanoseconds.
//!
//! Timestamps compare exactly like `i64`, so the six point operators reuse
//! the integer kernels. `between` differs from the integer contract: bounds
//! arriving in the wrong order are normalized (the earlier instant becomes
//! the lower bound) instead of rejected, and equal bounds degenerate to
//! `equal`.

use super::numeric;

/// Nanoseconds since the UNIX epoch.
pub type TimestampNs = i64;

/// Set the output bit for every element at exactly instant `val`.
pub fn match_timestamp_equal(src: &[TimestampNs], val: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    numeric::match_i64_equal(src, val, bits, mask)
}

/// Set the output bit for every element not at instant `val`.
pub fn match_timestamp_not_equal(src: &[TimestampNs], val: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    numeric::match_i64_not_equal(src, val, bits, mask)
}

/// Set the output bit for every element before instant `val`.
pub fn match_timestamp_less(src: &[TimestampNs], val: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    numeric::match_i64_less(src, val, bits, mask)
}

/// Set the output bit for every element at or before instant `val`.
pub fn match_timestamp_less_equal(src: &[TimestampNs], val: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    numeric::match_i64_less_equal(src, val, bits, mask)
}

/// Set the output bit for every element after instant `val`.
pub fn match_timestamp_greater(src: &[TimestampNs], val: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    numeric::match_i64_greater(src, val, bits, mask)
}

/// Set the output bit for every element at or after instant `val`.
pub fn match_timestamp_greater_equal(src: &[TimestampNs], val: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    numeric::match_i64_greater_equal(src, val, bits, mask)
}

/// Set the output bit for every element between the two instants, inclusive.
/// Bounds are normalized so the earlier instant is the lower bound; equal
/// bounds degenerate to `equal`.
pub fn match_timestamp_between(
    src: &[TimestampNs],
    a: TimestampNs,
    b: TimestampNs,
    bits: &mut [u8],
    mask: Option<&[u8]>,
) -> i64 {
    if a == b {
        return match_timestamp_equal(src, a, bits, mask);
    }
    let (lo, hi) = if b < a { (b, a) } else { (a, b) };
    numeric::match_i64_between(src, lo, hi, bits, mask)
}
