//! Boolean match kernels.
//!
//! The two-valued domain lets most range operators collapse to equality
//! tests or to a constant outcome: nothing sorts below `false` or above
//! `true`, so `less_equal(true)` and `greater_equal(false)` match the whole
//! column, and `between` over differing bounds covers both values. The mask
//! is honored on every path, including the degenerate ones.

use super::{match_all, match_none, match_with};

/// Set the output bit for every element equal to `val`.
pub fn match_bool_equal(src: &[bool], val: bool, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_with(src, |v| v == val, bits, mask)
}

/// Set the output bit for every element not equal to `val`.
pub fn match_bool_not_equal(src: &[bool], val: bool, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_with(src, |v| v != val, bits, mask)
}

/// Set the output bit for every element less than `val`. Only `false < true`
/// holds, so `val == false` matches nothing.
pub fn match_bool_less(src: &[bool], val: bool, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    if !val {
        return match_none(src.len(), bits, mask);
    }
    match_with(src, |v| !v, bits, mask)
}

/// Set the output bit for every element less than or equal to `val`.
/// `val == true` matches the whole column.
pub fn match_bool_less_equal(src: &[bool], val: bool, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    if val {
        return match_all(src.len(), bits, mask);
    }
    match_with(src, |v| !v, bits, mask)
}

/// Set the output bit for every element greater than `val`. `val == true`
/// matches nothing.
pub fn match_bool_greater(src: &[bool], val: bool, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    if val {
        return match_none(src.len(), bits, mask);
    }
    match_with(src, |v| v, bits, mask)
}

/// Set the output bit for every element greater than or equal to `val`.
/// `val == false` matches the whole column.
pub fn match_bool_greater_equal(src: &[bool], val: bool, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    if !val {
        return match_all(src.len(), bits, mask);
    }
    match_with(src, |v| v, bits, mask)
}

/// Set the output bit for every element in the inclusive range `[a, b]`.
/// Differing bounds span the whole domain and match everything, in either
/// order; equal bounds degenerate to `equal`.
pub fn match_bool_between(src: &[bool], a: bool, b: bool, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    if a != b {
        return match_all(src.len(), bits, mask);
    }
    match_bool_equal(src, a, bits, mask)
}
