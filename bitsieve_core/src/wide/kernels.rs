//! Scalar match kernels over the wide-integer stride layouts.
//!
//! Same external contract as the fixed-width kernels. No native machine
//! comparison exists at these widths, so elements are reassembled from the
//! limb arrays and compared through the type's own operations. `between`
//! uses the same unsigned wraparound range test as every other integer
//! width: `(v - a) <_u (b - a) + 1`, expressed as `<=` against the raw span.

use super::int256::I256;
use super::stride::{I256StrideRef, Int128StrideRef};
use crate::scalar::match_iter;

/// Set the output bit for every 128-bit element equal to `val`.
pub fn match_i128_equal(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_iter(src.len(), src.values(), |v| v == val, bits, mask)
}

/// Set the output bit for every 128-bit element not equal to `val`.
pub fn match_i128_not_equal(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_iter(src.len(), src.values(), |v| v != val, bits, mask)
}

/// Set the output bit for every 128-bit element less than `val`.
pub fn match_i128_less(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_iter(src.len(), src.values(), |v| v < val, bits, mask)
}

/// Set the output bit for every 128-bit element less than or equal to `val`.
pub fn match_i128_less_equal(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_iter(src.len(), src.values(), |v| v <= val, bits, mask)
}

/// Set the output bit for every 128-bit element greater than `val`.
pub fn match_i128_greater(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_iter(src.len(), src.values(), |v| v > val, bits, mask)
}

/// Set the output bit for every 128-bit element greater than or equal to `val`.
pub fn match_i128_greater_equal(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_iter(src.len(), src.values(), |v| v >= val, bits, mask)
}

/// Set the output bit for every 128-bit element in the inclusive range
/// `[a, b]`. Panics when `a > b`.
pub fn match_i128_between(
    src: Int128StrideRef,
    a: i128,
    b: i128,
    bits: &mut [u8],
    mask: Option<&[u8]>,
) -> i64 {
    assert!(a <= b, "between bounds out of order");
    let lo = a as u128;
    let span = (b as u128).wrapping_sub(lo);
    match_iter(
        src.len(),
        src.values(),
        |v| (v as u128).wrapping_sub(lo) <= span,
        bits,
        mask,
    )
}

/// Set the output bit for every 256-bit element equal to `val`.
pub fn match_i256_equal(src: I256StrideRef, val: I256, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_iter(src.len(), src.values(), |v| v == val, bits, mask)
}

/// Set the output bit for every 256-bit element not equal to `val`.
pub fn match_i256_not_equal(src: I256StrideRef, val: I256, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_iter(src.len(), src.values(), |v| v != val, bits, mask)
}

/// Set the output bit for every 256-bit element less than `val`.
pub fn match_i256_less(src: I256StrideRef, val: I256, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_iter(src.len(), src.values(), |v| v < val, bits, mask)
}

/// Set the output bit for every 256-bit element less than or equal to `val`.
pub fn match_i256_less_equal(src: I256StrideRef, val: I256, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_iter(src.len(), src.values(), |v| v <= val, bits, mask)
}

/// Set the output bit for every 256-bit element greater than `val`.
pub fn match_i256_greater(src: I256StrideRef, val: I256, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_iter(src.len(), src.values(), |v| v > val, bits, mask)
}

/// Set the output bit for every 256-bit element greater than or equal to `val`.
pub fn match_i256_greater_equal(src: I256StrideRef, val: I256, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    match_iter(src.len(), src.values(), |v| v >= val, bits, mask)
}

/// Set the output bit for every 256-bit element in the inclusive range
/// `[a, b]`, via unsigned wraparound subtraction. Panics when `a > b`.
pub fn match_i256_between(
    src: I256StrideRef,
    a: I256,
    b: I256,
    bits: &mut [u8],
    mask: Option<&[u8]>,
) -> i64 {
    assert!(a <= b, "between bounds out of order");
    let span = b.wrapping_sub(a);
    match_iter(
        src.len(),
        src.values(),
        |v| v.wrapping_sub(a).cmp_unsigned(&span).is_le(),
        bits,
        mask,
    )
}
