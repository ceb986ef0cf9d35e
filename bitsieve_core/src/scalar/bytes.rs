//! Byte-string and text match kernels, ordered lexicographically byte-wise.
//!
//! `between` carries two special cases from the storage engine's range scans:
//! an empty lower bound sorts before every value and matches the whole
//! column, and equal bounds degenerate to `equal`.

use super::{match_all, match_with};

macro_rules! bytes_match_kernels {
    ($t:ty,
     $equal:ident, $not_equal:ident, $less:ident, $less_equal:ident,
     $greater:ident, $greater_equal:ident, $between:ident,
     $is_empty:expr) => {
        /// Set the output bit for every element equal to `val`.
        pub fn $equal(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v == val, bits, mask)
        }

        /// Set the output bit for every element not equal to `val`.
        pub fn $not_equal(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v != val, bits, mask)
        }

        /// Set the output bit for every element sorting before `val`.
        pub fn $less(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v < val, bits, mask)
        }

        /// Set the output bit for every element sorting before or equal to `val`.
        pub fn $less_equal(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v <= val, bits, mask)
        }

        /// Set the output bit for every element sorting after `val`.
        pub fn $greater(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v > val, bits, mask)
        }

        /// Set the output bit for every element sorting after or equal to `val`.
        pub fn $greater_equal(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v >= val, bits, mask)
        }

        /// Set the output bit for every element in the inclusive range
        /// `[a, b]`. An empty `a` matches the whole column without scanning;
        /// `a == b` degenerates to `equal`. Panics when `a > b`.
        pub fn $between(src: &[$t], a: $t, b: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            if $is_empty(a) {
                return match_all(src.len(), bits, mask);
            }
            if a == b {
                return $equal(src, a, bits, mask);
            }
            assert!(a <= b, "between bounds out of order");
            match_with(src, |v| a <= v && v <= b, bits, mask)
        }
    };
}

bytes_match_kernels!(&[u8],
    match_bytes_equal, match_bytes_not_equal, match_bytes_less, match_bytes_less_equal,
    match_bytes_greater, match_bytes_greater_equal, match_bytes_between,
    |a: &[u8]| a.is_empty());
bytes_match_kernels!(&str,
    match_str_equal, match_str_not_equal, match_str_less, match_str_less_equal,
    match_str_greater, match_str_greater_equal, match_str_between,
    |a: &str| a.is_empty());
