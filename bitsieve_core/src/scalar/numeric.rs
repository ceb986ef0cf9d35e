//! Fixed-width integer and float match kernels.
//!
//! Integer `between` is a single unsigned range test: reinterpret the element
//! and both bounds as unsigned, then `(v - a) <= (b - a)` with wraparound.
//! This holds for signed and unsigned types alike as long as `a <= b`, which
//! is asserted at entry. Float kernels follow IEEE-754 partial ordering, so a
//! NaN element matches nothing except `not_equal`, and a NaN bound matches
//! nothing at all.

use super::match_with;

macro_rules! int_match_kernels {
    ($t:ty, $u:ty,
     $equal:ident, $not_equal:ident, $less:ident, $less_equal:ident,
     $greater:ident, $greater_equal:ident, $between:ident) => {
        /// Set the output bit for every element equal to `val`.
        pub fn $equal(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v == val, bits, mask)
        }

        /// Set the output bit for every element not equal to `val`.
        pub fn $not_equal(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v != val, bits, mask)
        }

        /// Set the output bit for every element less than `val`.
        pub fn $less(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v < val, bits, mask)
        }

        /// Set the output bit for every element less than or equal to `val`.
        pub fn $less_equal(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v <= val, bits, mask)
        }

        /// Set the output bit for every element greater than `val`.
        pub fn $greater(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v > val, bits, mask)
        }

        /// Set the output bit for every element greater than or equal to `val`.
        pub fn $greater_equal(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v >= val, bits, mask)
        }

        /// Set the output bit for every element in the inclusive range
        /// `[a, b]`, using a single unsigned comparison per element.
        /// Panics when `a > b`.
        pub fn $between(src: &[$t], a: $t, b: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            assert!(a <= b, "between bounds out of order");
            let lo = a as $u;
            let span = (b as $u).wrapping_sub(lo);
            match_with(src, |v| (v as $u).wrapping_sub(lo) <= span, bits, mask)
        }
    };
}

int_match_kernels!(i8, u8,
    match_i8_equal, match_i8_not_equal, match_i8_less, match_i8_less_equal,
    match_i8_greater, match_i8_greater_equal, match_i8_between);
int_match_kernels!(u8, u8,
    match_u8_equal, match_u8_not_equal, match_u8_less, match_u8_less_equal,
    match_u8_greater, match_u8_greater_equal, match_u8_between);
int_match_kernels!(i16, u16,
    match_i16_equal, match_i16_not_equal, match_i16_less, match_i16_less_equal,
    match_i16_greater, match_i16_greater_equal, match_i16_between);
int_match_kernels!(u16, u16,
    match_u16_equal, match_u16_not_equal, match_u16_less, match_u16_less_equal,
    match_u16_greater, match_u16_greater_equal, match_u16_between);
int_match_kernels!(i32, u32,
    match_i32_equal, match_i32_not_equal, match_i32_less, match_i32_less_equal,
    match_i32_greater, match_i32_greater_equal, match_i32_between);
int_match_kernels!(u32, u32,
    match_u32_equal, match_u32_not_equal, match_u32_less, match_u32_less_equal,
    match_u32_greater, match_u32_greater_equal, match_u32_between);
int_match_kernels!(i64, u64,
    match_i64_equal, match_i64_not_equal, match_i64_less, match_i64_less_equal,
    match_i64_greater, match_i64_greater_equal, match_i64_between);
int_match_kernels!(u64, u64,
    match_u64_equal, match_u64_not_equal, match_u64_less, match_u64_less_equal,
    match_u64_greater, match_u64_greater_equal, match_u64_between);

macro_rules! float_match_kernels {
    ($t:ty,
     $equal:ident, $not_equal:ident, $less:ident, $less_equal:ident,
     $greater:ident, $greater_equal:ident, $between:ident) => {
        /// Set the output bit for every element equal to `val`. NaN elements
        /// never match, a NaN `val` matches nothing.
        pub fn $equal(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v == val, bits, mask)
        }

        /// Set the output bit for every element not equal to `val`. NaN
        /// elements always match.
        pub fn $not_equal(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v != val, bits, mask)
        }

        /// Set the output bit for every element less than `val`.
        pub fn $less(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v < val, bits, mask)
        }

        /// Set the output bit for every element less than or equal to `val`.
        pub fn $less_equal(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v <= val, bits, mask)
        }

        /// Set the output bit for every element greater than `val`.
        pub fn $greater(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v > val, bits, mask)
        }

        /// Set the output bit for every element greater than or equal to `val`.
        pub fn $greater_equal(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            match_with(src, |v| v >= val, bits, mask)
        }

        /// Set the output bit for every element in the inclusive range
        /// `[a, b]`. A NaN bound matches nothing. Panics when `a > b`
        /// (NaN bounds are unordered and do not trip the assertion).
        pub fn $between(src: &[$t], a: $t, b: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            assert!(!(a > b), "between bounds out of order");
            match_with(src, |v| v >= a && v <= b, bits, mask)
        }
    };
}

float_match_kernels!(f32,
    match_f32_equal, match_f32_not_equal, match_f32_less, match_f32_less_equal,
    match_f32_greater, match_f32_greater_equal, match_f32_between);
float_match_kernels!(f64,
    match_f64_equal, match_f64_not_equal, match_f64_less, match_f64_less_equal,
    match_f64_greater, match_f64_greater_equal, match_f64_between);
