//! Runtime capability probe and per-type kernel tables.
//!
//! The probe runs once, on first use or via [`init`], and every table
//! resolves its seven operator entries to the best tier available: AVX2 on
//! x86_64 machines that report the feature, the scalar compare-and-pack
//! kernels everywhere else. Setting the `BITSIEVE_NO_SIMD` environment
//! variable before first use pins every table to the scalar tier, which is
//! how the equivalence tests exercise both paths on one machine.
//!
//! Types with a single tier (8/16-bit integers, 256-bit integers, byte
//! strings, text, booleans) bind straight to their only kernel and are
//! re-exported here so the dispatched surface covers every column type.

use once_cell::sync::Lazy;

use crate::scalar;
#[cfg(target_arch = "x86_64")]
use crate::simd::avx2;
use crate::wide::kernels as wide;
use crate::wide::stride::Int128StrideRef;

pub use crate::scalar::{
    match_bool_between, match_bool_equal, match_bool_greater, match_bool_greater_equal,
    match_bool_less, match_bool_less_equal, match_bool_not_equal, match_bytes_between,
    match_bytes_equal, match_bytes_greater, match_bytes_greater_equal, match_bytes_less,
    match_bytes_less_equal, match_bytes_not_equal, match_str_between, match_str_equal,
    match_str_greater, match_str_greater_equal, match_str_less, match_str_less_equal,
    match_str_not_equal,
};
pub use crate::scalar::timestamp::TimestampNs;
pub use crate::wide::kernels::{
    match_i256_between, match_i256_equal, match_i256_greater, match_i256_greater_equal,
    match_i256_less, match_i256_less_equal, match_i256_not_equal,
};

/// Best kernel tier the running machine supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    Scalar,
    Avx2,
}

static CAPABILITY: Lazy<Capability> = Lazy::new(probe);

fn probe() -> Capability {
    if std::env::var_os("BITSIEVE_NO_SIMD").is_some() {
        log::info!("match kernels: scalar (BITSIEVE_NO_SIMD set)");
        return Capability::Scalar;
    }
    #[cfg(target_arch = "x86_64")]
    if is_x86_feature_detected!("avx2") {
        log::info!("match kernels: avx2");
        return Capability::Avx2;
    }
    log::info!("match kernels: scalar");
    Capability::Scalar
}

/// The tier the probe selected. Probes on first call.
pub fn capability() -> Capability {
    *CAPABILITY
}

/// Operator entries resolved for one slice element type.
pub struct KernelTable<T: Copy + 'static> {
    pub equal: fn(&[T], T, &mut [u8], Option<&[u8]>) -> i64,
    pub not_equal: fn(&[T], T, &mut [u8], Option<&[u8]>) -> i64,
    pub less: fn(&[T], T, &mut [u8], Option<&[u8]>) -> i64,
    pub less_equal: fn(&[T], T, &mut [u8], Option<&[u8]>) -> i64,
    pub greater: fn(&[T], T, &mut [u8], Option<&[u8]>) -> i64,
    pub greater_equal: fn(&[T], T, &mut [u8], Option<&[u8]>) -> i64,
    pub between: fn(&[T], T, T, &mut [u8], Option<&[u8]>) -> i64,
}

/// Operator entries for the 128-bit stride layout.
pub struct Int128KernelTable {
    pub equal: fn(Int128StrideRef<'_>, i128, &mut [u8], Option<&[u8]>) -> i64,
    pub not_equal: fn(Int128StrideRef<'_>, i128, &mut [u8], Option<&[u8]>) -> i64,
    pub less: fn(Int128StrideRef<'_>, i128, &mut [u8], Option<&[u8]>) -> i64,
    pub less_equal: fn(Int128StrideRef<'_>, i128, &mut [u8], Option<&[u8]>) -> i64,
    pub greater: fn(Int128StrideRef<'_>, i128, &mut [u8], Option<&[u8]>) -> i64,
    pub greater_equal: fn(Int128StrideRef<'_>, i128, &mut [u8], Option<&[u8]>) -> i64,
    pub between: fn(Int128StrideRef<'_>, i128, i128, &mut [u8], Option<&[u8]>) -> i64,
}

macro_rules! tier {
    ($table:ident, $m:ident,
     $eq:ident, $ne:ident, $lt:ident, $le:ident, $gt:ident, $ge:ident, $bw:ident) => {
        $table {
            equal: $m::$eq,
            not_equal: $m::$ne,
            less: $m::$lt,
            less_equal: $m::$le,
            greater: $m::$gt,
            greater_equal: $m::$ge,
            between: $m::$bw,
        }
    };
}

/// Table for a type with scalar and AVX2 tiers; the kernel names are shared
/// between the two modules, so one list resolves both arms.
macro_rules! accel_table {
    ($name:ident, $t:ty,
     $eq:ident, $ne:ident, $lt:ident, $le:ident, $gt:ident, $ge:ident, $bw:ident) => {
        static $name: Lazy<KernelTable<$t>> = Lazy::new(|| match capability() {
            #[cfg(target_arch = "x86_64")]
            Capability::Avx2 => tier!(KernelTable, avx2, $eq, $ne, $lt, $le, $gt, $ge, $bw),
            _ => tier!(KernelTable, scalar, $eq, $ne, $lt, $le, $gt, $ge, $bw),
        });
    };
}

macro_rules! scalar_table {
    ($name:ident, $t:ty,
     $eq:ident, $ne:ident, $lt:ident, $le:ident, $gt:ident, $ge:ident, $bw:ident) => {
        static $name: Lazy<KernelTable<$t>> =
            Lazy::new(|| tier!(KernelTable, scalar, $eq, $ne, $lt, $le, $gt, $ge, $bw));
    };
}

/// Public dispatched kernels for one slice element type, one per operator,
/// named the same as the tier kernels they forward to.
macro_rules! dispatch_entries {
    ($table:ident, $t:ty,
     $eq:ident, $ne:ident, $lt:ident, $le:ident, $gt:ident, $ge:ident, $bw:ident) => {
        /// Set the output bit for every element equal to `val`.
        pub fn $eq(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            ($table.equal)(src, val, bits, mask)
        }

        /// Set the output bit for every element not equal to `val`.
        pub fn $ne(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            ($table.not_equal)(src, val, bits, mask)
        }

        /// Set the output bit for every element less than `val`.
        pub fn $lt(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            ($table.less)(src, val, bits, mask)
        }

        /// Set the output bit for every element less than or equal to `val`.
        pub fn $le(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            ($table.less_equal)(src, val, bits, mask)
        }

        /// Set the output bit for every element greater than `val`.
        pub fn $gt(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            ($table.greater)(src, val, bits, mask)
        }

        /// Set the output bit for every element greater than or equal to `val`.
        pub fn $ge(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            ($table.greater_equal)(src, val, bits, mask)
        }

        /// Set the output bit for every element in the inclusive range
        /// `[a, b]`. Panics when `a > b`.
        pub fn $bw(src: &[$t], a: $t, b: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            ($table.between)(src, a, b, bits, mask)
        }
    };
}

scalar_table!(I8_KERNELS, i8,
    match_i8_equal, match_i8_not_equal, match_i8_less, match_i8_less_equal,
    match_i8_greater, match_i8_greater_equal, match_i8_between);
scalar_table!(U8_KERNELS, u8,
    match_u8_equal, match_u8_not_equal, match_u8_less, match_u8_less_equal,
    match_u8_greater, match_u8_greater_equal, match_u8_between);
scalar_table!(I16_KERNELS, i16,
    match_i16_equal, match_i16_not_equal, match_i16_less, match_i16_less_equal,
    match_i16_greater, match_i16_greater_equal, match_i16_between);
scalar_table!(U16_KERNELS, u16,
    match_u16_equal, match_u16_not_equal, match_u16_less, match_u16_less_equal,
    match_u16_greater, match_u16_greater_equal, match_u16_between);
accel_table!(I32_KERNELS, i32,
    match_i32_equal, match_i32_not_equal, match_i32_less, match_i32_less_equal,
    match_i32_greater, match_i32_greater_equal, match_i32_between);
accel_table!(U32_KERNELS, u32,
    match_u32_equal, match_u32_not_equal, match_u32_less, match_u32_less_equal,
    match_u32_greater, match_u32_greater_equal, match_u32_between);
accel_table!(I64_KERNELS, i64,
    match_i64_equal, match_i64_not_equal, match_i64_less, match_i64_less_equal,
    match_i64_greater, match_i64_greater_equal, match_i64_between);
accel_table!(U64_KERNELS, u64,
    match_u64_equal, match_u64_not_equal, match_u64_less, match_u64_less_equal,
    match_u64_greater, match_u64_greater_equal, match_u64_between);
accel_table!(F32_KERNELS, f32,
    match_f32_equal, match_f32_not_equal, match_f32_less, match_f32_less_equal,
    match_f32_greater, match_f32_greater_equal, match_f32_between);
accel_table!(F64_KERNELS, f64,
    match_f64_equal, match_f64_not_equal, match_f64_less, match_f64_less_equal,
    match_f64_greater, match_f64_greater_equal, match_f64_between);

static I128_KERNELS: Lazy<Int128KernelTable> = Lazy::new(|| match capability() {
    #[cfg(target_arch = "x86_64")]
    Capability::Avx2 => tier!(Int128KernelTable, avx2,
        match_i128_equal, match_i128_not_equal, match_i128_less, match_i128_less_equal,
        match_i128_greater, match_i128_greater_equal, match_i128_between),
    _ => tier!(Int128KernelTable, wide,
        match_i128_equal, match_i128_not_equal, match_i128_less, match_i128_less_equal,
        match_i128_greater, match_i128_greater_equal, match_i128_between),
});

dispatch_entries!(I8_KERNELS, i8,
    match_i8_equal, match_i8_not_equal, match_i8_less, match_i8_less_equal,
    match_i8_greater, match_i8_greater_equal, match_i8_between);
dispatch_entries!(U8_KERNELS, u8,
    match_u8_equal, match_u8_not_equal, match_u8_less, match_u8_less_equal,
    match_u8_greater, match_u8_greater_equal, match_u8_between);
dispatch_entries!(I16_KERNELS, i16,
    match_i16_equal, match_i16_not_equal, match_i16_less, match_i16_less_equal,
    match_i16_greater, match_i16_greater_equal, match_i16_between);
dispatch_entries!(U16_KERNELS, u16,
    match_u16_equal, match_u16_not_equal, match_u16_less, match_u16_less_equal,
    match_u16_greater, match_u16_greater_equal, match_u16_between);
dispatch_entries!(I32_KERNELS, i32,
    match_i32_equal, match_i32_not_equal, match_i32_less, match_i32_less_equal,
    match_i32_greater, match_i32_greater_equal, match_i32_between);
dispatch_entries!(U32_KERNELS, u32,
    match_u32_equal, match_u32_not_equal, match_u32_less, match_u32_less_equal,
    match_u32_greater, match_u32_greater_equal, match_u32_between);
dispatch_entries!(I64_KERNELS, i64,
    match_i64_equal, match_i64_not_equal, match_i64_less, match_i64_less_equal,
    match_i64_greater, match_i64_greater_equal, match_i64_between);
dispatch_entries!(U64_KERNELS, u64,
    match_u64_equal, match_u64_not_equal, match_u64_less, match_u64_less_equal,
    match_u64_greater, match_u64_greater_equal, match_u64_between);
dispatch_entries!(F32_KERNELS, f32,
    match_f32_equal, match_f32_not_equal, match_f32_less, match_f32_less_equal,
    match_f32_greater, match_f32_greater_equal, match_f32_between);
dispatch_entries!(F64_KERNELS, f64,
    match_f64_equal, match_f64_not_equal, match_f64_less, match_f64_less_equal,
    match_f64_greater, match_f64_greater_equal, match_f64_between);

/// Set the output bit for every 128-bit element equal to `val`.
pub fn match_i128_equal(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I128_KERNELS.equal)(src, val, bits, mask)
}

/// Set the output bit for every 128-bit element not equal to `val`.
pub fn match_i128_not_equal(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I128_KERNELS.not_equal)(src, val, bits, mask)
}

/// Set the output bit for every 128-bit element less than `val`.
pub fn match_i128_less(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I128_KERNELS.less)(src, val, bits, mask)
}

/// Set the output bit for every 128-bit element less than or equal to `val`.
pub fn match_i128_less_equal(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I128_KERNELS.less_equal)(src, val, bits, mask)
}

/// Set the output bit for every 128-bit element greater than `val`.
pub fn match_i128_greater(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I128_KERNELS.greater)(src, val, bits, mask)
}

/// Set the output bit for every 128-bit element greater than or equal to `val`.
pub fn match_i128_greater_equal(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I128_KERNELS.greater_equal)(src, val, bits, mask)
}

/// Set the output bit for every 128-bit element in the inclusive range
/// `[a, b]`. Panics when `a > b`.
pub fn match_i128_between(src: Int128StrideRef, a: i128, b: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I128_KERNELS.between)(src, a, b, bits, mask)
}

/// Set the output bit for every timestamp equal to `val`.
pub fn match_timestamp_equal(src: &[TimestampNs], val: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I64_KERNELS.equal)(src, val, bits, mask)
}

/// Set the output bit for every timestamp not equal to `val`.
pub fn match_timestamp_not_equal(src: &[TimestampNs], val: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I64_KERNELS.not_equal)(src, val, bits, mask)
}

/// Set the output bit for every timestamp before `val`.
pub fn match_timestamp_less(src: &[TimestampNs], val: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I64_KERNELS.less)(src, val, bits, mask)
}

/// Set the output bit for every timestamp at or before `val`.
pub fn match_timestamp_less_equal(src: &[TimestampNs], val: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I64_KERNELS.less_equal)(src, val, bits, mask)
}

/// Set the output bit for every timestamp after `val`.
pub fn match_timestamp_greater(src: &[TimestampNs], val: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I64_KERNELS.greater)(src, val, bits, mask)
}

/// Set the output bit for every timestamp at or after `val`.
pub fn match_timestamp_greater_equal(src: &[TimestampNs], val: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    (I64_KERNELS.greater_equal)(src, val, bits, mask)
}

/// Set the output bit for every timestamp in the inclusive range. Swapped
/// bounds are normalized rather than rejected, matching range scans that
/// accept either endpoint order.
pub fn match_timestamp_between(src: &[TimestampNs], a: TimestampNs, b: TimestampNs, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    (I64_KERNELS.between)(src, a, b, bits, mask)
}

/// Run the probe and resolve every table up front, so the first query pays
/// no dispatch cost.
pub fn init() {
    Lazy::force(&CAPABILITY);
    Lazy::force(&I8_KERNELS);
    Lazy::force(&U8_KERNELS);
    Lazy::force(&I16_KERNELS);
    Lazy::force(&U16_KERNELS);
    Lazy::force(&I32_KERNELS);
    Lazy::force(&U32_KERNELS);
    Lazy::force(&I64_KERNELS);
    Lazy::force(&U64_KERNELS);
    Lazy::force(&F32_KERNELS);
    Lazy::force(&F64_KERNELS);
    Lazy::force(&I128_KERNELS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_is_stable() {
        init();
        assert_eq!(capability(), capability());
    }

    #[test]
    fn test_dispatched_i64_equal() {
        let src: Vec<i64> = vec![0, 5, 3, 5, 7, 5, 5, 9];
        let mut bits = [0u8; 1];
        let cnt = match_i64_equal(&src, 5, &mut bits, None);
        assert_eq!(cnt, 4);
        assert_eq!(bits[0], 0b0110_1010);
    }

    #[test]
    fn test_dispatched_timestamp_between_normalizes_bounds() {
        let src: Vec<TimestampNs> = vec![10, 20, 30, 40, 50];
        let mut fwd = [0u8; 1];
        let mut rev = [0u8; 1];
        assert_eq!(
            match_timestamp_between(&src, 20, 40, &mut fwd, None),
            match_timestamp_between(&src, 40, 20, &mut rev, None)
        );
        assert_eq!(fwd, rev);
        assert_eq!(fwd[0], 0b0000_1110);
    }

    #[test]
    fn test_dispatched_i128() {
        use crate::wide::stride::Int128Stride;
        let stride = Int128Stride::from_values(&[1, -2, 3, i128::MAX, i128::MIN]);
        let mut bits = [0u8; 1];
        let cnt = match_i128_greater(stride.as_ref(), 0, &mut bits, None);
        assert_eq!(cnt, 3);
        assert_eq!(bits[0], 0b0000_1101);
    }
}
