//! Portable scalar match kernels.
//!
//! Every (type, operator) pair has a kernel here; the accelerated tiers in
//! [`crate::simd`] delegate their buffer tails and all masked calls to these.
//! The shared drivers below implement the compare-and-pack convention: eight
//! independent per-lane comparisons collapsed into a single output byte via
//! shift-and-OR, so the common unmasked case never branches per bit.

pub mod boolean;
pub mod bytes;
pub mod numeric;
pub mod timestamp;

pub use boolean::*;
pub use bytes::*;
pub use numeric::*;
pub use timestamp::*;

use crate::bitset::{bit_field_len, bitmask, fill_bit_field, fill_bit_field_masked};

/// Assert the output (and mask) buffer covers `n` positions. Undersized
/// buffers are a caller contract violation and fail fast here.
#[inline(always)]
pub(crate) fn check_buffers(n: usize, bits: &[u8], mask: Option<&[u8]>) {
    assert!(
        bits.len() >= bit_field_len(n),
        "selection vector too small: {} bytes for {} positions",
        bits.len(),
        n
    );
    if let Some(mask) = mask {
        assert!(
            mask.len() >= bit_field_len(n),
            "mask too small: {} bytes for {} positions",
            mask.len(),
            n
        );
    }
}

/// Compare-and-pack driver over a slice: one packed byte per group of 8
/// elements, final partial group element-wise. Sets bits, never clears.
/// Returns the number of matches found by this call.
#[inline(always)]
pub(crate) fn match_slice<T, F>(src: &[T], pred: F, bits: &mut [u8]) -> i64
where
    T: Copy,
    F: Fn(T) -> bool,
{
    let mut cnt = 0i64;
    let mut chunks = src.chunks_exact(8);
    let mut i = 0usize;
    for chunk in chunks.by_ref() {
        let b = (pred(chunk[0]) as u8)
            | (pred(chunk[1]) as u8) << 1
            | (pred(chunk[2]) as u8) << 2
            | (pred(chunk[3]) as u8) << 3
            | (pred(chunk[4]) as u8) << 4
            | (pred(chunk[5]) as u8) << 5
            | (pred(chunk[6]) as u8) << 6
            | (pred(chunk[7]) as u8) << 7;
        bits[i] |= b;
        cnt += b.count_ones() as i64;
        i += 1;
    }
    let base = i << 3;
    for (j, &v) in chunks.remainder().iter().enumerate() {
        if pred(v) {
            let pos = base + j;
            bits[pos >> 3] |= bitmask(pos);
            cnt += 1;
        }
    }
    cnt
}

/// Element-wise driver honoring an externally supplied mask. The pack trick
/// cannot cheaply skip masked-out lanes, so masked calls always take this
/// path. Positions with a zero mask bit are left untouched.
#[inline(always)]
pub(crate) fn match_slice_masked<T, F>(src: &[T], pred: F, bits: &mut [u8], mask: &[u8]) -> i64
where
    T: Copy,
    F: Fn(T) -> bool,
{
    let mut cnt = 0i64;
    for (i, &v) in src.iter().enumerate() {
        if mask[i >> 3] & bitmask(i) == 0 {
            continue;
        }
        if pred(v) {
            bits[i >> 3] |= bitmask(i);
            cnt += 1;
        }
    }
    cnt
}

#[inline(always)]
pub(crate) fn match_with<T, F>(src: &[T], pred: F, bits: &mut [u8], mask: Option<&[u8]>) -> i64
where
    T: Copy,
    F: Fn(T) -> bool,
{
    check_buffers(src.len(), bits, mask);
    match mask {
        Some(mask) => match_slice_masked(src, pred, bits, mask),
        None => match_slice(src, pred, bits),
    }
}

/// Iterator variant of [`match_with`] for columns that are not plain slices
/// (the wide-integer stride layouts). `n` must equal the iterator length.
#[inline(always)]
pub(crate) fn match_iter<T, I, F>(n: usize, it: I, pred: F, bits: &mut [u8], mask: Option<&[u8]>) -> i64
where
    I: Iterator<Item = T>,
    F: Fn(T) -> bool,
{
    check_buffers(n, bits, mask);
    let mut cnt = 0i64;
    match mask {
        Some(mask) => {
            for (i, v) in it.enumerate() {
                if mask[i >> 3] & bitmask(i) == 0 {
                    continue;
                }
                if pred(v) {
                    bits[i >> 3] |= bitmask(i);
                    cnt += 1;
                }
            }
        }
        None => {
            let mut acc = 0u8;
            let mut i = 0usize;
            for v in it {
                acc |= (pred(v) as u8) << (i & 7);
                if i & 7 == 7 {
                    bits[i >> 3] |= acc;
                    cnt += acc.count_ones() as i64;
                    acc = 0;
                }
                i += 1;
            }
            if i & 7 != 0 {
                bits[i >> 3] |= acc;
                cnt += acc.count_ones() as i64;
            }
        }
    }
    cnt
}

/// Degenerate "match everything" outcome, narrowed by the mask if present.
#[inline]
pub(crate) fn match_all(n: usize, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    check_buffers(n, bits, mask);
    match mask {
        Some(mask) => fill_bit_field_masked(bits, n, mask),
        None => fill_bit_field(bits, n),
    }
}

/// Degenerate "match nothing" outcome. Buffer checks still apply so contract
/// violations do not go unnoticed on this path.
#[inline]
pub(crate) fn match_none(n: usize, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
    check_buffers(n, bits, mask);
    0
}
