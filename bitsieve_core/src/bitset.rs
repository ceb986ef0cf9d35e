//! Bit-field helpers shared by every match kernel.
//!
//! Selection vectors are densely packed, least-significant-bit first: bit `i`
//! lives at byte `i >> 3`, position `i & 7`. Kernels only ever set bits, so a
//! caller can OR-accumulate several kernel calls into one buffer.

/// Number of bytes required to hold a bit field of `n` bits.
#[inline(always)]
pub const fn bit_field_len(n: usize) -> usize {
    (n + 7) >> 3
}

/// Single-bit mask for position `i`.
#[inline(always)]
pub const fn bitmask(i: usize) -> u8 {
    1 << (i & 7)
}

/// Byte with exactly the low `count` bits set. `count` must be in 1..=8.
#[inline(always)]
pub const fn bytemask(count: usize) -> u8 {
    debug_assert!(count >= 1 && count <= 8);
    ((1u16 << count) - 1) as u8
}

/// Set every bit below `n` in `bits` and return `n` as the match count.
/// Used by operators that degenerate to "match everything".
pub fn fill_bit_field(bits: &mut [u8], n: usize) -> i64 {
    if n == 0 {
        return 0;
    }
    let full = n >> 3;
    for b in bits[..full].iter_mut() {
        *b = 0xff;
    }
    if n & 7 != 0 {
        bits[full] |= bytemask(n & 7);
    }
    n as i64
}

/// Like [`fill_bit_field`] but narrowed by `mask`: only positions whose mask
/// bit is set are filled and counted.
pub fn fill_bit_field_masked(bits: &mut [u8], n: usize, mask: &[u8]) -> i64 {
    let mut cnt = 0i64;
    for i in 0..n {
        if mask[i >> 3] & bitmask(i) != 0 {
            bits[i >> 3] |= bitmask(i);
            cnt += 1;
        }
    }
    cnt
}

/// Population count restricted to the first `n` bit positions of `bits`.
pub fn popcount_bit_field(bits: &[u8], n: usize) -> i64 {
    let full = n >> 3;
    let mut cnt: i64 = bits[..full].iter().map(|b| b.count_ones() as i64).sum();
    if n & 7 != 0 {
        cnt += (bits[full] & bytemask(n & 7)).count_ones() as i64;
    }
    cnt
}
