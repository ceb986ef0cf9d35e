//! Minimal 256-bit signed integer.
//!
//! Only the surface the match kernels need: construction, ordered and
//! unsigned comparison, and wrapping addition/subtraction for the unsigned
//! range test. This is deliberately not a general arithmetic type.

use std::cmp::Ordering;

use byteorder::{BigEndian, ByteOrder};

/// 256-bit signed integer stored as four 64-bit limbs, most significant
/// first (`limbs[0]` carries the sign bit).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct I256(pub [u64; 4]);

pub const ZERO_I256: I256 = I256([0; 4]);
pub const ONE_I256: I256 = I256([0, 0, 0, 1]);
pub const MIN_I256: I256 = I256([0x8000_0000_0000_0000, 0, 0, 0]);
pub const MAX_I256: I256 = I256([0x7fff_ffff_ffff_ffff, u64::MAX, u64::MAX, u64::MAX]);

impl I256 {
    /// Build from individual limbs, most significant first. The top limb is
    /// signed; it carries the value's sign.
    #[inline]
    pub const fn from_words(w0: i64, w1: u64, w2: u64, w3: u64) -> Self {
        I256([w0 as u64, w1, w2, w3])
    }

    #[inline]
    pub const fn from_i64(v: i64) -> Self {
        let sign = if v < 0 { u64::MAX } else { 0 };
        I256([sign, sign, sign, v as u64])
    }

    #[inline]
    pub const fn from_i128(v: i128) -> Self {
        let sign = if v < 0 { u64::MAX } else { 0 };
        I256([sign, sign, (v >> 64) as u64, v as u64])
    }

    /// Decode from 32 big-endian bytes.
    pub fn from_be_bytes(buf: &[u8; 32]) -> Self {
        I256([
            BigEndian::read_u64(&buf[0..8]),
            BigEndian::read_u64(&buf[8..16]),
            BigEndian::read_u64(&buf[16..24]),
            BigEndian::read_u64(&buf[24..32]),
        ])
    }

    /// Encode to 32 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut buf = [0u8; 32];
        BigEndian::write_u64(&mut buf[0..8], self.0[0]);
        BigEndian::write_u64(&mut buf[8..16], self.0[1]);
        BigEndian::write_u64(&mut buf[16..24], self.0[2]);
        BigEndian::write_u64(&mut buf[24..32], self.0[3]);
        buf
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u64; 4]
    }

    /// -1, 0 or +1 under two's-complement interpretation.
    #[inline]
    pub fn sign(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.0[0] >> 63 == 1 {
            -1
        } else {
            1
        }
    }

    /// The low 128 bits, reinterpreted as a signed value.
    #[inline]
    pub fn low_i128(&self) -> i128 {
        (((self.0[2] as u128) << 64) | self.0[3] as u128) as i128
    }

    /// Limb-wise comparison of the raw bit patterns, i.e. the unsigned order.
    /// Used by the wraparound range test, where the sign bit is just another
    /// magnitude bit.
    #[inline]
    pub fn cmp_unsigned(&self, other: &I256) -> Ordering {
        self.0.cmp(&other.0)
    }

    #[inline]
    pub fn wrapping_add(self, y: I256) -> I256 {
        let mut z = [0u64; 4];
        let mut carry = 0u64;
        for i in (0..4).rev() {
            let sum = self.0[i] as u128 + y.0[i] as u128 + carry as u128;
            z[i] = sum as u64;
            carry = (sum >> 64) as u64;
        }
        I256(z)
    }

    #[inline]
    pub fn wrapping_sub(self, y: I256) -> I256 {
        let mut z = [0u64; 4];
        let mut borrow = 0u64;
        for i in (0..4).rev() {
            let (d, b1) = self.0[i].overflowing_sub(y.0[i]);
            let (d, b2) = d.overflowing_sub(borrow);
            z[i] = d;
            borrow = (b1 | b2) as u64;
        }
        I256(z)
    }
}

impl Ord for I256 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // flip the sign bit of the top limb, then the limbs order unsigned
        let a = self.0[0] ^ (1 << 63);
        let b = other.0[0] ^ (1 << 63);
        a.cmp(&b).then_with(|| self.0[1..].cmp(&other.0[1..]))
    }
}

impl PartialOrd for I256 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for I256 {
    fn from(v: i64) -> Self {
        I256::from_i64(v)
    }
}

impl From<i128> for I256 {
    fn from(v: i128) -> Self {
        I256::from_i128(v)
    }
}
