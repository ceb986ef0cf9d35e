//! Struct-of-arrays ("stride") layouts for wide-integer columns.
//!
//! A 128-bit column is kept as two parallel limb arrays and a 256-bit column
//! as four, each array holding one limb from every element in order. Nothing
//! about the values depends on this shape; it exists so a vector kernel can
//! load "all the high words" and "all the low words" as contiguous registers.

use itertools::izip;

use super::int256::I256;

/// 128-bit column split into parallel high/low limb arrays. The high limb is
/// signed and carries each element's sign.
#[derive(Clone, Debug, Default)]
pub struct Int128Stride {
    pub hi: Vec<i64>,
    pub lo: Vec<u64>,
}

impl Int128Stride {
    pub fn with_capacity(n: usize) -> Self {
        Int128Stride {
            hi: Vec::with_capacity(n),
            lo: Vec::with_capacity(n),
        }
    }

    pub fn from_values(src: &[i128]) -> Self {
        let mut s = Self::with_capacity(src.len());
        for &v in src {
            s.push(v);
        }
        s
    }

    #[inline]
    pub fn push(&mut self, v: i128) {
        self.hi.push((v >> 64) as i64);
        self.lo.push(v as u64);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hi.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hi.is_empty()
    }

    /// Reassemble the logical value at index `i`.
    #[inline]
    pub fn get(&self, i: usize) -> i128 {
        self.as_ref().get(i)
    }

    #[inline]
    pub fn as_ref(&self) -> Int128StrideRef<'_> {
        Int128StrideRef {
            hi: &self.hi,
            lo: &self.lo,
        }
    }

    /// Logically sliced view starting at `offset`.
    #[inline]
    pub fn tail(&self, offset: usize) -> Int128StrideRef<'_> {
        self.as_ref().tail(offset)
    }
}

/// Borrowed view of an [`Int128Stride`].
#[derive(Clone, Copy, Debug)]
pub struct Int128StrideRef<'a> {
    pub hi: &'a [i64],
    pub lo: &'a [u64],
}

impl<'a> Int128StrideRef<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.hi.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hi.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> i128 {
        ((self.hi[i] as i128) << 64) | self.lo[i] as i128
    }

    #[inline]
    pub fn tail(&self, offset: usize) -> Int128StrideRef<'a> {
        Int128StrideRef {
            hi: &self.hi[offset..],
            lo: &self.lo[offset..],
        }
    }

    /// Iterate the reassembled logical values in order.
    #[inline]
    pub fn values(self) -> impl Iterator<Item = i128> + 'a {
        izip!(self.hi, self.lo).map(|(&h, &l)| ((h as i128) << 64) | l as i128)
    }
}

/// 256-bit column split into four parallel limb arrays, most significant
/// first. `w0` is signed and carries each element's sign.
#[derive(Clone, Debug, Default)]
pub struct I256Stride {
    pub w0: Vec<i64>,
    pub w1: Vec<u64>,
    pub w2: Vec<u64>,
    pub w3: Vec<u64>,
}

impl I256Stride {
    pub fn with_capacity(n: usize) -> Self {
        I256Stride {
            w0: Vec::with_capacity(n),
            w1: Vec::with_capacity(n),
            w2: Vec::with_capacity(n),
            w3: Vec::with_capacity(n),
        }
    }

    pub fn from_values(src: &[I256]) -> Self {
        let mut s = Self::with_capacity(src.len());
        for &v in src {
            s.push(v);
        }
        s
    }

    #[inline]
    pub fn push(&mut self, v: I256) {
        self.w0.push(v.0[0] as i64);
        self.w1.push(v.0[1]);
        self.w2.push(v.0[2]);
        self.w3.push(v.0[3]);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.w0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w0.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> I256 {
        self.as_ref().get(i)
    }

    #[inline]
    pub fn as_ref(&self) -> I256StrideRef<'_> {
        I256StrideRef {
            w0: &self.w0,
            w1: &self.w1,
            w2: &self.w2,
            w3: &self.w3,
        }
    }

    /// Logically sliced view starting at `offset`.
    #[inline]
    pub fn tail(&self, offset: usize) -> I256StrideRef<'_> {
        self.as_ref().tail(offset)
    }
}

/// Borrowed view of an [`I256Stride`].
#[derive(Clone, Copy, Debug)]
pub struct I256StrideRef<'a> {
    pub w0: &'a [i64],
    pub w1: &'a [u64],
    pub w2: &'a [u64],
    pub w3: &'a [u64],
}

impl<'a> I256StrideRef<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.w0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w0.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> I256 {
        I256::from_words(self.w0[i], self.w1[i], self.w2[i], self.w3[i])
    }

    #[inline]
    pub fn tail(&self, offset: usize) -> I256StrideRef<'a> {
        I256StrideRef {
            w0: &self.w0[offset..],
            w1: &self.w1[offset..],
            w2: &self.w2[offset..],
            w3: &self.w3[offset..],
        }
    }

    /// Iterate the reassembled logical values in order.
    #[inline]
    pub fn values(self) -> impl Iterator<Item = I256> + 'a {
        izip!(self.w0, self.w1, self.w2, self.w3)
            .map(|(&w0, &w1, &w2, &w3)| I256::from_words(w0, w1, w2, w3))
    }
}
