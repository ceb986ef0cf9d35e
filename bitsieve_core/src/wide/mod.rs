//! Wide-integer (128/256-bit) column support.
//!
//! Wide values are stored in a struct-of-arrays "stride" layout: one
//! contiguous array per limb position, so a vector kernel can load all the
//! high words and all the low words as separate registers. The kernels here
//! are the portable scalar tier over that layout.

pub mod int256;
pub mod kernels;
pub mod stride;

pub use int256::I256;
pub use stride::{I256Stride, I256StrideRef, Int128Stride, Int128StrideRef};
