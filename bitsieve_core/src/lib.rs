pub mod bitset;
pub mod dispatch;
pub mod scalar;
pub mod simd;
pub mod wide;

pub use dispatch::*;
pub use wide::stride::{I256Stride, I256StrideRef, Int128Stride, Int128StrideRef};
pub use wide::I256;
