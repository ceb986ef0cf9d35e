//! Hardware-accelerated match kernel tiers.
//!
//! Each tier exposes the same signatures as the scalar family and composes a
//! vectorized "head" pass over the aligned bulk of the buffer with a scalar
//! pass over the remaining tail. Tiers are selected by [`crate::dispatch`]
//! from the runtime capability probe, never by callers directly.

#[cfg(target_arch = "x86_64")]
pub mod avx2;
