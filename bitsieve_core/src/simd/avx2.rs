//! AVX2 match kernels for 32/64-bit numerics and the 128-bit stride layout.
//!
//! Every kernel processes eight elements per iteration (one 8-lane load for
//! 32-bit types, two 4-lane loads for 64-bit and wide types), extracts the
//! comparison mask into one output byte, and ORs it into the selection
//! vector. The remaining `n % 8` elements and the whole call when a mask is
//! supplied go to the scalar kernel, writing from byte offset `head / 8` so
//! head and tail bit ranges never overlap. Unsigned comparisons use the
//! sign-bias trick (XOR the sign bit, then compare signed); float compares
//! use ordered predicates so NaN semantics are identical to the scalar tier.
//!
//! Callers without AVX2 fall through to the scalar kernel, so these entry
//! points are safe on any x86_64 machine; the dispatch layer only installs
//! them when the probe reports AVX2.

use std::arch::x86_64::*;

use crate::scalar;
use crate::wide::kernels as wide;
use crate::wide::stride::Int128StrideRef;

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn splat_i32(v: i32) -> __m256i {
    _mm256_set1_epi32(v)
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn splat_u32(v: u32) -> __m256i {
    _mm256_set1_epi32(v as i32)
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn splat_i64(v: i64) -> __m256i {
    _mm256_set1_epi64x(v)
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn splat_u64(v: u64) -> __m256i {
    _mm256_set1_epi64x(v as i64)
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn splat_f32(v: f32) -> __m256 {
    _mm256_set1_ps(v)
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn splat_f64(v: f64) -> __m256d {
    _mm256_set1_pd(v)
}

// ---------------------------------------------------------------------------
// per-type compare primitives: load 8 elements at `p`, return one packed byte
//

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn eq8_i32(p: *const i32, val: __m256i) -> u8 {
    let v = _mm256_loadu_si256(p as *const __m256i);
    (_mm256_movemask_ps(_mm256_castsi256_ps(_mm256_cmpeq_epi32(v, val))) & 0xff) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn gt8_i32(p: *const i32, val: __m256i) -> u8 {
    let v = _mm256_loadu_si256(p as *const __m256i);
    (_mm256_movemask_ps(_mm256_castsi256_ps(_mm256_cmpgt_epi32(v, val))) & 0xff) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn lt8_i32(p: *const i32, val: __m256i) -> u8 {
    let v = _mm256_loadu_si256(p as *const __m256i);
    (_mm256_movemask_ps(_mm256_castsi256_ps(_mm256_cmpgt_epi32(val, v))) & 0xff) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn gt8_u32(p: *const u32, val: __m256i) -> u8 {
    let bias = _mm256_set1_epi32(i32::MIN);
    let v = _mm256_xor_si256(_mm256_loadu_si256(p as *const __m256i), bias);
    let w = _mm256_xor_si256(val, bias);
    (_mm256_movemask_ps(_mm256_castsi256_ps(_mm256_cmpgt_epi32(v, w))) & 0xff) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn lt8_u32(p: *const u32, val: __m256i) -> u8 {
    let bias = _mm256_set1_epi32(i32::MIN);
    let v = _mm256_xor_si256(_mm256_loadu_si256(p as *const __m256i), bias);
    let w = _mm256_xor_si256(val, bias);
    (_mm256_movemask_ps(_mm256_castsi256_ps(_mm256_cmpgt_epi32(w, v))) & 0xff) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn eq8_u32(p: *const u32, val: __m256i) -> u8 {
    eq8_i32(p as *const i32, val)
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn eq8_i64(p: *const i64, val: __m256i) -> u8 {
    let m0 = _mm256_movemask_pd(_mm256_castsi256_pd(_mm256_cmpeq_epi64(
        _mm256_loadu_si256(p as *const __m256i),
        val,
    )));
    let m1 = _mm256_movemask_pd(_mm256_castsi256_pd(_mm256_cmpeq_epi64(
        _mm256_loadu_si256(p.add(4) as *const __m256i),
        val,
    )));
    (m0 | (m1 << 4)) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn gt8_i64(p: *const i64, val: __m256i) -> u8 {
    let m0 = _mm256_movemask_pd(_mm256_castsi256_pd(_mm256_cmpgt_epi64(
        _mm256_loadu_si256(p as *const __m256i),
        val,
    )));
    let m1 = _mm256_movemask_pd(_mm256_castsi256_pd(_mm256_cmpgt_epi64(
        _mm256_loadu_si256(p.add(4) as *const __m256i),
        val,
    )));
    (m0 | (m1 << 4)) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn lt8_i64(p: *const i64, val: __m256i) -> u8 {
    let m0 = _mm256_movemask_pd(_mm256_castsi256_pd(_mm256_cmpgt_epi64(
        val,
        _mm256_loadu_si256(p as *const __m256i),
    )));
    let m1 = _mm256_movemask_pd(_mm256_castsi256_pd(_mm256_cmpgt_epi64(
        val,
        _mm256_loadu_si256(p.add(4) as *const __m256i),
    )));
    (m0 | (m1 << 4)) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn eq8_u64(p: *const u64, val: __m256i) -> u8 {
    eq8_i64(p as *const i64, val)
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn gt8_u64(p: *const u64, val: __m256i) -> u8 {
    let bias = _mm256_set1_epi64x(i64::MIN);
    let w = _mm256_xor_si256(val, bias);
    let v0 = _mm256_xor_si256(_mm256_loadu_si256(p as *const __m256i), bias);
    let v1 = _mm256_xor_si256(_mm256_loadu_si256(p.add(4) as *const __m256i), bias);
    let m0 = _mm256_movemask_pd(_mm256_castsi256_pd(_mm256_cmpgt_epi64(v0, w)));
    let m1 = _mm256_movemask_pd(_mm256_castsi256_pd(_mm256_cmpgt_epi64(v1, w)));
    (m0 | (m1 << 4)) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn lt8_u64(p: *const u64, val: __m256i) -> u8 {
    let bias = _mm256_set1_epi64x(i64::MIN);
    let w = _mm256_xor_si256(val, bias);
    let v0 = _mm256_xor_si256(_mm256_loadu_si256(p as *const __m256i), bias);
    let v1 = _mm256_xor_si256(_mm256_loadu_si256(p.add(4) as *const __m256i), bias);
    let m0 = _mm256_movemask_pd(_mm256_castsi256_pd(_mm256_cmpgt_epi64(w, v0)));
    let m1 = _mm256_movemask_pd(_mm256_castsi256_pd(_mm256_cmpgt_epi64(w, v1)));
    (m0 | (m1 << 4)) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn cmp8_f32<const IMM: i32>(p: *const f32, val: __m256) -> u8 {
    let v = _mm256_loadu_ps(p);
    (_mm256_movemask_ps(_mm256_cmp_ps::<IMM>(v, val)) & 0xff) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn cmp8_f64<const IMM: i32>(p: *const f64, val: __m256d) -> u8 {
    let m0 = _mm256_movemask_pd(_mm256_cmp_pd::<IMM>(_mm256_loadu_pd(p), val));
    let m1 = _mm256_movemask_pd(_mm256_cmp_pd::<IMM>(_mm256_loadu_pd(p.add(4)), val));
    (m0 | (m1 << 4)) as u8
}

// 128-bit stride primitives: compare 4 lanes from the hi/lo limb arrays.

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn eq4_i128(h: *const i64, l: *const u64, vhi: __m256i, vlo: __m256i) -> i32 {
    let hv = _mm256_loadu_si256(h as *const __m256i);
    let lv = _mm256_loadu_si256(l as *const __m256i);
    let m = _mm256_and_si256(_mm256_cmpeq_epi64(hv, vhi), _mm256_cmpeq_epi64(lv, vlo));
    _mm256_movemask_pd(_mm256_castsi256_pd(m))
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn lt4_i128(h: *const i64, l: *const u64, vhi: __m256i, vlo: __m256i) -> i32 {
    let hv = _mm256_loadu_si256(h as *const __m256i);
    let lv = _mm256_loadu_si256(l as *const __m256i);
    let bias = _mm256_set1_epi64x(i64::MIN);
    // v < val: hi below, or hi equal and lo below unsigned
    let hi_lt = _mm256_cmpgt_epi64(vhi, hv);
    let hi_eq = _mm256_cmpeq_epi64(hv, vhi);
    let lo_lt = _mm256_cmpgt_epi64(_mm256_xor_si256(vlo, bias), _mm256_xor_si256(lv, bias));
    _mm256_movemask_pd(_mm256_castsi256_pd(_mm256_or_si256(
        hi_lt,
        _mm256_and_si256(hi_eq, lo_lt),
    )))
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn gt4_i128(h: *const i64, l: *const u64, vhi: __m256i, vlo: __m256i) -> i32 {
    let hv = _mm256_loadu_si256(h as *const __m256i);
    let lv = _mm256_loadu_si256(l as *const __m256i);
    let bias = _mm256_set1_epi64x(i64::MIN);
    let hi_gt = _mm256_cmpgt_epi64(hv, vhi);
    let hi_eq = _mm256_cmpeq_epi64(hv, vhi);
    let lo_gt = _mm256_cmpgt_epi64(_mm256_xor_si256(lv, bias), _mm256_xor_si256(vlo, bias));
    _mm256_movemask_pd(_mm256_castsi256_pd(_mm256_or_si256(
        hi_gt,
        _mm256_and_si256(hi_eq, lo_gt),
    )))
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn eq8_i128(h: *const i64, l: *const u64, vhi: __m256i, vlo: __m256i) -> u8 {
    (eq4_i128(h, l, vhi, vlo) | (eq4_i128(h.add(4), l.add(4), vhi, vlo) << 4)) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn lt8_i128(h: *const i64, l: *const u64, vhi: __m256i, vlo: __m256i) -> u8 {
    (lt4_i128(h, l, vhi, vlo) | (lt4_i128(h.add(4), l.add(4), vhi, vlo) << 4)) as u8
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
#[target_feature(enable = "avx2")]
unsafe fn gt8_i128(h: *const i64, l: *const u64, vhi: __m256i, vlo: __m256i) -> u8 {
    (gt4_i128(h, l, vhi, vlo) | (gt4_i128(h.add(4), l.add(4), vhi, vlo) << 4)) as u8
}

// ---------------------------------------------------------------------------
// head loops and public kernels
//

/// Generate the aligned-head loop for a plain-slice kernel: one packed byte
/// per 8 elements, OR'd into the selection vector.
macro_rules! avx2_head {
    ($core:ident, $t:ty, [$($arg:ident : $argty:ty),+], $p:ident, $byte:expr) => {
        #[allow(unsafe_op_in_unsafe_fn)]
        #[target_feature(enable = "avx2")]
        unsafe fn $core(src: &[$t], bits: &mut [u8], $($arg: $argty),+) -> i64 {
            let head = src.len() & !7;
            let mut cnt = 0i64;
            let mut i = 0usize;
            while i < head {
                let $p = src.as_ptr().add(i);
                let b: u8 = $byte;
                bits[i >> 3] |= b;
                cnt += b.count_ones() as i64;
                i += 8;
            }
            cnt
        }
    };
}

/// Generate a public single-value kernel: mask and non-AVX2 calls fall back
/// to the scalar kernel, the head loop handles the aligned bulk, and the
/// scalar kernel finishes the tail at byte offset `head / 8`.
macro_rules! avx2_match {
    ($name:ident, $t:ty, $scalar:path, $core:ident, $splat:ident) => {
        #[doc = concat!("AVX2 head/tail form of [`scalar::", stringify!($name), "`].")]
        pub fn $name(src: &[$t], val: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            if mask.is_some() || !is_x86_feature_detected!("avx2") {
                return $scalar(src, val, bits, mask);
            }
            crate::scalar::check_buffers(src.len(), bits, None);
            let head = src.len() & !7;
            let cnt = unsafe { $core(src, bits, $splat(val)) };
            cnt + $scalar(&src[head..], val, &mut bits[head >> 3..], None)
        }
    };
}

/// Same as [`avx2_match!`] for the two-value `between` kernels. Bound-order
/// checking lives in the scalar kernel, which always runs for the tail.
macro_rules! avx2_match_between {
    ($name:ident, $t:ty, $scalar:path, $core:ident, $splat:ident) => {
        #[doc = concat!("AVX2 head/tail form of [`scalar::", stringify!($name), "`].")]
        pub fn $name(src: &[$t], a: $t, b: $t, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            if mask.is_some() || !is_x86_feature_detected!("avx2") {
                return $scalar(src, a, b, bits, mask);
            }
            crate::scalar::check_buffers(src.len(), bits, None);
            let head = src.len() & !7;
            let tail_cnt = $scalar(&src[head..], a, b, &mut bits[head >> 3..], None);
            tail_cnt + unsafe { $core(src, bits, $splat(a), $splat(b)) }
        }
    };
}

avx2_head!(i32_equal_head, i32, [val: __m256i], p, eq8_i32(p, val));
avx2_head!(i32_not_equal_head, i32, [val: __m256i], p, !eq8_i32(p, val));
avx2_head!(i32_less_head, i32, [val: __m256i], p, lt8_i32(p, val));
avx2_head!(i32_less_equal_head, i32, [val: __m256i], p, !gt8_i32(p, val));
avx2_head!(i32_greater_head, i32, [val: __m256i], p, gt8_i32(p, val));
avx2_head!(i32_greater_equal_head, i32, [val: __m256i], p, !lt8_i32(p, val));
avx2_head!(i32_between_head, i32, [lo: __m256i, hi: __m256i], p, !(lt8_i32(p, lo) | gt8_i32(p, hi)));

avx2_match!(match_i32_equal, i32, scalar::match_i32_equal, i32_equal_head, splat_i32);
avx2_match!(match_i32_not_equal, i32, scalar::match_i32_not_equal, i32_not_equal_head, splat_i32);
avx2_match!(match_i32_less, i32, scalar::match_i32_less, i32_less_head, splat_i32);
avx2_match!(match_i32_less_equal, i32, scalar::match_i32_less_equal, i32_less_equal_head, splat_i32);
avx2_match!(match_i32_greater, i32, scalar::match_i32_greater, i32_greater_head, splat_i32);
avx2_match!(match_i32_greater_equal, i32, scalar::match_i32_greater_equal, i32_greater_equal_head, splat_i32);
avx2_match_between!(match_i32_between, i32, scalar::match_i32_between, i32_between_head, splat_i32);

avx2_head!(u32_equal_head, u32, [val: __m256i], p, eq8_u32(p, val));
avx2_head!(u32_not_equal_head, u32, [val: __m256i], p, !eq8_u32(p, val));
avx2_head!(u32_less_head, u32, [val: __m256i], p, lt8_u32(p, val));
avx2_head!(u32_less_equal_head, u32, [val: __m256i], p, !gt8_u32(p, val));
avx2_head!(u32_greater_head, u32, [val: __m256i], p, gt8_u32(p, val));
avx2_head!(u32_greater_equal_head, u32, [val: __m256i], p, !lt8_u32(p, val));
avx2_head!(u32_between_head, u32, [lo: __m256i, hi: __m256i], p, !(lt8_u32(p, lo) | gt8_u32(p, hi)));

avx2_match!(match_u32_equal, u32, scalar::match_u32_equal, u32_equal_head, splat_u32);
avx2_match!(match_u32_not_equal, u32, scalar::match_u32_not_equal, u32_not_equal_head, splat_u32);
avx2_match!(match_u32_less, u32, scalar::match_u32_less, u32_less_head, splat_u32);
avx2_match!(match_u32_less_equal, u32, scalar::match_u32_less_equal, u32_less_equal_head, splat_u32);
avx2_match!(match_u32_greater, u32, scalar::match_u32_greater, u32_greater_head, splat_u32);
avx2_match!(match_u32_greater_equal, u32, scalar::match_u32_greater_equal, u32_greater_equal_head, splat_u32);
avx2_match_between!(match_u32_between, u32, scalar::match_u32_between, u32_between_head, splat_u32);

avx2_head!(i64_equal_head, i64, [val: __m256i], p, eq8_i64(p, val));
avx2_head!(i64_not_equal_head, i64, [val: __m256i], p, !eq8_i64(p, val));
avx2_head!(i64_less_head, i64, [val: __m256i], p, lt8_i64(p, val));
avx2_head!(i64_less_equal_head, i64, [val: __m256i], p, !gt8_i64(p, val));
avx2_head!(i64_greater_head, i64, [val: __m256i], p, gt8_i64(p, val));
avx2_head!(i64_greater_equal_head, i64, [val: __m256i], p, !lt8_i64(p, val));
avx2_head!(i64_between_head, i64, [lo: __m256i, hi: __m256i], p, !(lt8_i64(p, lo) | gt8_i64(p, hi)));

avx2_match!(match_i64_equal, i64, scalar::match_i64_equal, i64_equal_head, splat_i64);
avx2_match!(match_i64_not_equal, i64, scalar::match_i64_not_equal, i64_not_equal_head, splat_i64);
avx2_match!(match_i64_less, i64, scalar::match_i64_less, i64_less_head, splat_i64);
avx2_match!(match_i64_less_equal, i64, scalar::match_i64_less_equal, i64_less_equal_head, splat_i64);
avx2_match!(match_i64_greater, i64, scalar::match_i64_greater, i64_greater_head, splat_i64);
avx2_match!(match_i64_greater_equal, i64, scalar::match_i64_greater_equal, i64_greater_equal_head, splat_i64);
avx2_match_between!(match_i64_between, i64, scalar::match_i64_between, i64_between_head, splat_i64);

avx2_head!(u64_equal_head, u64, [val: __m256i], p, eq8_u64(p, val));
avx2_head!(u64_not_equal_head, u64, [val: __m256i], p, !eq8_u64(p, val));
avx2_head!(u64_less_head, u64, [val: __m256i], p, lt8_u64(p, val));
avx2_head!(u64_less_equal_head, u64, [val: __m256i], p, !gt8_u64(p, val));
avx2_head!(u64_greater_head, u64, [val: __m256i], p, gt8_u64(p, val));
avx2_head!(u64_greater_equal_head, u64, [val: __m256i], p, !lt8_u64(p, val));
avx2_head!(u64_between_head, u64, [lo: __m256i, hi: __m256i], p, !(lt8_u64(p, lo) | gt8_u64(p, hi)));

avx2_match!(match_u64_equal, u64, scalar::match_u64_equal, u64_equal_head, splat_u64);
avx2_match!(match_u64_not_equal, u64, scalar::match_u64_not_equal, u64_not_equal_head, splat_u64);
avx2_match!(match_u64_less, u64, scalar::match_u64_less, u64_less_head, splat_u64);
avx2_match!(match_u64_less_equal, u64, scalar::match_u64_less_equal, u64_less_equal_head, splat_u64);
avx2_match!(match_u64_greater, u64, scalar::match_u64_greater, u64_greater_head, splat_u64);
avx2_match!(match_u64_greater_equal, u64, scalar::match_u64_greater_equal, u64_greater_equal_head, splat_u64);
avx2_match_between!(match_u64_between, u64, scalar::match_u64_between, u64_between_head, splat_u64);

avx2_head!(f32_equal_head, f32, [val: __m256], p, cmp8_f32::<_CMP_EQ_OQ>(p, val));
avx2_head!(f32_not_equal_head, f32, [val: __m256], p, cmp8_f32::<_CMP_NEQ_UQ>(p, val));
avx2_head!(f32_less_head, f32, [val: __m256], p, cmp8_f32::<_CMP_LT_OQ>(p, val));
avx2_head!(f32_less_equal_head, f32, [val: __m256], p, cmp8_f32::<_CMP_LE_OQ>(p, val));
avx2_head!(f32_greater_head, f32, [val: __m256], p, cmp8_f32::<_CMP_GT_OQ>(p, val));
avx2_head!(f32_greater_equal_head, f32, [val: __m256], p, cmp8_f32::<_CMP_GE_OQ>(p, val));
avx2_head!(f32_between_head, f32, [lo: __m256, hi: __m256], p,
    cmp8_f32::<_CMP_GE_OQ>(p, lo) & cmp8_f32::<_CMP_LE_OQ>(p, hi));

avx2_match!(match_f32_equal, f32, scalar::match_f32_equal, f32_equal_head, splat_f32);
avx2_match!(match_f32_not_equal, f32, scalar::match_f32_not_equal, f32_not_equal_head, splat_f32);
avx2_match!(match_f32_less, f32, scalar::match_f32_less, f32_less_head, splat_f32);
avx2_match!(match_f32_less_equal, f32, scalar::match_f32_less_equal, f32_less_equal_head, splat_f32);
avx2_match!(match_f32_greater, f32, scalar::match_f32_greater, f32_greater_head, splat_f32);
avx2_match!(match_f32_greater_equal, f32, scalar::match_f32_greater_equal, f32_greater_equal_head, splat_f32);
avx2_match_between!(match_f32_between, f32, scalar::match_f32_between, f32_between_head, splat_f32);

avx2_head!(f64_equal_head, f64, [val: __m256d], p, cmp8_f64::<_CMP_EQ_OQ>(p, val));
avx2_head!(f64_not_equal_head, f64, [val: __m256d], p, cmp8_f64::<_CMP_NEQ_UQ>(p, val));
avx2_head!(f64_less_head, f64, [val: __m256d], p, cmp8_f64::<_CMP_LT_OQ>(p, val));
avx2_head!(f64_less_equal_head, f64, [val: __m256d], p, cmp8_f64::<_CMP_LE_OQ>(p, val));
avx2_head!(f64_greater_head, f64, [val: __m256d], p, cmp8_f64::<_CMP_GT_OQ>(p, val));
avx2_head!(f64_greater_equal_head, f64, [val: __m256d], p, cmp8_f64::<_CMP_GE_OQ>(p, val));
avx2_head!(f64_between_head, f64, [lo: __m256d, hi: __m256d], p,
    cmp8_f64::<_CMP_GE_OQ>(p, lo) & cmp8_f64::<_CMP_LE_OQ>(p, hi));

avx2_match!(match_f64_equal, f64, scalar::match_f64_equal, f64_equal_head, splat_f64);
avx2_match!(match_f64_not_equal, f64, scalar::match_f64_not_equal, f64_not_equal_head, splat_f64);
avx2_match!(match_f64_less, f64, scalar::match_f64_less, f64_less_head, splat_f64);
avx2_match!(match_f64_less_equal, f64, scalar::match_f64_less_equal, f64_less_equal_head, splat_f64);
avx2_match!(match_f64_greater, f64, scalar::match_f64_greater, f64_greater_head, splat_f64);
avx2_match!(match_f64_greater_equal, f64, scalar::match_f64_greater_equal, f64_greater_equal_head, splat_f64);
avx2_match_between!(match_f64_between, f64, scalar::match_f64_between, f64_between_head, splat_f64);

// ---------------------------------------------------------------------------
// 128-bit stride kernels: load the hi and lo limb vectors separately instead
// of reconstructing logical values.
//

macro_rules! avx2_head_i128 {
    ($core:ident, [$($arg:ident : $argty:ty),+], $h:ident, $l:ident, $byte:expr) => {
        #[allow(unsafe_op_in_unsafe_fn)]
        #[target_feature(enable = "avx2")]
        unsafe fn $core(hi: &[i64], lo: &[u64], bits: &mut [u8], $($arg: $argty),+) -> i64 {
            let head = hi.len() & !7;
            let mut cnt = 0i64;
            let mut i = 0usize;
            while i < head {
                let $h = hi.as_ptr().add(i);
                let $l = lo.as_ptr().add(i);
                let b: u8 = $byte;
                bits[i >> 3] |= b;
                cnt += b.count_ones() as i64;
                i += 8;
            }
            cnt
        }
    };
}

macro_rules! avx2_match_i128 {
    ($name:ident, $scalar:path, $core:ident) => {
        #[doc = concat!("AVX2 head/tail form of [`wide::", stringify!($name), "`].")]
        pub fn $name(src: Int128StrideRef, val: i128, bits: &mut [u8], mask: Option<&[u8]>) -> i64 {
            if mask.is_some() || !is_x86_feature_detected!("avx2") {
                return $scalar(src, val, bits, mask);
            }
            crate::scalar::check_buffers(src.len(), bits, None);
            let head = src.len() & !7;
            let cnt = unsafe {
                $core(src.hi, src.lo, bits, splat_i64((val >> 64) as i64), splat_u64(val as u64))
            };
            cnt + $scalar(src.tail(head), val, &mut bits[head >> 3..], None)
        }
    };
}

avx2_head_i128!(i128_equal_head, [vhi: __m256i, vlo: __m256i], h, l, eq8_i128(h, l, vhi, vlo));
avx2_head_i128!(i128_not_equal_head, [vhi: __m256i, vlo: __m256i], h, l, !eq8_i128(h, l, vhi, vlo));
avx2_head_i128!(i128_less_head, [vhi: __m256i, vlo: __m256i], h, l, lt8_i128(h, l, vhi, vlo));
avx2_head_i128!(i128_less_equal_head, [vhi: __m256i, vlo: __m256i], h, l, !gt8_i128(h, l, vhi, vlo));
avx2_head_i128!(i128_greater_head, [vhi: __m256i, vlo: __m256i], h, l, gt8_i128(h, l, vhi, vlo));
avx2_head_i128!(i128_greater_equal_head, [vhi: __m256i, vlo: __m256i], h, l, !lt8_i128(h, l, vhi, vlo));
avx2_head_i128!(i128_between_head,
    [ahi: __m256i, alo: __m256i, bhi: __m256i, blo: __m256i], h, l,
    !(lt8_i128(h, l, ahi, alo) | gt8_i128(h, l, bhi, blo)));

avx2_match_i128!(match_i128_equal, wide::match_i128_equal, i128_equal_head);
avx2_match_i128!(match_i128_not_equal, wide::match_i128_not_equal, i128_not_equal_head);
avx2_match_i128!(match_i128_less, wide::match_i128_less, i128_less_head);
avx2_match_i128!(match_i128_less_equal, wide::match_i128_less_equal, i128_less_equal_head);
avx2_match_i128!(match_i128_greater, wide::match_i128_greater, i128_greater_head);
avx2_match_i128!(match_i128_greater_equal, wide::match_i128_greater_equal, i128_greater_equal_head);

/// AVX2 head/tail form of [`wide::match_i128_between`].
pub fn match_i128_between(
    src: Int128StrideRef,
    a: i128,
    b: i128,
    bits: &mut [u8],
    mask: Option<&[u8]>,
) -> i64 {
    if mask.is_some() || !is_x86_feature_detected!("avx2") {
        return wide::match_i128_between(src, a, b, bits, mask);
    }
    crate::scalar::check_buffers(src.len(), bits, None);
    let head = src.len() & !7;
    // the scalar tail call also enforces a <= b
    let tail_cnt = wide::match_i128_between(src.tail(head), a, b, &mut bits[head >> 3..], None);
    tail_cnt
        + unsafe {
            i128_between_head(
                src.hi,
                src.lo,
                bits,
                splat_i64((a >> 64) as i64),
                splat_u64(a as u64),
                splat_i64((b >> 64) as i64),
                splat_u64(b as u64),
            )
        }
}
