//! Cross-tier equivalence and selection-vector invariant tests.
//!
//! Every dispatched kernel must produce bit-identical output and the same
//! count as its scalar counterpart, at lengths straddling the 8-element
//! group boundary and with poison bytes guarding the end of the bit field.
//! Run once normally and once with `BITSIEVE_NO_SIMD=1` to pin the scalar
//! tier; results must not change.

use bitsieve_core::bitset::{bit_field_len, popcount_bit_field};
use bitsieve_core::wide::stride::Int128Stride;
use bitsieve_core::{init, scalar};
use rand::Rng;

const LENS: [usize; 17] = [0, 1, 3, 7, 8, 9, 15, 16, 17, 31, 32, 33, 63, 64, 65, 127, 255];

fn setup() {
    env_logger::builder().is_test(true).try_init().ok();
    init();
}

fn poisoned(n: usize) -> Vec<u8> {
    let mut bits = vec![0u8; bit_field_len(n) + 16];
    for b in bits[bit_field_len(n)..].iter_mut() {
        *b = 0xfa;
    }
    bits
}

fn assert_poison_intact(bits: &[u8], n: usize) {
    assert!(
        bits[bit_field_len(n)..].iter().all(|&b| b == 0xfa),
        "kernel wrote past {} bytes for {} positions",
        bit_field_len(n),
        n
    );
}

/// Random mask with roughly half the bits set, zero past position `n`.
fn random_mask(n: usize, rng: &mut impl Rng) -> Vec<u8> {
    let mut mask = vec![0u8; bit_field_len(n)];
    for i in 0..n {
        if rng.random::<bool>() {
            mask[i >> 3] |= 1 << (i & 7);
        }
    }
    mask
}

macro_rules! check_type {
    ($t:ty, $gen:expr, $val:expr, $lo:expr, $hi:expr,
     [$(($d:path, $s:path)),+ $(,)?], ($db:path, $sb:path)) => {{
        let mut rng = rand::rng();
        for &n in LENS.iter() {
            let src: Vec<$t> = (0..n).map(|_| $gen(&mut rng)).collect();
            let mask = random_mask(n, &mut rng);
            $(
                for m in [None, Some(mask.as_slice())] {
                    let mut got = poisoned(n);
                    let mut want = poisoned(n);
                    let gc = $d(&src, $val, &mut got[..bit_field_len(n)], m);
                    let wc = $s(&src, $val, &mut want[..bit_field_len(n)], m);
                    assert_eq!(gc, wc, "{} count, n={}, masked={}", stringify!($d), n, m.is_some());
                    assert_eq!(got, want, "{} bits, n={}, masked={}", stringify!($d), n, m.is_some());
                    assert_eq!(
                        gc,
                        popcount_bit_field(&got[..bit_field_len(n)], n),
                        "{} count != popcount, n={}", stringify!($d), n
                    );
                    assert_poison_intact(&got, n);
                }
            )+
            for m in [None, Some(mask.as_slice())] {
                let mut got = poisoned(n);
                let mut want = poisoned(n);
                let gc = $db(&src, $lo, $hi, &mut got[..bit_field_len(n)], m);
                let wc = $sb(&src, $lo, $hi, &mut want[..bit_field_len(n)], m);
                assert_eq!(gc, wc, "between count, n={}", n);
                assert_eq!(got, want, "between bits, n={}", n);
                assert_poison_intact(&got, n);
            }
        }
    }};
}

#[test]
fn dispatched_i32_matches_scalar() {
    setup();
    check_type!(i32, |r: &mut _| rand::Rng::random_range(r, -50..50i32), 7, -10, 25,
        [
            (bitsieve_core::match_i32_equal, scalar::match_i32_equal),
            (bitsieve_core::match_i32_not_equal, scalar::match_i32_not_equal),
            (bitsieve_core::match_i32_less, scalar::match_i32_less),
            (bitsieve_core::match_i32_less_equal, scalar::match_i32_less_equal),
            (bitsieve_core::match_i32_greater, scalar::match_i32_greater),
            (bitsieve_core::match_i32_greater_equal, scalar::match_i32_greater_equal),
        ],
        (bitsieve_core::match_i32_between, scalar::match_i32_between));
}

#[test]
fn dispatched_u32_matches_scalar() {
    setup();
    check_type!(u32, |r: &mut _| rand::Rng::random_range(r, 0..100u32), 7, 10, 60,
        [
            (bitsieve_core::match_u32_equal, scalar::match_u32_equal),
            (bitsieve_core::match_u32_not_equal, scalar::match_u32_not_equal),
            (bitsieve_core::match_u32_less, scalar::match_u32_less),
            (bitsieve_core::match_u32_less_equal, scalar::match_u32_less_equal),
            (bitsieve_core::match_u32_greater, scalar::match_u32_greater),
            (bitsieve_core::match_u32_greater_equal, scalar::match_u32_greater_equal),
        ],
        (bitsieve_core::match_u32_between, scalar::match_u32_between));
}

#[test]
fn dispatched_i64_matches_scalar() {
    setup();
    check_type!(i64, |r: &mut _| rand::Rng::random_range(r, -50..50i64), 7, -10, 25,
        [
            (bitsieve_core::match_i64_equal, scalar::match_i64_equal),
            (bitsieve_core::match_i64_not_equal, scalar::match_i64_not_equal),
            (bitsieve_core::match_i64_less, scalar::match_i64_less),
            (bitsieve_core::match_i64_less_equal, scalar::match_i64_less_equal),
            (bitsieve_core::match_i64_greater, scalar::match_i64_greater),
            (bitsieve_core::match_i64_greater_equal, scalar::match_i64_greater_equal),
        ],
        (bitsieve_core::match_i64_between, scalar::match_i64_between));
}

#[test]
fn dispatched_u64_matches_scalar() {
    setup();
    check_type!(u64, |r: &mut _| rand::Rng::random_range(r, 0..100u64), 7, 10, 60,
        [
            (bitsieve_core::match_u64_equal, scalar::match_u64_equal),
            (bitsieve_core::match_u64_not_equal, scalar::match_u64_not_equal),
            (bitsieve_core::match_u64_less, scalar::match_u64_less),
            (bitsieve_core::match_u64_less_equal, scalar::match_u64_less_equal),
            (bitsieve_core::match_u64_greater, scalar::match_u64_greater),
            (bitsieve_core::match_u64_greater_equal, scalar::match_u64_greater_equal),
        ],
        (bitsieve_core::match_u64_between, scalar::match_u64_between));
}

#[test]
fn dispatched_f32_matches_scalar() {
    setup();
    check_type!(f32, |r: &mut _| rand::Rng::random_range(r, -50..50i32) as f32 * 0.25,
        1.75, -8.0, 8.0,
        [
            (bitsieve_core::match_f32_equal, scalar::match_f32_equal),
            (bitsieve_core::match_f32_not_equal, scalar::match_f32_not_equal),
            (bitsieve_core::match_f32_less, scalar::match_f32_less),
            (bitsieve_core::match_f32_less_equal, scalar::match_f32_less_equal),
            (bitsieve_core::match_f32_greater, scalar::match_f32_greater),
            (bitsieve_core::match_f32_greater_equal, scalar::match_f32_greater_equal),
        ],
        (bitsieve_core::match_f32_between, scalar::match_f32_between));
}

#[test]
fn dispatched_f64_matches_scalar() {
    setup();
    check_type!(f64, |r: &mut _| rand::Rng::random_range(r, -50..50i32) as f64 * 0.25,
        1.75, -8.0, 8.0,
        [
            (bitsieve_core::match_f64_equal, scalar::match_f64_equal),
            (bitsieve_core::match_f64_not_equal, scalar::match_f64_not_equal),
            (bitsieve_core::match_f64_less, scalar::match_f64_less),
            (bitsieve_core::match_f64_less_equal, scalar::match_f64_less_equal),
            (bitsieve_core::match_f64_greater, scalar::match_f64_greater),
            (bitsieve_core::match_f64_greater_equal, scalar::match_f64_greater_equal),
        ],
        (bitsieve_core::match_f64_between, scalar::match_f64_between));
}

#[test]
fn dispatched_f64_nan_column() {
    setup();
    let mut src: Vec<f64> = (0..33).map(|i| i as f64).collect();
    src[3] = f64::NAN;
    src[17] = f64::NAN;
    src[32] = f64::NAN;
    let n = src.len();

    let mut bits = vec![0u8; bit_field_len(n)];
    let cnt = bitsieve_core::match_f64_not_equal(&src, 5.0, &mut bits, None);
    // everything but index 5, NaN included
    assert_eq!(cnt, n as i64 - 1);

    let mut bits = vec![0u8; bit_field_len(n)];
    assert_eq!(bitsieve_core::match_f64_less_equal(&src, 100.0, &mut bits, None), 30);

    // NaN bound matches nothing, any operator
    let mut bits = vec![0u8; bit_field_len(n)];
    assert_eq!(bitsieve_core::match_f64_equal(&src, f64::NAN, &mut bits, None), 0);
    let mut bits = vec![0u8; bit_field_len(n)];
    assert_eq!(bitsieve_core::match_f64_between(&src, f64::NAN, 5.0, &mut bits, None), 0);
}

#[test]
fn dispatched_i128_matches_scalar() {
    setup();
    let mut rng = rand::rng();
    for &n in LENS.iter() {
        let values: Vec<i128> = (0..n)
            .map(|_| {
                let hi: i64 = rng.random_range(-3..3);
                let lo: u64 = rng.random_range(0..50);
                ((hi as i128) << 64) | lo as i128
            })
            .collect();
        let stride = Int128Stride::from_values(&values);
        let val = (1i128 << 64) | 25;
        let mask = random_mask(n, &mut rng);

        for m in [None, Some(mask.as_slice())] {
            let mut got = poisoned(n);
            let mut want = poisoned(n);
            let gc = bitsieve_core::match_i128_less(stride.as_ref(), val, &mut got[..bit_field_len(n)], m);
            let wc = bitsieve_core::wide::kernels::match_i128_less(
                stride.as_ref(), val, &mut want[..bit_field_len(n)], m);
            assert_eq!(gc, wc, "i128 less count, n={}", n);
            assert_eq!(got, want, "i128 less bits, n={}", n);
            assert_poison_intact(&got, n);
        }

        let mut got = poisoned(n);
        let mut want = poisoned(n);
        let (a, b) = (-(1i128 << 64), (2i128 << 64) | 10);
        let gc = bitsieve_core::match_i128_between(stride.as_ref(), a, b, &mut got[..bit_field_len(n)], None);
        let wc = bitsieve_core::wide::kernels::match_i128_between(
            stride.as_ref(), a, b, &mut want[..bit_field_len(n)], None);
        assert_eq!(gc, wc, "i128 between count, n={}", n);
        assert_eq!(got, want, "i128 between bits, n={}", n);
    }
}

#[test]
fn masked_result_is_unmasked_and_mask() {
    setup();
    let mut rng = rand::rng();
    let src: Vec<i64> = (0..200).map(|_| rng.random_range(-50..50)).collect();
    let n = src.len();
    let mask = random_mask(n, &mut rng);

    let mut unmasked = vec![0u8; bit_field_len(n)];
    let mut masked = vec![0u8; bit_field_len(n)];
    bitsieve_core::match_i64_less(&src, 0, &mut unmasked, None);
    let cnt = bitsieve_core::match_i64_less(&src, 0, &mut masked, Some(&mask));

    let anded: Vec<u8> = unmasked.iter().zip(mask.iter()).map(|(&u, &m)| u & m).collect();
    assert_eq!(masked, anded);
    assert_eq!(cnt, popcount_bit_field(&masked, n));

    // all-zero mask matches nothing, all-one mask equals the unmasked run
    let zeros = vec![0u8; bit_field_len(n)];
    let mut bits = vec![0u8; bit_field_len(n)];
    assert_eq!(bitsieve_core::match_i64_less(&src, 0, &mut bits, Some(&zeros)), 0);
    assert!(bits.iter().all(|&b| b == 0));

    let ones = vec![0xffu8; bit_field_len(n)];
    let mut bits = vec![0u8; bit_field_len(n)];
    let cnt = bitsieve_core::match_i64_less(&src, 0, &mut bits, Some(&ones));
    assert_eq!(bits, unmasked);
    assert_eq!(cnt, popcount_bit_field(&unmasked, n));
}

#[test]
fn kernels_accumulate_into_existing_bits() {
    setup();
    let src: Vec<i64> = (0..40).collect();
    let n = src.len();

    // less(10) then greater_equal(30) into one vector
    let mut bits = vec![0u8; bit_field_len(n)];
    let c1 = bitsieve_core::match_i64_less(&src, 10, &mut bits, None);
    let c2 = bitsieve_core::match_i64_greater_equal(&src, 30, &mut bits, None);
    assert_eq!(c1, 10);
    assert_eq!(c2, 10);
    assert_eq!(popcount_bit_field(&bits, n), 20);

    // re-running the same predicate reports its own matches again
    let c3 = bitsieve_core::match_i64_less(&src, 10, &mut bits, None);
    assert_eq!(c3, 10);
    assert_eq!(popcount_bit_field(&bits, n), 20);
}

#[test]
fn full_domain_between_matches_everything() {
    setup();
    let mut rng = rand::rng();
    let src: Vec<i64> = (0..100).map(|_| rng.random()).collect();
    let n = src.len();
    let mut bits = vec![0u8; bit_field_len(n)];
    let cnt = bitsieve_core::match_i64_between(&src, i64::MIN, i64::MAX, &mut bits, None);
    assert_eq!(cnt, n as i64);
    assert_eq!(popcount_bit_field(&bits, n), n as i64);
}

#[test]
#[should_panic(expected = "between bounds out of order")]
fn dispatched_between_rejects_swapped_bounds() {
    setup();
    let src: Vec<i64> = (0..16).collect();
    let mut bits = [0u8; 2];
    bitsieve_core::match_i64_between(&src, 10, 5, &mut bits, None);
}

#[test]
fn dispatched_i256_and_bool_surface() {
    setup();
    use bitsieve_core::wide::int256::ZERO_I256;
    use bitsieve_core::{I256, I256Stride};

    let stride = I256Stride::from_values(&[
        I256::from_i64(-5),
        ZERO_I256,
        I256::from_i64(5),
        I256::from_i128(1i128 << 100),
    ]);
    let mut bits = [0u8; 1];
    let cnt = bitsieve_core::match_i256_greater(stride.as_ref(), ZERO_I256, &mut bits, None);
    assert_eq!(cnt, 2);
    assert_eq!(bits[0], 0b0000_1100);

    let src = [true, false, true, true, false];
    let mut bits = [0u8; 1];
    assert_eq!(bitsieve_core::match_bool_equal(&src, true, &mut bits, None), 3);
    assert_eq!(bits[0], 0b0000_1101);
}
