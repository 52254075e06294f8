//! CPython-compatible hash helpers for the numeric tower and text.
//!
//! Hashing is deterministic and equivalent to CPython under `PYTHONHASHSEED=0`,
//! so hashes are reproducible across runs and across processes.
//!
//! ## Cross-type hash invariant
//!
//! If `a == b` then `hash(a) == hash(b)`. Since `1 == 1.0 == True == 1+0j`, the
//! int, float and complex hashes must agree for equal values. Int and float
//! hashing reduce modulo the Mersenne prime `2^61 - 1` exactly as CPython's
//! `Objects/longobject.c` and `Python/pyhash.c` do; complex hashing
//! (see [`crate::types::complex`]) builds on [`cpython_hash_float`].
//!
//! All helpers return the signed hash as Python observes it. CPython reserves
//! `-1` as an error sentinel in C, so a computed `-1` is always remapped to `-2`.

/// Mersenne prime used by CPython for numeric hashing: `2^61 - 1`.
pub(crate) const MODULUS: i64 = (1 << 61) - 1;

/// Hash of `float('inf')`; negated for `-inf`.
pub(crate) const HASH_INF: i64 = 314_159;

/// Reserved "hash not computed" sentinel and its replacement.
pub(crate) const HASH_INVALID: i64 = -1;
pub(crate) const HASH_INVALID_REPLACEMENT: i64 = -2;

/// Remaps the reserved `-1` sentinel.
#[must_use]
pub(crate) fn fix_sentinel(hash: i64) -> i64 {
    if hash == HASH_INVALID {
        HASH_INVALID_REPLACEMENT
    } else {
        hash
    }
}

/// Hashes a signed 64-bit integer using CPython's modular algorithm.
///
/// The result is `n % MODULUS` with the sign of `n` preserved, matching
/// `long_hash`.
#[must_use]
pub fn cpython_hash_int(value: i64) -> i64 {
    if value == 0 {
        return 0;
    }

    let sign: i64 = if value < 0 { -1 } else { 1 };

    // `i64::MIN` has no positive counterpart, so take the magnitude as u64.
    let abs_val = value.unsigned_abs();
    let remainder = (abs_val % MODULUS as u64) as i64;

    fix_sentinel(sign * remainder)
}

/// Hashes an `f64` using CPython's float hashing algorithm.
///
/// Integral floats inside the `i64` range hash through [`cpython_hash_int`]
/// so that `hash(n) == hash(float(n))`. Everything else uses the
/// `frexp`-based reduction from `_Py_HashDouble`.
///
/// Special values:
/// - `+inf` hashes to `314159`, `-inf` to `-314159`
/// - `NaN` hashes to `0`
#[must_use]
pub fn cpython_hash_float(value: f64) -> i64 {
    if value.is_infinite() {
        return if value > 0.0 { HASH_INF } else { -HASH_INF };
    }
    if value.is_nan() {
        return 0;
    }

    let truncated = value.trunc();
    if value == truncated && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        return cpython_hash_int(truncated as i64);
    }

    let (frac, exp) = frexp(value);
    let mut m = frac;
    let mut e = exp;

    let sign: i64 = if m < 0.0 {
        m = -m;
        -1
    } else {
        1
    };

    // Consume the mantissa 28 bits at a time.
    let modulus = MODULUS as u64;
    let mut x: u64 = 0;
    while m > 0.0 {
        x = ((x << 28) & modulus) | (x >> 33);
        m *= 268_435_456.0; // 2^28
        e -= 28;
        let w = m as u64;
        m -= w as f64;
        x = x.wrapping_add(w);
        if x >= modulus {
            x -= modulus;
        }
    }

    // Fold the exponent in as a rotation modulo 61.
    e = e.rem_euclid(61);
    x = ((x << e as u32) & modulus) | (x >> (61 - e) as u32);

    fix_sentinel(sign * x as i64)
}

/// Returns `(frac, exp)` such that `value == frac * 2^exp` with `0.5 <= |frac| < 1.0`.
fn frexp(value: f64) -> (f64, i32) {
    if value == 0.0 || value.is_nan() || value.is_infinite() {
        return (value, 0);
    }
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    if exponent == 0 {
        // subnormal: scale into the normal range first
        let (frac, exp) = frexp(value * 18_446_744_073_709_551_616.0); // 2^64
        return (frac, exp - 64);
    }
    let frac_bits = (bits & 0x800F_FFFF_FFFF_FFFF) | 0x3FE0_0000_0000_0000;
    (f64::from_bits(frac_bits), exponent - 1022)
}

/// Hashes UTF-8 text with CPython's seed-0 SipHash-1-3.
///
/// The empty string hashes to `0`.
#[must_use]
pub fn cpython_hash_str(value: &str) -> i64 {
    let bytes = value.as_bytes();
    if bytes.is_empty() {
        return 0;
    }
    fix_sentinel(i64::from_ne_bytes(siphash13_with_seed0(bytes).to_ne_bytes()))
}

/// Computes SipHash-1-3 with a zero key.
fn siphash13_with_seed0(bytes: &[u8]) -> u64 {
    let mut v0: u64 = 0x736f_6d65_7073_6575;
    let mut v1: u64 = 0x646f_7261_6e64_6f6d;
    let mut v2: u64 = 0x6c79_6765_6e65_7261;
    let mut v3: u64 = 0x7465_6462_7974_6573;

    let mut chunks = bytes.chunks_exact(8);
    for chunk in &mut chunks {
        let mut block = [0_u8; 8];
        block.copy_from_slice(chunk);
        let message = u64::from_le_bytes(block);
        v3 ^= message;
        sip_round(&mut v0, &mut v1, &mut v2, &mut v3);
        v0 ^= message;
    }

    let mut tail = (bytes.len() as u64) << 56;
    for (index, byte) in chunks.remainder().iter().copied().enumerate() {
        tail |= u64::from(byte) << (index * 8);
    }

    v3 ^= tail;
    sip_round(&mut v0, &mut v1, &mut v2, &mut v3);
    v0 ^= tail;
    v2 ^= 0xff;
    sip_round(&mut v0, &mut v1, &mut v2, &mut v3);
    sip_round(&mut v0, &mut v1, &mut v2, &mut v3);
    sip_round(&mut v0, &mut v1, &mut v2, &mut v3);

    v0 ^ v1 ^ v2 ^ v3
}

fn sip_round(v0: &mut u64, v1: &mut u64, v2: &mut u64, v3: &mut u64) {
    *v0 = v0.wrapping_add(*v1);
    *v1 = v1.rotate_left(13);
    *v1 ^= *v0;
    *v0 = v0.rotate_left(32);

    *v2 = v2.wrapping_add(*v3);
    *v3 = v3.rotate_left(16);
    *v3 ^= *v2;

    *v0 = v0.wrapping_add(*v3);
    *v3 = v3.rotate_left(21);
    *v3 ^= *v0;

    *v2 = v2.wrapping_add(*v1);
    *v1 = v1.rotate_left(17);
    *v1 ^= *v2;
    *v2 = v2.rotate_left(32);
}
