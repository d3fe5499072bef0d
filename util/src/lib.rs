#![allow(clippy::needless_range_loop)]

//! Small, dependency-free integer/bit helpers shared by `padic_core`.
//!
//! Nothing here is big-integer aware: these operate on plain `u64`/`i64` and
//! exist to keep the doubling schedules and series truncation bounds in
//! `padic_core` free of ad hoc arithmetic.

/// Ceiling division of two `u64`s. Panics if `b == 0`.
pub const fn ceil_div_u64(a: u64, b: u64) -> u64 {
    (a + b - 1) / b
}

/// Computes `ceil(log_2(n))`. `ceil_log2(0) == 0` and `ceil_log2(1) == 0`.
#[must_use]
pub fn ceil_log2(n: u64) -> u32 {
    u64::BITS - n.saturating_sub(1).leading_zeros()
}

/// Returns the largest integer `i` such that `base**i <= n`.
///
/// Used by the exponential/logarithm truncation bounds to size precomputed
/// tables without resorting to floating point.
pub const fn log_floor(n: u64, base: u64) -> u32 {
    assert!(base > 1);
    let mut i = 0;
    let mut cur: u64 = 1;
    loop {
        match cur.checked_mul(base) {
            Some(next) if next <= n => {
                i += 1;
                cur = next;
            }
            _ => return i,
        }
    }
}

/// Bit length of `n`, i.e. `0` for `n == 0`, else `floor(log2(n)) + 1`.
pub const fn bit_length_u64(n: u64) -> u32 {
    u64::BITS - n.leading_zeros()
}

/// Builds the Hensel doubling schedule for lifting from precision 1 up to
/// `target`: `[target, ceil(target/2), ceil(target/4), ..., 1]`, returned in
/// that (decreasing) order so callers can iterate it back-to-front.
///
/// This is the schedule shared by inversion, square root, and Teichmüller
/// lifting (spec: a_0 = N, a_1 = ceil(a_0/2), ..., a_{n-1} = 1).
pub fn doubling_schedule(target: u64) -> Vec<u64> {
    assert!(target >= 1, "doubling schedule requires a positive target");
    let mut schedule = vec![target];
    while *schedule.last().unwrap() > 1 {
        let prev = *schedule.last().unwrap();
        schedule.push(ceil_div_u64(prev, 2));
    }
    schedule
}
