// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Scalar Distribution Utilities Module** - *Factorials*
//!
//! Scalar helpers shared by the Kolmogorov-Smirnov evaluators: table-backed
//! factorials and the Stirling log-factorial beyond the table.

use crate::kernels::scientific::distributions::shared::constants::*;

/// ln(n!).
///
/// Exact table lookup for n ≤ 30, otherwise Stirling's series at `n + 1`
/// with a four-term rational correction. Relative error is below 1e-14 past
/// the table edge.
#[inline(always)]
pub fn ln_factorial(n: u64) -> f64 {
    if n as usize <= MFACT {
        return LN_FACTORIAL[n as usize];
    }
    let x = (n + 1) as f64;
    let y = 1.0 / (x * x);
    let z = ((-(STIRLING[0] * y) + STIRLING[1]) * y - STIRLING[2]) * y + STIRLING[3];
    ((x - 0.5) * x.ln() - x) + HALF_LOG_TWO_PI_STIRLING + z / x
}

/// n! / nⁿ for n ≥ 1.
///
/// Table-backed for n ≤ 30; above that the ratio is built as the running
/// product ∏ i/n, which never leaves (0, 1].
#[inline(always)]
pub fn factorial_over_power(n: u64) -> f64 {
    debug_assert!(n >= 1);
    let nf = n as f64;
    if n as usize <= MFACT {
        return FACTORIAL[n as usize] / nf.powi(n as i32);
    }
    let mut res = 1.0 / nf;
    for i in 2..=n {
        res *= i as f64 / nf;
    }
    res
}
