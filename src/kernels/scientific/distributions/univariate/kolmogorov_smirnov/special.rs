// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Closed forms of the two-sided distribution near the edges of its support.
//!
//! Each function returns `None` when `(n, x)` needs one of the general algorithms.

use crate::config::{CDF_SATURATION_W, EXACT_MAX_N, SF_ONE_W, SF_ZERO_W};
use crate::kernels::scientific::distributions::shared::scalar::{
    factorial_over_power, ln_factorial,
};

/// P[D_n ≤ x] for x ∈ (1/(2n), 1/n]: n! (2x − 1/n)ⁿ.
///
/// Small `n` goes through the exact n!/nⁿ ratio, larger `n` through logs so
/// that neither n! nor nⁿ is ever formed.
#[inline(always)]
fn lower_edge_cdf(n: u64, x: f64) -> f64 {
    let nf = n as f64;
    let t = 2.0 * x * nf - 1.0;
    if n <= EXACT_MAX_N {
        return factorial_over_power(n) * t.powi(n as i32);
    }
    (ln_factorial(n) + nf * (t / nf).ln()).exp()
}

/// CDF boundary cases, in priority order.
#[inline(always)]
pub(crate) fn cdf_special(n: u64, x: f64) -> Option<f64> {
    let nf = n as f64;

    // The neglected upper tail is below 5e-16 past the saturation point.
    if nf * x * x >= CDF_SATURATION_W || x >= 1.0 {
        return Some(1.0);
    }
    if x <= 0.5 / nf {
        return Some(0.0);
    }
    if n == 1 {
        return Some(2.0 * x - 1.0);
    }
    if x <= 1.0 / nf {
        return Some(lower_edge_cdf(n, x));
    }
    if x >= 1.0 - 1.0 / nf {
        return Some(1.0 - 2.0 * (1.0 - x).powf(nf));
    }
    None
}

/// Complementary CDF boundary cases, in priority order.
#[inline(always)]
pub(crate) fn sf_special(n: u64, x: f64) -> Option<f64> {
    let nf = n as f64;
    let w = nf * x * x;

    if w >= SF_ZERO_W || x >= 1.0 {
        return Some(0.0);
    }
    if w <= SF_ONE_W || x <= 0.5 / nf {
        return Some(1.0);
    }
    if n == 1 {
        return Some(2.0 - 2.0 * x);
    }
    if x <= 1.0 / nf {
        return Some(1.0 - lower_edge_cdf(n, x));
    }
    if x >= 1.0 - 1.0 / nf {
        return Some(2.0 * (1.0 - x).powf(nf));
    }
    None
}
