// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Pelz-Good Asymptotic Series** - *Large-n Lower Tail*
//!
//! W. Pelz and I. J. Good, "Approximating the lower tail-areas of the
//! Kolmogorov-Smirnov one-sample statistic", JRSS B 38(2), 1976.
//!
//! The CDF is expanded in powers of n^{-1/2} around the Kolmogorov limit,
//! in the variable z = √n·x. The leading term is the theta-function form of the
//! limit distribution; five correction terms follow. Each term is an infinite
//! sum over j of Gaussian-damped polynomials, truncated at
//! [`PELZ_MAX_TERMS`](crate::config::PELZ_MAX_TERMS) or once a term falls below
//! [`PELZ_EPS`](crate::config::PELZ_EPS) of the running sum.
//!
//! Accuracy is about five decimal digits for n just above the exact range and
//! improves with n. No renormalisation is needed: every sum decays.

use crate::config::{PELZ_EPS, PELZ_MAX_TERMS};
use crate::kernels::scientific::distributions::shared::constants::{
    PI2, PI4, SQRT_2PI, SQRT_HALF_PI,
};

/// Sums `term(j)` for j = `start`..=`PELZ_MAX_TERMS`, stopping once
/// |term| ≤ `PELZ_EPS`·|sum|.
#[inline(always)]
fn truncated_sum<F>(start: usize, term: F) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut sum = 0.0_f64;
    let mut j = start;
    let mut last = 1.0_f64;
    while j <= PELZ_MAX_TERMS && last.abs() > PELZ_EPS * sum.abs() {
        last = term(j as f64);
        sum += last;
        j += 1;
    }
    sum
}

/// P[D_n ≤ x] via the six-term Pelz-Good expansion.
pub(crate) fn pelz(n: u64, x: f64) -> f64 {
    let nf = n as f64;
    let rn = nf.sqrt();
    let z = rn * x;
    let z2 = z * z;
    let z4 = z2 * z2;
    let z6 = z4 * z2;
    let w = PI2 / (2.0 * z2);

    // Half-integer and integer Gaussian kernels exp(−t²·π²/(2z²)).
    let half = |j: f64| {
        let t = j + 0.5;
        (t * t, (-t * t * w).exp())
    };
    let whole = |j: f64| (j * j, (-j * j * w).exp());

    // Kolmogorov limit.
    let mut sum = truncated_sum(0, |j| half(j).1) * SQRT_2PI / z;

    // n^{-1/2}
    let tom = truncated_sum(0, |j| {
        let (t2, e) = half(j);
        (PI2 * t2 - z2) * e
    });
    sum += tom * SQRT_HALF_PI / (rn * 3.0 * z4);

    // n^{-1}, first part
    let tom = truncated_sum(0, |j| {
        let (t2, e) = half(j);
        (6.0 * z6 + 2.0 * z4 + PI2 * (2.0 * z4 - 5.0 * z2) * t2 + PI4 * (1.0 - 2.0 * z2) * t2 * t2)
            * e
    });
    sum += tom * SQRT_HALF_PI / (nf * 36.0 * z * z6);

    // n^{-1}, second part
    let tom = truncated_sum(1, |j| {
        let (t2, e) = whole(j);
        PI2 * t2 * e
    });
    sum -= tom * SQRT_HALF_PI / (nf * 18.0 * z * z2);

    // n^{-3/2}, first part
    let tom = truncated_sum(0, |j| {
        let (t2, e) = half(j);
        (-30.0 * z6 - 90.0 * z6 * z2
            + PI2 * (135.0 * z4 - 96.0 * z6) * t2
            + PI4 * (212.0 * z4 - 60.0 * z2) * t2 * t2
            + PI2 * PI4 * t2 * t2 * t2 * (5.0 - 30.0 * z2))
            * e
    });
    sum += tom * SQRT_HALF_PI / (rn * nf * 3240.0 * z4 * z6);

    // n^{-3/2}, second part
    let tom = truncated_sum(1, |j| {
        let (t2, e) = whole(j);
        (3.0 * PI2 * t2 * z2 - PI4 * t2 * t2) * e
    });
    sum += tom * SQRT_HALF_PI / (rn * nf * 108.0 * z6);

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() < tol,
            "assert_close failed: {} vs {} (tol={})",
            a,
            b,
            tol
        );
    }

    /// Kolmogorov limit 1 − 2 Σ (−1)^{k−1} exp(−2k²z²).
    fn kolmogorov_limit(z: f64) -> f64 {
        let mut s = 0.0;
        for k in 1..=100 {
            let kf = k as f64;
            let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
            s += sign * (-2.0 * kf * kf * z * z).exp();
        }
        1.0 - 2.0 * s
    }

    #[test]
    fn converges_to_kolmogorov_limit() {
        // K(1) == 0.7300003283...
        let n = 100_000_000;
        let x = 1.0 / (n as f64).sqrt();
        assert_close(pelz(n, x), kolmogorov_limit(1.0), 1e-4);
        assert_close(kolmogorov_limit(1.0), 0.7300003283, 1e-9);
    }

    #[test]
    fn agrees_with_exact_values_above_exact_range() {
        // Exact values from the Durbin matrix in 60-digit arithmetic.
        assert_close(pelz(1000, 0.03), 0.6773097535867001, 1e-7);
        assert_close(pelz(500, 0.04), 0.609748983673594, 5e-7);
        assert_close(pelz(200, 0.08), 0.8536036834257138, 5e-7);
    }

    #[test]
    fn million_samples_is_finite() {
        let v = pelz(1_000_000, 0.001);
        assert!(v.is_finite());
        assert!(v > 0.72 && v < 0.74, "{v}");
    }

    #[test]
    fn truncated_sum_stops_on_tolerance() {
        // Geometric series 10^{-j}: stops well before the cap.
        let s = truncated_sum(0, |j| 0.1f64.powf(j));
        assert_close(s, 10.0 / 9.0, 1e-9);
        // Constant terms never meet the tolerance: cap applies.
        let s = truncated_sum(0, |_| 1.0);
        assert_eq!(s, (PELZ_MAX_TERMS + 1) as f64);
    }
}
