// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Durbin Matrix Power** - *Exact CDF for Small n·x*
//!
//! G. Marsaglia, W. W. Tsang and J. Wang, "Evaluating Kolmogorov's
//! distribution", Journal of Statistical Software 8(18), 2003, following
//! J. Durbin's matrix formulation.
//!
//! With k = ⌊n·x⌋ + 1, m = 2k − 1 and h = k − n·x, the m×m matrix H has
//! entries 1/(i − j + 1)! on and below the superdiagonal, with the first column
//! and the last row corrected by powers of h. Then
//!
//! ```text
//! P[D_n ≤ x] = n!/nⁿ · (Hⁿ)[k, k]
//! ```
//!
//! Hⁿ grows geometrically, so the power is carried as a `(matrix, exponent)`
//! pair: whenever the central entry passes 1e140 the entries are scaled by
//! 1e-140 and the decimal exponent advances by 140.

use crate::config::{RENORM_BIG, RENORM_EXP10, RENORM_SMALL};
use crate::errors::KernelError;

/// Row-major square matrix with an out-of-band decimal exponent: the value
/// represented is `data · 10^exp10`.
#[derive(Debug, Clone)]
struct ScaledMatrix {
    data: Vec<f64>,
    m: usize,
    exp10: i32,
}

impl ScaledMatrix {
    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.m + j]
    }

    fn mul(&self, rhs: &ScaledMatrix) -> ScaledMatrix {
        let m = self.m;
        let mut data = vec![0.0; m * m];
        for i in 0..m {
            let row = &mut data[i * m..(i + 1) * m];
            for k in 0..m {
                let a = self.data[i * m + k];
                if a == 0.0 {
                    continue;
                }
                let rhs_row = &rhs.data[k * m..(k + 1) * m];
                for (out, &b) in row.iter_mut().zip(rhs_row) {
                    *out += a * b;
                }
            }
        }
        ScaledMatrix {
            data,
            m,
            exp10: self.exp10 + rhs.exp10,
        }
    }

    #[inline(always)]
    fn renormalise(&mut self) {
        let c = self.m / 2;
        if self.at(c, c) > RENORM_BIG {
            for v in self.data.iter_mut() {
                *v *= RENORM_SMALL;
            }
            self.exp10 += RENORM_EXP10;
        }
    }

    /// Raises to the power `n ≥ 1` by recursive halving of the exponent,
    /// renormalising after every product.
    fn pow(&self, n: u64) -> ScaledMatrix {
        if n == 1 {
            return self.clone();
        }
        let half = self.pow(n / 2);
        let squared = half.mul(&half);
        let mut out = if n % 2 == 0 {
            squared
        } else {
            self.mul(&squared)
        };
        out.renormalise();
        out
    }
}

/// Builds H for `k` and the fractional offset `h`.
fn durbin_h(k: usize, h: f64) -> ScaledMatrix {
    let m = 2 * k - 1;
    let mut data = vec![0.0; m * m];
    for i in 0..m {
        for j in 0..=(i + 1).min(m - 1) {
            data[i * m + j] = 1.0;
        }
    }
    for i in 0..m {
        data[i * m] -= h.powi(i as i32 + 1);
        data[(m - 1) * m + i] -= h.powi((m - i) as i32);
    }
    // Corner term; only present when h > 1/2.
    let corner = 2.0 * h - 1.0;
    if corner > 0.0 {
        data[(m - 1) * m] += corner.powi(m as i32);
    }

    let mut fact = vec![1.0; m + 1];
    for g in 1..=m {
        fact[g] = fact[g - 1] * g as f64;
    }
    for i in 0..m {
        for j in 0..=(i + 1).min(m - 1) {
            data[i * m + j] /= fact[i + 1 - j];
        }
    }

    ScaledMatrix { data, m, exp10: 0 }
}

/// P[D_n ≤ x] from the n-th power of Durbin's matrix.
///
/// The n!/nⁿ factor is folded in as the running product ∏ i/n, itself rescaled
/// whenever it drops below 1e-140.
pub(crate) fn durbin_matrix(n: u64, x: f64) -> Result<f64, KernelError> {
    let nf = n as f64;
    let t = nf * x;
    let k = t as usize + 1;
    let h = k as f64 - t;

    let q = durbin_h(k, h).pow(n);
    let mut s = q.at(k - 1, k - 1);
    let mut exp10 = q.exp10;
    for i in 1..=n {
        s = s * i as f64 / nf;
        if s < RENORM_SMALL {
            s *= RENORM_BIG;
            exp10 -= RENORM_EXP10;
        }
    }
    debug!("durbin: n={} x={} m={} exponent={}", n, x, q.m, exp10);

    let p = s * 10f64.powi(exp10);
    if !p.is_finite() {
        return Err(KernelError::NonConvergence(format!(
            "durbin: non-finite result {p} (n={n}, x={x}, m={})",
            q.m
        )));
    }
    Ok(p)
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

    fn assert_rel(a: f64, b: f64, tol: f64) {
        assert!(((a - b) / b).abs() < tol, "{a} vs {b} (rel tol={tol})");
    }

    #[test]
    fn matrix_shape_and_corrections() {
        // k = 2, h = 0.75: m = 3, corner gets (0.5)^3.
        let hm = durbin_h(2, 0.75);
        assert_eq!(hm.m, 3);
        assert_close(hm.at(0, 0), 1.0 - 0.75, 1e-15);
        assert_close(hm.at(0, 1), 1.0, 1e-15);
        assert_eq!(hm.at(0, 2), 0.0);
        assert_close(hm.at(1, 1), 1.0, 1e-15);
        assert_close(hm.at(2, 1), (1.0 - 0.75f64.powi(2)) / 2.0, 1e-15);
        let corner = (1.0 - 2.0 * 0.75f64.powi(3) + 0.125) / 6.0;
        assert_close(hm.at(2, 0), corner, 1e-15);
    }

    #[test]
    fn power_matches_repeated_product() {
        let hm = durbin_h(3, 0.4);
        let mut direct = hm.clone();
        for _ in 1..7 {
            direct = direct.mul(&hm);
        }
        let fast = hm.pow(7);
        assert_eq!(fast.exp10, 0);
        for (a, b) in fast.data.iter().zip(&direct.data) {
            assert!((a - b).abs() <= 1e-12 * b.abs().max(1.0));
        }
    }

    #[test]
    fn exact_values() {
        // Durbin matrix in 50-digit arithmetic.
        assert_close(durbin_matrix(5, 0.2).unwrap(), 0.03840000000000002, 1e-14);
        assert_close(durbin_matrix(10, 0.15).unwrap(), 0.04603472999999999, 1e-14);
        assert_close(durbin_matrix(10, 0.25).unwrap(), 0.5158884675, 1e-13);
        assert_close(durbin_matrix(20, 0.1).unwrap(), 0.023744905407845046, 1e-14);
        assert_close(durbin_matrix(40, 0.1).unwrap(), 0.21818902928170977, 1e-13);
        assert_close(durbin_matrix(60, 0.1).unwrap(), 0.44780387407107136, 1e-13);
        assert_close(durbin_matrix(100, 0.05).unwrap(), 0.04678402893642752, 1e-14);
        assert_close(durbin_matrix(140, 0.06).unwrap(), 0.3280907751137371, 1e-13);
    }

    #[test]
    fn valid_past_its_regime() {
        // Exact everywhere; n = 10, x = 0.3 is routed to Pomeranz instead.
        assert_close(durbin_matrix(10, 0.3).unwrap(), 0.7294644252, 1e-13);
        assert_close(durbin_matrix(141, 0.1).unwrap(), 0.8887155033364726, 1e-12);
    }

    #[test]
    fn large_n_carries_exponent() {
        assert_rel(durbin_matrix(1000, 0.01).unwrap(), 5.032546293896419e-05, 1e-11);
        assert_rel(durbin_matrix(5000, 0.005).unwrap(), 4.141549668027341e-04, 1e-11);
        // Both the matrix power and the ∏ i/n product rescale many times.
        assert_rel(durbin_matrix(100_000, 0.0005).unwrap(), 8.093259531771839e-21, 1e-10);
    }
}
