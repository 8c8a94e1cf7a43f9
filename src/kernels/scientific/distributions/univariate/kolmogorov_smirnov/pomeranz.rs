// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Pomeranz Recursion** - *Exact CDF for Moderate n·x²*
//!
//! J. Pomeranz, "Exact cumulative distribution of the Kolmogorov-Smirnov
//! statistic for small samples", CACM 17(12), 1974.
//!
//! With t = n·x the unit interval is cut at the points A_1 = 0, A_2 = min(t −
//! ⌊t⌋, ⌈t⌉ − t), A_3 = 1 − A_2, A_i = A_{i−2} + 1 up to A_{2n+1}, and
//! A_{2n+2} = n. The probability mass is carried row by row over these cuts:
//!
//! ```text
//! V[i][j] = Σ_k V[i−1][k] · ((A_i − A_{i−1})/n)^{j−k} / (j−k)!
//! ```
//!
//! with the index ranges bounded by ⌊A_i − t⌋ and ⌈A_i + t⌉. Only four distinct
//! step widths occur, so the Taylor weights are precomputed once per call.
//!
//! Rows underflow long before the recursion ends for larger n, so each row whose
//! smallest active entry drops below 1e-280 is scaled up by 1e140 and the
//! number of rescalings is carried out of band.

use crate::config::{EXACT_MAX_N, POMERANZ_STEP_EPS, POMERANZ_UNDERFLOW, RENORM_BIG, RENORM_EXP10};
use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::constants::LN_10;
use crate::kernels::scientific::distributions::shared::scalar::ln_factorial;

/// Cut points A_i with their summation limits ⌊A_i − t⌋ and ⌈A_i + t⌉,
/// indexed 1..=2n+2.
#[derive(Debug, Clone)]
struct SummationBounds {
    a: Vec<f64>,
    floor: Vec<i64>,
    ceil: Vec<i64>,
}

impl SummationBounds {
    /// The limits follow from the parity of i and the fractional part of t;
    /// computing them from integer arithmetic avoids rounding at lattice points.
    fn new(n: usize, t: f64) -> Self {
        let len = 2 * n + 3;
        let ell = t as i64;
        let z = t - ell as f64;
        let w = t.ceil() - t;

        let mut a = vec![0.0; len];
        a[2] = z.min(w);
        a[3] = 1.0 - a[2];
        for i in 4..=2 * n + 1 {
            a[i] = a[i - 2] + 1.0;
        }
        a[2 * n + 2] = n as f64;

        let mut floor = vec![0i64; len];
        let mut ceil = vec![0i64; len];
        for i in 1..len {
            let half = (i / 2) as i64;
            let even = i % 2 == 0;
            if z > 0.5 {
                floor[i] = if even { half - 2 - ell } else { half - 1 - ell };
                ceil[i] = if even { half + ell } else { half + 1 + ell };
            } else if z > 0.0 {
                floor[i] = half - 1 - ell;
                ceil[i] = half + ell;
            } else {
                floor[i] = if even { half - 1 - ell } else { half - ell };
                ceil[i] = if even { half - 1 + ell } else { half + ell };
            }
        }
        if z > 0.0 && z <= 0.5 {
            ceil[1] = 1 + ell;
        }

        Self { a, floor, ceil }
    }
}

/// Taylor weights H[s][j] = hⱼ^j / j! for the four step widths
/// 2A_2/n, (1 − 2A_2)/n, A_2/n and 0.
fn step_weights(n: usize, a2: f64) -> [Vec<f64>; 4] {
    let nf = n as f64;
    let widths = [2.0 * a2 / nf, (1.0 - 2.0 * a2) / nf, a2 / nf, 0.0];
    widths.map(|h| {
        let mut row = vec![0.0; n + 2];
        row[0] = 1.0;
        for j in 1..=n + 1 {
            row[j] = h * row[j - 1] / j as f64;
        }
        row
    })
}

/// P[D_n ≤ x] by the Pomeranz recursion.
///
/// Fails with [`KernelError::NonConvergence`] if a step width matches none of the
/// precomputed weights or the terminal cell is not a usable number.
pub(crate) fn pomeranz(n: u64, x: f64) -> Result<f64, KernelError> {
    debug_assert!(n <= EXACT_MAX_N);
    let nu = n as usize;
    let nf = n as f64;
    let t = nf * x;

    let bounds = SummationBounds::new(nu, t);
    let h = step_weights(nu, bounds.a[2]);

    // Row i − 1 and row i of V; only the active index range of each row is
    // ever read back.
    let mut prev = vec![0.0; nu + 2];
    let mut row = vec![0.0; nu + 2];
    prev[1] = RENORM_BIG;
    let mut renorms: i32 = 1;

    for i in 2..=2 * nu + 2 {
        let jlow = (2 + bounds.floor[i]).max(1) as usize;
        let jup = bounds.ceil[i].min(nu as i64 + 1) as usize;
        let klow = (2 + bounds.floor[i - 1]).max(1) as usize;
        let kup0 = bounds.ceil[i - 1].max(0) as usize;

        let width = (bounds.a[i] - bounds.a[i - 1]) / nf;
        let Some(s) = h
            .iter()
            .position(|weights| (width - weights[1]).abs() <= POMERANZ_STEP_EPS)
        else {
            return Err(KernelError::NonConvergence(format!(
                "pomeranz: step width {width} at row {i} matches no basis weight (n={n}, x={x})"
            )));
        };

        let mut min_sum = RENORM_BIG;
        for j in jlow..=jup {
            let mut sum = 0.0;
            for k in (klow..=kup0.min(j)).rev() {
                sum += prev[k] * h[s][j - k];
            }
            row[j] = sum;
            if sum < min_sum {
                min_sum = sum;
            }
        }

        if min_sum < POMERANZ_UNDERFLOW {
            for j in jlow..=jup {
                row[j] *= RENORM_BIG;
            }
            renorms += 1;
        }
        std::mem::swap(&mut prev, &mut row);
    }

    let terminal = prev[nu + 1];
    debug!("pomeranz: n={} x={} renormalisations={}", n, x, renorms);
    if !terminal.is_finite() || terminal < 0.0 {
        return Err(KernelError::NonConvergence(format!(
            "pomeranz: terminal cell {terminal} (n={n}, x={x})"
        )));
    }

    let log_p = ln_factorial(n) - renorms as f64 * RENORM_EXP10 as f64 * LN_10 + terminal.ln();
    if log_p >= 0.0 {
        return Ok(1.0);
    }
    Ok(log_p.exp())
}
