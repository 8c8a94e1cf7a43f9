// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Regime Selection** - *Total Decision Functions over (n, x)*
//!
//! Every `(n, x)` maps to exactly one evaluation route. The selection is kept in
//! [`ks_cdf_regime`] and [`ks_sf_regime`] so the thresholds can be audited in
//! one place; evaluation then matches on the returned variant.
//!
//! | side | n      | condition                         | route                |
//! |------|--------|-----------------------------------|----------------------|
//! | cdf  | ≤ 140  | n·x² < 0.754693                   | Durbin               |
//! | cdf  | ≤ 140  | n·x² < 4                          | Pomeranz             |
//! | cdf  | ≤ 140  | otherwise                         | 1 − 2·P[D⁺ ≥ x]      |
//! | cdf  | > 140  | n·x² ≤ 2 and n ≤ 100000           | Durbin               |
//! | cdf  | > 140  | otherwise                         | Pelz                 |
//! | sf   | ≤ 140  | n·x² < 4                          | 1 − cdf              |
//! | sf   | ≤ 140  | otherwise                         | 2·P[D⁺ ≥ x]          |
//! | sf   | > 140  | n·x² ≥ 2.2                        | 2·P[D⁺ ≥ x]          |
//! | sf   | > 140  | otherwise                         | 1 − cdf              |
//!
//! Closed forms near the edges of the support take precedence on both sides.

use crate::config::{
    DURBIN_MAX_N, DURBIN_PELZ_W, DURBIN_POMERANZ_W, EXACT_MAX_N, LARGE_N_TAIL_W,
    POMERANZ_TAIL_W,
};
use crate::errors::KernelError;

use super::durbin::durbin_matrix;
use super::one_sided::smirnov_upper_tail;
use super::pelz::pelz;
use super::pomeranz::pomeranz;
use super::special::{cdf_special, sf_special};

/// Evaluation route for P[D_n ≤ x].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CdfRegime {
    /// Closed form near the edges of the support; carries the value.
    Exact(f64),
    /// Durbin matrix power.
    DurbinMatrix,
    /// Pomeranz recursion.
    Pomeranz,
    /// One minus twice the one-sided upper tail.
    UpperTail,
    /// Pelz-Good asymptotic series.
    Pelz,
}

/// Evaluation route for P[D_n ≥ x].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SfRegime {
    /// Closed form near the edges of the support; carries the value.
    Exact(f64),
    /// One minus the CDF.
    Complement,
    /// Twice the one-sided upper tail.
    UpperTail,
}

/// Selects the route for P[D_n ≤ x]. Expects `n ≥ 1` and finite `x`.
pub fn ks_cdf_regime(n: u64, x: f64) -> CdfRegime {
    if let Some(v) = cdf_special(n, x) {
        return CdfRegime::Exact(v);
    }
    let nf = n as f64;
    let w = nf * x * x;
    if n <= EXACT_MAX_N {
        if w < DURBIN_POMERANZ_W {
            CdfRegime::DurbinMatrix
        } else if w < POMERANZ_TAIL_W {
            CdfRegime::Pomeranz
        } else {
            CdfRegime::UpperTail
        }
    } else if w <= DURBIN_PELZ_W && n <= DURBIN_MAX_N {
        CdfRegime::DurbinMatrix
    } else {
        CdfRegime::Pelz
    }
}

/// Selects the route for P[D_n ≥ x]. Expects `n ≥ 1` and finite `x`.
pub fn ks_sf_regime(n: u64, x: f64) -> SfRegime {
    if let Some(v) = sf_special(n, x) {
        return SfRegime::Exact(v);
    }
    let w = n as f64 * x * x;
    let tail_w = if n <= EXACT_MAX_N {
        POMERANZ_TAIL_W
    } else {
        LARGE_N_TAIL_W
    };
    if w >= tail_w {
        SfRegime::UpperTail
    } else {
        SfRegime::Complement
    }
}

#[inline(always)]
fn clamp_probability(p: f64) -> f64 {
    p.clamp(0.0, 1.0)
}

/// Maps an algorithm failure to the NaN sentinel, logging the cause.
#[inline(always)]
fn or_nan(result: Result<f64, KernelError>, n: u64, x: f64) -> f64 {
    match result {
        Ok(p) => p,
        Err(e) => {
            warn!("ks: returning NaN for n={} x={}: {}", n, x, e);
            f64::NAN
        }
    }
}

/// P[D_n ≤ x] without argument checks. NaN signals an algorithm failure.
pub(crate) fn cdf_unchecked(n: u64, x: f64) -> f64 {
    let regime = ks_cdf_regime(n, x);
    trace!("ks_cdf: n={} x={} regime={:?}", n, x, regime);
    let p = match regime {
        CdfRegime::Exact(v) => v,
        CdfRegime::DurbinMatrix => or_nan(durbin_matrix(n, x), n, x),
        CdfRegime::Pomeranz => or_nan(pomeranz(n, x), n, x),
        CdfRegime::UpperTail => 1.0 - 2.0 * smirnov_upper_tail(n, x),
        CdfRegime::Pelz => pelz(n, x),
    };
    clamp_probability(p)
}

/// P[D_n ≥ x] without argument checks. NaN signals an algorithm failure.
pub(crate) fn sf_unchecked(n: u64, x: f64) -> f64 {
    let regime = ks_sf_regime(n, x);
    trace!("ks_sf: n={} x={} regime={:?}", n, x, regime);
    let p = match regime {
        SfRegime::Exact(v) => v,
        SfRegime::Complement => 1.0 - cdf_unchecked(n, x),
        SfRegime::UpperTail => 2.0 * smirnov_upper_tail(n, x),
    };
    clamp_probability(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_n_routes() {
        assert_eq!(ks_cdf_regime(10, 0.2), CdfRegime::DurbinMatrix);
        assert_eq!(ks_cdf_regime(10, 0.3), CdfRegime::Pomeranz);
        assert_eq!(ks_cdf_regime(10, 0.7), CdfRegime::UpperTail);
        assert_eq!(ks_cdf_regime(140, 0.1), CdfRegime::Pomeranz);
        assert_eq!(ks_sf_regime(10, 0.3), SfRegime::Complement);
        assert_eq!(ks_sf_regime(10, 0.7), SfRegime::UpperTail);
    }

    #[test]
    fn large_n_routes() {
        // w = 0.9
        assert_eq!(ks_cdf_regime(1000, 0.03), CdfRegime::DurbinMatrix);
        // w = 2.5
        assert_eq!(ks_cdf_regime(1000, 0.05), CdfRegime::Pelz);
        // w = 0.125
        assert_eq!(ks_cdf_regime(5000, 0.005), CdfRegime::DurbinMatrix);
        // Durbin is capped in n even for tiny x.
        assert_eq!(ks_cdf_regime(1_000_000, 0.001), CdfRegime::Pelz);
        // w = 2.25
        assert_eq!(ks_sf_regime(1000, 0.0474), SfRegime::UpperTail);
        // w = 0.9
        assert_eq!(ks_sf_regime(1000, 0.03), SfRegime::Complement);
    }

    #[test]
    fn edges_take_precedence() {
        assert_eq!(ks_cdf_regime(10, 0.0), CdfRegime::Exact(0.0));
        assert_eq!(ks_cdf_regime(10, 1.0), CdfRegime::Exact(1.0));
        assert_eq!(ks_cdf_regime(1, 0.75), CdfRegime::Exact(0.5));
        assert_eq!(ks_sf_regime(10, 1.0), SfRegime::Exact(0.0));
    }

    #[test]
    fn switch_points_are_half_open() {
        // The lower route owns values strictly below each threshold.
        let n = 100u64;
        let below = (DURBIN_POMERANZ_W / n as f64).sqrt() * (1.0 - 1e-9);
        let above = (DURBIN_POMERANZ_W / n as f64).sqrt() * (1.0 + 1e-9);
        assert_eq!(ks_cdf_regime(n, below), CdfRegime::DurbinMatrix);
        assert_eq!(ks_cdf_regime(n, above), CdfRegime::Pomeranz);
        let below = (POMERANZ_TAIL_W / n as f64).sqrt() * (1.0 - 1e-9);
        let above = (POMERANZ_TAIL_W / n as f64).sqrt() * (1.0 + 1e-9);
        assert_eq!(ks_cdf_regime(n, below), CdfRegime::Pomeranz);
        assert_eq!(ks_cdf_regime(n, above), CdfRegime::UpperTail);
        assert_eq!(ks_sf_regime(n, below), SfRegime::Complement);
        assert_eq!(ks_sf_regime(n, above), SfRegime::UpperTail);

        // Durbin keeps w = 2 itself above n = 140.
        let n = 1000u64;
        let below = (DURBIN_PELZ_W / n as f64).sqrt() * (1.0 - 1e-9);
        let above = (DURBIN_PELZ_W / n as f64).sqrt() * (1.0 + 1e-9);
        assert_eq!(ks_cdf_regime(n, below), CdfRegime::DurbinMatrix);
        assert_eq!(ks_cdf_regime(n, above), CdfRegime::Pelz);
    }

    #[test]
    fn every_input_has_a_route() {
        for &n in &[1u64, 2, 3, 7, 50, 140, 141, 500, 20_000, 100_001, 300_000] {
            for i in 0..=400 {
                let x = i as f64 / 400.0;
                let c = cdf_unchecked(n, x);
                let s = sf_unchecked(n, x);
                assert!((0.0..=1.0).contains(&c), "cdf n={n} x={x}: {c}");
                assert!((0.0..=1.0).contains(&s), "sf n={n} x={x}: {s}");
            }
        }
    }

    #[test]
    fn failures_become_nan() {
        let err = Err(KernelError::NonConvergence("test".into()));
        assert!(or_nan(err, 10, 0.3).is_nan());
        assert_eq!(or_nan(Ok(0.25), 10, 0.3), 0.25);
    }

    #[test]
    fn clamps_into_unit_interval() {
        assert_eq!(clamp_probability(1.0 + 1e-15), 1.0);
        assert_eq!(clamp_probability(-1e-17), 0.0);
        assert!(clamp_probability(f64::NAN).is_nan());
    }
}
