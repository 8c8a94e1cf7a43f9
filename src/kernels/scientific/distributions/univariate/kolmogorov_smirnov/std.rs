// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Kolmogorov-Smirnov Array Kernels** - *Null-Aware Batch Evaluation*
//!
//! Lane-wise wrappers over the scalar evaluators. Input nulls propagate as NaN
//! with the lane left null; non-finite statistics produce NaN on otherwise valid
//! lanes, which keep their validity bit.

use minarrow::{Bitmask, FloatArray};

use crate::errors::{KernelError, log_length_mismatch};
use crate::kernels::scientific::distributions::univariate::common::std::{
    dense_paired_kernel_u64_f64_std, dense_univariate_kernel_f64_std,
    masked_paired_kernel_u64_f64_std, masked_univariate_kernel_f64_std,
};
use crate::utils::has_nulls;

use super::{cdf_unchecked, quantile_unchecked, sf_unchecked};

#[inline(always)]
fn require_mask<'a>(
    fname: &str,
    null_mask: Option<&'a Bitmask>,
) -> Result<&'a Bitmask, KernelError> {
    null_mask.ok_or_else(|| {
        KernelError::InvalidArguments(format!("{fname}: null_count > 0 requires null_mask"))
    })
}

/// Runs `scalar_body` over `x` on the dense or masked path.
#[inline(always)]
fn univariate<FScalar>(
    fname: &str,
    x: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
    scalar_body: FScalar,
) -> Result<FloatArray<f64>, KernelError>
where
    FScalar: Fn(f64) -> f64,
{
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }

    // Dense path
    if !has_nulls(null_count, null_mask) {
        let (out, out_mask) = dense_univariate_kernel_f64_std(x, null_mask.is_some(), scalar_body);
        return Ok(FloatArray {
            data: out.into(),
            null_mask: out_mask,
        });
    }

    // Null-aware masked kernel path
    let mask = require_mask(fname, null_mask)?;
    let (out, out_mask) = masked_univariate_kernel_f64_std(x, mask, scalar_body);
    Ok(FloatArray {
        data: out.into(),
        null_mask: Some(out_mask),
    })
}

#[inline(always)]
fn check_n(fname: &str, n: u64) -> Result<(), KernelError> {
    if n == 0 {
        return Err(KernelError::InvalidArguments(format!(
            "{fname}: sample size must be >= 1"
        )));
    }
    Ok(())
}

pub fn ks_cdf_std(
    x: &[f64],
    n: u64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check_n("ks_cdf", n)?;
    univariate("ks_cdf", x, null_mask, null_count, |xi| {
        if xi.is_finite() {
            cdf_unchecked(n, xi)
        } else {
            f64::NAN
        }
    })
}

pub fn ks_sf_std(
    x: &[f64],
    n: u64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check_n("ks_sf", n)?;
    univariate("ks_sf", x, null_mask, null_count, |xi| {
        if xi.is_finite() {
            sf_unchecked(n, xi)
        } else {
            f64::NAN
        }
    })
}

pub fn ks_quantile_std(
    p: &[f64],
    n: u64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    check_n("ks_quantile", n)?;
    univariate("ks_quantile", p, null_mask, null_count, |pi| {
        if (0.0..=1.0).contains(&pi) {
            quantile_unchecked(n, pi)
        } else {
            f64::NAN
        }
    })
}

pub fn ks_cdf_paired_std(
    n: &[u64],
    x: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    if n.len() != x.len() {
        return Err(KernelError::LengthMismatch(log_length_mismatch(
            "ks_cdf_paired".into(),
            n.len(),
            x.len(),
        )));
    }
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }

    let scalar_body = |ni: u64, xi: f64| {
        if ni == 0 || !xi.is_finite() {
            f64::NAN
        } else {
            cdf_unchecked(ni, xi)
        }
    };

    if !has_nulls(null_count, null_mask) {
        let (out, out_mask) =
            dense_paired_kernel_u64_f64_std(n, x, null_mask.is_some(), scalar_body);
        return Ok(FloatArray {
            data: out.into(),
            null_mask: out_mask,
        });
    }

    let mask = require_mask("ks_cdf_paired", null_mask)?;
    let (out, out_mask) = masked_paired_kernel_u64_f64_std(n, x, mask, scalar_body);
    Ok(FloatArray {
        data: out.into(),
        null_mask: Some(out_mask),
    })
}

#[cfg(test)]
mod tests {
    use minarrow::vec64;

    use super::*;
    use crate::kernels::scientific::distributions::univariate::common::{
        dense_data, single_null_mask,
    };

    #[test]
    fn empty_input() {
        let arr = ks_cdf_std(&[], 10, None, None).unwrap();
        assert!(arr.data.is_empty());
        assert!(arr.null_mask.is_none());
    }

    #[test]
    fn dense_matches_scalar() {
        let xs = vec64![0.0, 0.1, 0.3, 0.5, 1.0];
        let cdf = dense_data(ks_cdf_std(&xs, 10, None, None).unwrap());
        let sf = dense_data(ks_sf_std(&xs, 10, None, None).unwrap());
        for (i, &x) in xs.iter().enumerate() {
            assert_eq!(cdf[i], cdf_unchecked(10, x));
            assert_eq!(sf[i], sf_unchecked(10, x));
        }
    }

    #[test]
    fn mask_propagation() {
        let xs = vec64![0.2, 0.3, 0.4];
        let mask = single_null_mask(3, 1);
        let arr = ks_cdf_std(&xs, 10, Some(&mask), Some(1)).unwrap();
        let m = arr.null_mask.as_ref().unwrap();
        assert!(!m.get(1));
        assert!(m.get(0) && m.get(2));
        assert!(arr.data[1].is_nan());
        assert_eq!(arr.data[0], cdf_unchecked(10, 0.2));
    }

    #[test]
    fn mask_without_nulls_takes_dense_path() {
        let xs = vec64![0.2, 0.3];
        let mask = Bitmask::new_set_all(2, true);
        let arr = ks_sf_std(&xs, 10, Some(&mask), Some(0)).unwrap();
        let m = arr.null_mask.as_ref().unwrap();
        assert!(m.get(0) && m.get(1));
    }

    #[test]
    fn null_count_without_mask_is_rejected() {
        let xs = vec64![0.2, 0.3];
        let res = ks_cdf_std(&xs, 10, None, Some(1));
        assert!(matches!(res, Err(KernelError::InvalidArguments(_))));
    }

    #[test]
    fn non_finite_lanes_are_nan() {
        let xs = vec64![f64::NAN, f64::INFINITY, 0.3];
        let arr = dense_data(ks_cdf_std(&xs, 10, None, None).unwrap());
        assert!(arr[0].is_nan() && arr[1].is_nan());
        assert!(arr[2].is_finite());
    }

    #[test]
    fn zero_sample_size_is_rejected() {
        assert!(ks_cdf_std(&[0.3], 0, None, None).is_err());
        assert!(ks_quantile_std(&[0.3], 0, None, None).is_err());
    }

    #[test]
    fn quantile_lanes() {
        let ps = vec64![0.0, 0.5, 1.0, 1.5];
        let arr = dense_data(ks_quantile_std(&ps, 10, None, None).unwrap());
        assert_eq!(arr[0], 0.05);
        assert!((cdf_unchecked(10, arr[1]) - 0.5).abs() < 1e-9);
        assert_eq!(arr[2], 1.0);
        assert!(arr[3].is_nan());
    }

    #[test]
    fn paired_lengths_must_match() {
        let Err(err) = ks_cdf_paired_std(&[10, 20], &[0.3], None, None) else {
            panic!("expected a length mismatch");
        };
        assert_eq!(
            err,
            KernelError::LengthMismatch("ks_cdf_paired => Length mismatch: LHS 2 RHS 1".into())
        );
    }

    #[test]
    fn paired_lanes_use_their_own_sample_size() {
        let ns = [10u64, 20, 0];
        let xs = vec64![0.3, 0.2, 0.3];
        let arr = dense_data(ks_cdf_paired_std(&ns, &xs, None, None).unwrap());
        assert_eq!(arr[0], cdf_unchecked(10, 0.3));
        assert_eq!(arr[1], cdf_unchecked(20, 0.2));
        assert!(arr[2].is_nan());

        let mask = single_null_mask(3, 0);
        let arr = ks_cdf_paired_std(&ns, &xs, Some(&mask), Some(1)).unwrap();
        assert!(arr.data[0].is_nan());
        assert!(!arr.null_mask.as_ref().unwrap().get(0));
    }
}
