// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use minarrow::{Bitmask, Vec64};

/// Dense kernel helper
///
/// ### Null handling
/// - Null mask appearing in the dense path means a mask was supplied
/// to the kernel function, with a null_count of `0`. This can reflect
/// a scenario where one knew there was no nulls for a whole vector, or
/// the supplied window, and therefore supplied `0` to ensure that the
/// dense path was used for the kernel.
/// - Any `NaN` or `inf` values generated in the kernel function
/// are kept verbatim, without `nulling` them in the (optional)
/// mask, given that:
/// 1. These values can represent additional data signal.
/// 2. Handling them requires additional CPU cycles on the hot path.
///
/// Therefore, one can treat them further if needed.
#[inline(always)]
pub fn dense_univariate_kernel_f64_std<FScalar>(
    x: &[f64],
    has_mask: bool,
    scalar_body: FScalar,
) -> (Vec64<f64>, Option<Bitmask>)
where
    FScalar: Fn(f64) -> f64,
{
    let len = x.len();
    let mut out = Vec64::with_capacity(len);

    for &xi in x {
        out.push(scalar_body(xi));
    }

    let out_mask = if has_mask {
        Some(Bitmask::new_set_all(len, true))
    } else {
        None
    };
    (out, out_mask)
}

/// Null-aware masked kernel helper.
///
/// ### Null handling
/// - Input mask is required and propagates nulls accordingly.
/// - Any `NaN` or `inf` values generated in the kernel function
/// are kept verbatim, without `nulling` them in the (optional)
/// mask, given that:
/// 1. These values can represent additional data signal.
/// 2. Handling them requires additional CPU cycles on the hot path.
/// Therefore, one can treat them further if desired.
#[inline(always)]
pub fn masked_univariate_kernel_f64_std<FScalar>(
    x: &[f64],
    mask: &Bitmask,
    scalar_body: FScalar,
) -> (Vec64<f64>, Bitmask)
where
    FScalar: Fn(f64) -> f64,
{
    let len = x.len();
    let mut out = Vec64::with_capacity(len);
    let mut out_mask = mask.clone();

    for idx in 0..len {
        if !unsafe { mask.get_unchecked(idx) } {
            out.push(f64::NAN);
            unsafe { out_mask.set_unchecked(idx, false) };
        } else {
            let xi = unsafe { *x.get_unchecked(idx) };
            out.push(scalar_body(xi));
            unsafe { out_mask.set_unchecked(idx, true) };
        }
    }

    (out, out_mask)
}

/// Dense kernel helper for paired `(u64, f64) -> f64` kernels, where each lane
/// carries its own integer parameter alongside the value.
///
/// Callers check that `n` and `x` have equal length.
#[inline(always)]
pub fn dense_paired_kernel_u64_f64_std<FScalar>(
    n: &[u64],
    x: &[f64],
    has_mask: bool,
    scalar_body: FScalar,
) -> (Vec64<f64>, Option<Bitmask>)
where
    FScalar: Fn(u64, f64) -> f64,
{
    debug_assert_eq!(n.len(), x.len());
    let len = x.len();
    let mut out = Vec64::with_capacity(len);

    for (&ni, &xi) in n.iter().zip(x) {
        out.push(scalar_body(ni, xi));
    }

    let out_mask = if has_mask {
        Some(Bitmask::new_set_all(len, true))
    } else {
        None
    };
    (out, out_mask)
}

/// Null-aware masked kernel helper for paired `(u64, f64) -> f64` kernels.
///
/// A single mask covers both inputs; null lanes become NaN and stay null.
#[inline(always)]
pub fn masked_paired_kernel_u64_f64_std<FScalar>(
    n: &[u64],
    x: &[f64],
    mask: &Bitmask,
    scalar_body: FScalar,
) -> (Vec64<f64>, Bitmask)
where
    FScalar: Fn(u64, f64) -> f64,
{
    debug_assert_eq!(n.len(), x.len());
    let len = x.len();
    let mut out = Vec64::with_capacity(len);
    let mut out_mask = mask.clone();

    for idx in 0..len {
        if !unsafe { mask.get_unchecked(idx) } {
            out.push(f64::NAN);
            unsafe { out_mask.set_unchecked(idx, false) };
        } else {
            let ni = unsafe { *n.get_unchecked(idx) };
            let xi = unsafe { *x.get_unchecked(idx) };
            out.push(scalar_body(ni, xi));
            unsafe { out_mask.set_unchecked(idx, true) };
        }
    }

    (out, out_mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_univariate_covers_every_lane() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut mask = Bitmask::new_set_all(5, true);
        mask.set(0, false);
        mask.set(3, false);
        let (out, out_mask) = masked_univariate_kernel_f64_std(&x, &mask, |v| v * 10.0);
        assert_eq!(out.len(), 5);
        assert!(out[0].is_nan() && out[3].is_nan());
        assert_eq!(out[1], 20.0);
        assert_eq!(out[2], 30.0);
        assert_eq!(out[4], 50.0);
        assert!(!out_mask.get(0) && out_mask.get(1) && out_mask.get(2));
        assert!(!out_mask.get(3) && out_mask.get(4));
    }

    #[test]
    fn masked_paired_matches_univariate_lanes() {
        let n = [2u64, 3, 4];
        let x = [0.5, 1.5, 2.5];
        let mut mask = Bitmask::new_set_all(3, true);
        mask.set(1, false);
        let (paired, paired_mask) =
            masked_paired_kernel_u64_f64_std(&n, &x, &mask, |ni, xi| ni as f64 * xi);
        assert_eq!(paired[0], 1.0);
        assert!(paired[1].is_nan());
        assert_eq!(paired[2], 10.0);
        assert!(paired_mask.get(0) && !paired_mask.get(1) && paired_mask.get(2));
    }

    #[test]
    fn dense_keeps_supplied_mask_all_valid() {
        let (out, mask) = dense_univariate_kernel_f64_std(&[1.0, f64::NAN], true, |v| v + 1.0);
        assert_eq!(out[0], 2.0);
        assert!(out[1].is_nan());
        let mask = mask.unwrap();
        assert!(mask.get(0) && mask.get(1));
        let (_, none) = dense_univariate_kernel_f64_std(&[1.0], false, |v| v);
        assert!(none.is_none());
    }
}
