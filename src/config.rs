// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Configuration Constants** - *Regime Thresholds and Iteration Caps*
//!
//! Compile-time constants controlling algorithm selection, truncation and
//! renormalisation for the Kolmogorov-Smirnov kernels. The thresholds come from
//! the published numerical methods and are reproduced exactly so that results
//! agree with the reference tables built from them.

// These parameters are part of the numerical contract and must not be tuned.

/// Largest sample size handled by the exact algorithms (Durbin matrix and
/// Pomeranz) across the whole `w = n·x²` range.
pub const EXACT_MAX_N: u64 = 140;

/// Largest sample size for which the Durbin matrix is still used above
/// [`EXACT_MAX_N`]. Beyond it the Pelz-Good series takes over.
pub const DURBIN_MAX_N: u64 = 100_000;

/// Above this sample size the one-sided upper tail uses the single-term
/// asymptotic formula instead of Smirnov's sum.
pub const SMIRNOV_ASYMPTOTIC_MIN_N: u64 = 200_000;

/// `w` below which the Durbin matrix is used for `n ≤ EXACT_MAX_N`.
pub const DURBIN_POMERANZ_W: f64 = 0.754693;

/// `w` below which Pomeranz is used for `n ≤ EXACT_MAX_N`; at and above it the
/// CDF is taken from the doubled one-sided tail.
pub const POMERANZ_TAIL_W: f64 = 4.0;

/// For `n > EXACT_MAX_N` (up to [`DURBIN_MAX_N`]), the Durbin matrix is used
/// while `w` stays at or below this value.
pub const DURBIN_PELZ_W: f64 = 2.0;

/// For `n > EXACT_MAX_N`, the complementary CDF is taken from the doubled
/// one-sided tail once `w` reaches this value.
pub const LARGE_N_TAIL_W: f64 = 2.2;

/// `w` at which the CDF saturates to exactly 1.0. The neglected mass is below 5e-16.
pub const CDF_SATURATION_W: f64 = 18.0;

/// `w` at which the complementary CDF is reported as exactly 0.0.
pub const SF_ZERO_W: f64 = 370.0;

/// `w` at or below which the complementary CDF is reported as exactly 1.0.
pub const SF_ONE_W: f64 = 0.0274;

/// Decimal exponent of the renormalisation step shared by the Durbin and
/// Pomeranz recursions. Values are rescaled by `10^±RENORM_EXP10`.
pub const RENORM_EXP10: i32 = 140;

/// Durbin matrix entries are rescaled once the central entry exceeds this.
pub const RENORM_BIG: f64 = 1.0e140;

/// Reciprocal of [`RENORM_BIG`].
pub const RENORM_SMALL: f64 = 1.0e-140;

/// A Pomeranz row is rescaled once its smallest active entry drops below this.
pub const POMERANZ_UNDERFLOW: f64 = 1.0e-280;

/// Tolerance used to classify a Pomeranz step width against its four basis
/// polynomials.
pub const POMERANZ_STEP_EPS: f64 = 1.0e-15;

/// Iteration cap of each Pelz-Good sub-series.
pub const PELZ_MAX_TERMS: usize = 20;

/// Relative tolerance of each Pelz-Good sub-series.
pub const PELZ_EPS: f64 = 1.0e-10;

/// Relative tolerance at which Smirnov's one-sided sum stops in each direction.
pub const SMIRNOV_EPS: f64 = 1.0e-12;

/// Above this sample size Smirnov's sum starts at `jmax / 2` instead of `jmax / 3`.
pub const SMIRNOV_SPLIT_N: u64 = 3000;

/// Iteration cap of the quantile bisection.
pub const QUANTILE_MAX_ITERS: usize = 100;

/// Absolute tolerance on the bracket width of the quantile bisection.
pub const QUANTILE_TOL: f64 = 1.0e-14;
