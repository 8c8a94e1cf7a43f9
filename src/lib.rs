// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

//! # **Kolmogorov Kernels** - *Distribution of the Kolmogorov-Smirnov Statistic*
//!
//! CDF, complementary CDF and quantile of the one-sample two-sided
//! Kolmogorov-Smirnov statistic D_n, plus the one-sided D_n⁺ tail, for any
//! sample size. Exact algorithms cover n ≤ 140 and small n·x for larger n;
//! asymptotic series take over elsewhere.
//!
//! Scalar entry points live in
//! [`kernels::scientific::distributions::univariate::kolmogorov_smirnov`].
//! Null-aware array kernels over `minarrow` buffers come with the
//! `array_kernels` feature (on by default).
//!
//! Diagnostics go through the `log` crate (feature `log`, on by default); no
//! logger is installed here.

#[macro_use]
mod log_macros;

pub mod kernels {
    pub mod scientific {
        pub mod distributions;
    }
}

pub mod config;

pub mod errors;

#[cfg(feature = "array_kernels")]
pub mod utils;
