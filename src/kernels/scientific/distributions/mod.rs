// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistical Distributions Module** - *Goodness-of-Fit Statistic Distributions*
//!
//! Distribution functions for the Kolmogorov-Smirnov statistic, with the
//! factorial tables and special functions they share.
//!
//! ### Null Value Philosophy
//! Rather than assume, we choose to recognise inf and NaN as valid float values
//! (consistent with Apache Arrow semantics), leaving it to the user to subsequently
//! treat them as nulls if they wish. A NaN probability from a scalar evaluator
//! signals an internal algorithm failure and is logged at `warn` level.
//!
//! ## Numerical Precision and Stability
//! See `./tests` for the tolerance requirements, measured against the Durbin matrix
//! evaluated in 50-digit arithmetic. Whilst these pass on the development machine,
//! platform specific difference may impact your test results.
//!
//! ## Disclaimer
//! This implementation is provided on a best-effort basis and is intended for
//! general scientific and engineering use. We make no guarantees as to correctness,
//! fitness for any particular purpose, or suitability for uses such as in
//! life-critical, safety-critical, or financial applications.

/// # **Shared Distribution Utilities**
///
/// ## Modules
/// - **`constants`**: factorial tables and series constants
/// - **`scalar`**: log-factorial, n!/nⁿ and log-gamma
pub mod shared {
    pub mod constants;
    pub mod scalar;
}

/// # **Univariate Distributions** - *Single-Variable Probability Distributions*
pub mod univariate {
    // common kernel patterns
    #[cfg(feature = "array_kernels")]
    pub mod common;

    /// Kolmogorov-Smirnov statistic distribution kernels.
    pub mod kolmogorov_smirnov;
}
