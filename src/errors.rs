// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Kernel Operation Error Handling*
//!
//! Error types for the Kolmogorov-Smirnov kernels with structured error reporting.
//!
//! ## Error Categories
//! - **Argument Errors**: sample size of zero, non-finite statistics, probabilities outside [0, 1]
//! - **Dimension Errors**: length mismatches between paired inputs
//! - **Convergence Errors**: an exact algorithm could not complete its recursion
//!
//! Convergence errors never reach callers of the public probability functions:
//! they are logged and mapped to a NaN probability at the dispatch layer.

use core::fmt;
use std::error::Error;

/// Error type for all kernel operations.
///
/// Each variant includes a contextual message string providing specific details
/// about the error condition.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Array length mismatch between operands.
    LengthMismatch(String),

    /// Invalid arguments provided to kernel function.
    InvalidArguments(String),

    /// An iterative or recursive algorithm failed to produce a usable value.
    NonConvergence(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            KernelError::NonConvergence(msg) => write!(f, "Non-convergence: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Creates a formatted error message for length mismatches between left-hand side (LHS) and right-hand side (RHS) arrays.
///
/// # Arguments
/// * `fname` - Function name where the mismatch occurred
/// * `lhs` - Length of the left-hand side array
/// * `rhs` - Length of the right-hand side array
///
/// # Returns
/// A formatted error message string
pub fn log_length_mismatch(fname: String, lhs: usize, rhs: usize) -> String {
    return format!("{} => Length mismatch: LHS {} RHS {}", fname, lhs, rhs);
}
