// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Common Distribution Utilities** - *Array Kernel Helpers*
//!
//! Dense and null-aware masked loops shared by the array kernels, plus small
//! helpers for their tests.
//!
//! ## Helper Functions
//! - **Kernel loops**: dense and masked `f64 -> f64` and paired `(u64, f64) -> f64`
//! - **Array extraction**: unwrapping of dense arrays without null masks
//! - **Mask creation**: null mask generation for testing scenarios

/// Scalar implementations of common distribution utilities.
pub mod std;

use minarrow::{Bitmask, Buffer, FloatArray};

// Common test helpers

/// Test Helper: unwrap `FloatArray`, assert *no* null mask, return data.
pub fn dense_data(arr: FloatArray<f64>) -> Buffer<f64> {
    assert!(arr.null_mask.is_none(), "unexpected mask on dense path");
    arr.data
}

/// Create a mask of given length with exactly the lane `idx` null.
pub fn single_null_mask(len: usize, idx: usize) -> Bitmask {
    let mut m = Bitmask::new_set_all(len, true);
    unsafe { m.set_unchecked(idx, false) };
    m
}
