// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Null-Path Selection*

use minarrow::Bitmask;

/// Determines whether nulls are present given an optional null count and mask reference.
/// Avoids computing mask cardinality to preserve performance guarantees.
#[inline(always)]
pub fn has_nulls(null_count: Option<usize>, mask: Option<&Bitmask>) -> bool {
    match null_count {
        Some(n) => n > 0,
        None => mask.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_count_takes_precedence_over_mask() {
        let mask = Bitmask::new_set_all(4, true);
        assert!(!has_nulls(Some(0), Some(&mask)));
        assert!(has_nulls(Some(2), Some(&mask)));
        assert!(has_nulls(None, Some(&mask)));
        assert!(!has_nulls(None, None));
    }
}
