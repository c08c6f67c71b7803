//! Two-level thresholding of grayscale samples.
//!
//! A sample is lit when it is greater than or equal to the threshold. A sample strictly below
//! the threshold is unlit. The same boundary is used by grid detection, so a separator line is
//! one whose samples are all strictly below the threshold.

use alloc::vec::Vec;

use crate::{CLEAR, SET};

/// Returns `true` if `sample` is lit under `threshold`.
#[inline]
pub const fn is_lit(sample: u8, threshold: u8) -> bool {
    sample >= threshold
}

/// Maps each grayscale sample in `pixels` to [`SET`] or [`CLEAR`] under `threshold`.
///
/// The threshold is a `u8`, so the full `0..=255` range is accepted and nothing else is
/// representable. A threshold of `0` lights every pixel.
pub fn binarize(pixels: &[u8], threshold: u8) -> Vec<u8> {
    pixels
        .iter()
        .map(|&sample| if is_lit(sample, threshold) { SET } else { CLEAR })
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn threshold_boundary_is_lit() {
        assert_eq!(binarize(&[127, 128, 129], 128), vec![CLEAR, SET, SET]);
    }

    #[test]
    fn output_is_strictly_two_level() {
        let pixels = (0..=255).collect::<Vec<u8>>();
        let binary = binarize(&pixels, 200);

        assert_eq!(binary.len(), 256);
        assert!(binary.iter().all(|&sample| sample == SET || sample == CLEAR));
        assert_eq!(binary.iter().filter(|&&sample| sample == SET).count(), 56);
    }

    #[test]
    fn zero_threshold_lights_everything() {
        assert_eq!(binarize(&[0, 1, 255], 0), vec![SET; 3]);
    }

    #[test]
    fn empty_input() {
        assert!(binarize(&[], 128).is_empty());
    }
}
