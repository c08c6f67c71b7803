//! Packing of binarized pixels into bits.
//!
//! Each byte holds 8 consecutive pixels. Bit 7 holds the first pixel and a set bit marks a
//! [`SET`] pixel.

use core::fmt;

use alloc::vec::Vec;

use crate::{CLEAR, SET};

/// Packs `pixels` into bytes, 8 pixels to a byte, most-significant bit first.
///
/// Any sample other than [`SET`] packs to a clear bit.
///
/// # Errors
///
/// - [`InvalidLengthError`]: Returned if the number of pixels is not a multiple of 8.
pub fn pack(pixels: &[u8]) -> Result<Vec<u8>, InvalidLengthError> {
    if pixels.len() % 8 != 0 {
        return Err(InvalidLengthError { len: pixels.len() });
    }

    let packed = pixels
        .chunks_exact(8)
        .map(|group| {
            group
                .iter()
                .fold(0u8, |byte, &sample| (byte << 1) | u8::from(sample == SET))
        })
        .collect();

    Ok(packed)
}

/// Expands `bytes` back into [`SET`] and [`CLEAR`] samples, keeping at most `pixel_count`.
pub fn unpack(bytes: &[u8], pixel_count: usize) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |bit| (byte >> bit) & 0b1))
        .map(|bit| if bit == 1 { SET } else { CLEAR })
        .take(pixel_count)
        .collect()
}

/// The number of pixels given to [`pack()`] is not a multiple of 8.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct InvalidLengthError {
    /// The number of pixels provided.
    pub len: usize,
}

impl fmt::Display for InvalidLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pixel count {} is not divisible by 8", self.len)
    }
}

impl core::error::Error for InvalidLengthError {}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn first_pixel_is_most_significant() {
        let pixels = [SET, CLEAR, CLEAR, CLEAR, CLEAR, CLEAR, CLEAR, SET];
        assert_eq!(pack(&pixels), Ok(vec![0b1000_0001]));
    }

    #[test]
    fn all_set_packs_to_ff() {
        assert_eq!(pack(&[SET; 64]), Ok(vec![0xFF; 8]));
    }

    #[test]
    fn rejects_partial_bytes() {
        assert_eq!(pack(&[SET; 12]), Err(InvalidLengthError { len: 12 }));
    }

    #[test]
    fn unpack_inverts_pack() {
        let pixels = (0..64u32)
            .map(|index| if index % 3 == 0 || index % 7 == 0 { SET } else { CLEAR })
            .collect::<Vec<u8>>();

        let packed = pack(&pixels).unwrap();
        assert_eq!(packed.len(), 8);
        assert_eq!(unpack(&packed, pixels.len()), pixels);
    }

    #[test]
    fn unpack_truncates() {
        assert_eq!(unpack(&[0b1010_0000], 3), vec![SET, CLEAR, SET]);
    }
}
