//! The `glyph-codec` crate converts monochrome glyph spritesheets into a compact byte stream
//! suitable for embedding in firmware and other resource-constrained targets.
//!
//! # Pipeline
//!
//! A grayscale spritesheet flows strictly forward through the crate:
//!
//! 1. [`binarize`] maps every sample to [`SET`] or [`CLEAR`].
//! 2. [`grid`] determines the geometry of the glyph cells.
//! 3. [`inject`] optionally fills the cell reserved for the solid cursor glyph.
//! 4. [`pack`] stores 8 pixels per byte, most-significant bit first.
//! 5. [`rle`] compresses runs of zero bytes.
//!
//! [`pipeline`] sequences these steps and can run the inverse of the last two to verify that
//! the produced stream decodes back to the exact pixels that went in.
//!
//! # Wire format
//!
//! The packed bit order and the zero-run escape are contracts shared with the decoders running
//! on the target and must not change:
//!
//! - Bit 7 of each packed byte holds the first of its 8 pixels. A set bit is a lit pixel.
//! - A `0x00` byte in the compressed stream is always followed by a count byte in `1..=255`
//!   giving the length of the zero run it starts. Every other byte value stands for itself.
//!
//! ## Uses no unsafe code
//!
//! This crate contains zero unsafe blocks of code.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

pub mod binarize;
pub mod charset;
pub mod grid;
pub mod inject;
pub mod pack;
pub mod pipeline;
pub mod rle;

/// The sample value of a lit pixel after binarization.
pub const SET: u8 = 0xFF;
/// The sample value of an unlit pixel after binarization.
pub const CLEAR: u8 = 0x00;

/// The default binarization threshold.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// A borrowed row-major buffer of 8-bit grayscale samples.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct GrayImage<'pixels> {
    /// The width of the image in pixels.
    width: usize,
    /// The height of the image in pixels.
    height: usize,
    /// The samples of the image, `width * height` long.
    pixels: &'pixels [u8],
}

impl<'pixels> GrayImage<'pixels> {
    /// Creates a new [`GrayImage`] from `pixels`.
    ///
    /// # Errors
    ///
    /// - [`InvalidDimensionsError`]: Returned if `pixels` does not hold exactly
    ///     `width * height` samples.
    pub const fn new(
        width: usize,
        height: usize,
        pixels: &'pixels [u8],
    ) -> Result<Self, InvalidDimensionsError> {
        let expected = width.checked_mul(height);
        if !matches!(expected, Some(expected) if expected == pixels.len()) {
            return Err(InvalidDimensionsError {
                width,
                height,
                len: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Returns the width of the image in pixels.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the image in pixels.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the samples of the image in row-major order.
    pub const fn pixels(&self) -> &'pixels [u8] {
        self.pixels
    }
}

/// The pixel buffer given to [`GrayImage::new`] does not match its dimensions.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct InvalidDimensionsError {
    /// The requested width.
    pub width: usize,
    /// The requested height.
    pub height: usize,
    /// The number of samples provided.
    pub len: usize,
}

impl fmt::Display for InvalidDimensionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples do not form a {}x{} image",
            self.len, self.width, self.height
        )
    }
}

impl core::error::Error for InvalidDimensionsError {}
