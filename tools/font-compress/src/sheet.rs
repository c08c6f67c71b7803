//! Loading of spritesheet images and saving of binarized previews.

use std::path::Path;

use anyhow::{Context, Result};
use glyph_codec::{GrayImage, InvalidDimensionsError};

/// An owned 8-bit grayscale spritesheet.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Spritesheet {
    /// The width of the spritesheet in pixels.
    width: usize,
    /// The height of the spritesheet in pixels.
    height: usize,
    /// The row-major grayscale samples.
    pixels: Vec<u8>,
}

impl Spritesheet {
    /// Returns the width of the spritesheet in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the spritesheet in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrows the spritesheet as a [`GrayImage`].
    ///
    /// # Errors
    ///
    /// Never fails for a decoded spritesheet; the error is forwarded from [`GrayImage::new`].
    pub fn as_gray_image(&self) -> Result<GrayImage<'_>, InvalidDimensionsError> {
        GrayImage::new(self.width, self.height, &self.pixels)
    }
}

/// Decodes the image at `path` and converts it to 8-bit grayscale.
///
/// # Errors
///
/// Returns errors if the file cannot be read or decoded.
pub fn load(path: &Path) -> Result<Spritesheet> {
    let image = image::open(path)
        .with_context(|| format!("error opening {}", path.display()))?
        .into_luma8();

    let width = image.width() as usize;
    let height = image.height() as usize;
    log::debug!("loaded {}: {width}x{height} pixels", path.display());

    Ok(Spritesheet {
        width,
        height,
        pixels: image.into_raw(),
    })
}

/// Saves binarized `pixels` of a `width` by `height` image as a grayscale image at `path`.
///
/// The image format is chosen from the extension of `path`.
///
/// # Errors
///
/// Returns errors if the dimensions do not match `pixels` or if encoding or writing fails.
pub fn save_preview(pixels: &[u8], width: usize, height: usize, path: &Path) -> Result<()> {
    let width = u32::try_from(width).context("preview width out of range")?;
    let height = u32::try_from(height).context("preview height out of range")?;

    let preview = image::GrayImage::from_raw(width, height, pixels.to_vec())
        .context("preview pixels do not match the image dimensions")?;
    preview
        .save(path)
        .with_context(|| format!("error saving preview {}", path.display()))?;

    log::info!("Preview saved: {}", path.display());
    Ok(())
}
