//! Sequencing of the conversion from a grayscale spritesheet to its encoded byte stream.
//!
//! The steps run strictly forward: grid resolution, binarization, optional solid glyph
//! injection, then either raw passthrough or bit packing followed by run-length encoding. When
//! requested, the encoded stream is decoded again and compared against the binarized pixels;
//! the decoded result never feeds into the output.

use core::fmt;

use alloc::vec::Vec;

use crate::{
    DEFAULT_THRESHOLD, GrayImage, InvalidDimensionsError,
    binarize::binarize,
    charset::Charset,
    grid::{GridLayout, GridSource, GridSpec, ResolveGridError, ResolvedGrid, resolve_grid},
    inject::inject_solid_glyph,
    pack::{InvalidLengthError, pack, unpack},
    rle,
};

/// The representation of the produced byte stream.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Encoding {
    /// Bit-packed pixels compressed with [`rle::encode()`].
    #[default]
    Compressed,
    /// One binarized sample per byte.
    Raw,
}

/// Settings controlling a pipeline run.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Options {
    /// The binarization threshold. Samples at or above it are lit.
    pub threshold: u8,
    /// The requested grid geometry.
    pub layout: GridLayout,
    /// The codepoint window held by the grid.
    pub charset: Charset,
    /// The representation of the produced byte stream.
    pub encoding: Encoding,
    /// Whether to light the cell of the solid cursor glyph.
    pub solid_glyph: bool,
    /// Whether to decode the produced stream and compare it against the binarized pixels.
    pub verify: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            layout: GridLayout::default(),
            charset: Charset::ASCII_PRINTABLE,
            encoding: Encoding::Compressed,
            solid_glyph: false,
            verify: false,
        }
    }
}

/// A degraded but non-fatal condition encountered during a run.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Diagnostic {
    /// No grid was detected and the fallback grid was assumed.
    GridFallback(GridSpec),
    /// The image does not divide evenly into cells, or the grid extends past the image.
    /// Partial cells are truncated.
    DimensionMismatch {
        /// The width of the image.
        width: usize,
        /// The height of the image.
        height: usize,
        /// The width of a cell.
        cell_width: usize,
        /// The height of a cell.
        cell_height: usize,
    },
    /// The solid glyph cell lies outside the image or the charset, and nothing was filled.
    SolidGlyphOutOfRange {
        /// The index of the solid glyph cell, or `None` if the charset starts past it.
        index: Option<usize>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridFallback(spec) => write!(f, "no grid detected, assuming {spec}"),
            Self::DimensionMismatch {
                width,
                height,
                cell_width,
                cell_height,
            } => write!(
                f,
                "image size {width}x{height} not evenly divisible by char size \
                 {cell_width}x{cell_height}"
            ),
            Self::SolidGlyphOutOfRange { index: Some(index) } => {
                write!(f, "solid glyph cell {index} lies outside the image")
            }
            Self::SolidGlyphOutOfRange { index: None } => {
                write!(f, "charset has no cell for the solid glyph")
            }
        }
    }
}

/// The outcome of the self-verification step.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Verification {
    /// Verification was not requested, or the output is raw.
    Skipped,
    /// The produced stream decodes to the binarized pixels.
    Passed,
}

/// The result of a successful pipeline run.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Output {
    /// The produced byte stream.
    pub data: Vec<u8>,
    /// The binarized pixels, including any injected glyph.
    pub pixels: Vec<u8>,
    /// The grid the image was interpreted with.
    pub grid: ResolvedGrid,
    /// The representation of [`Output::data`].
    pub encoding: Encoding,
    /// The outcome of self-verification.
    pub verification: Verification,
    /// The degraded conditions encountered.
    pub diagnostics: Vec<Diagnostic>,
}

impl Output {
    /// Returns the size of the binarized image, one byte per pixel.
    pub fn original_size(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the size of the produced byte stream.
    pub fn encoded_size(&self) -> usize {
        self.data.len()
    }

    /// Writes the produced byte stream into `writer`.
    ///
    /// # Errors
    ///
    /// Returns any error reported by `writer`.
    #[cfg(feature = "std")]
    pub fn dump<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(&self.data)
    }
}

/// Runs the pipeline over a `width` by `height` buffer of grayscale `pixels`.
///
/// # Errors
///
/// - [`PipelineError::InvalidDimensions`]: Returned if `pixels` does not hold `width * height`
///     samples.
/// - Any error returned by [`run()`].
pub fn compress(
    width: usize,
    height: usize,
    pixels: &[u8],
    options: &Options,
) -> Result<Output, PipelineError> {
    let image = GrayImage::new(width, height, pixels)?;
    run(&image, options)
}

/// Runs the pipeline over `image`.
///
/// # Errors
///
/// - [`PipelineError::Grid`]: Returned if no usable grid could be resolved.
/// - [`PipelineError::InvalidLength`]: Returned if compressing an image whose pixel count is
///     not a multiple of 8.
/// - [`PipelineError::Verification`]: Returned if verification was requested and the produced
///     stream does not decode to the binarized pixels.
pub fn run(image: &GrayImage<'_>, options: &Options) -> Result<Output, PipelineError> {
    let (width, height) = (image.width(), image.height());
    let mut diagnostics = Vec::new();

    let grid = resolve_grid(image, options.threshold, &options.layout, &options.charset)?;
    if grid.source == GridSource::Fallback {
        diagnostics.push(Diagnostic::GridFallback(grid.spec));
    }
    if !grid.spec.divides(width, height) || !grid.spec.fits(width, height) {
        diagnostics.push(Diagnostic::DimensionMismatch {
            width,
            height,
            cell_width: grid.spec.cell_width(),
            cell_height: grid.spec.cell_height(),
        });
    }
    log::debug!("using {} grid: {}", grid.source.as_str(), grid.spec);

    let mut pixels = binarize(image.pixels(), options.threshold);

    if options.solid_glyph {
        let filled = inject_solid_glyph(&mut pixels, width, height, &grid.spec, &options.charset);
        if filled == 0 {
            diagnostics.push(Diagnostic::SolidGlyphOutOfRange {
                index: options.charset.solid_glyph_index(),
            });
        }
        log::debug!("solid glyph filled {filled} pixels");
    }

    for diagnostic in &diagnostics {
        log::warn!("{diagnostic}");
    }

    let (data, verification) = match options.encoding {
        Encoding::Raw => (pixels.clone(), Verification::Skipped),
        Encoding::Compressed => {
            let packed = pack(&pixels)?;
            let encoded = rle::encode(&packed);
            log::debug!(
                "packed {} pixels into {} bytes, encoded to {} bytes",
                pixels.len(),
                packed.len(),
                encoded.len()
            );

            if options.verify {
                let encoded = verify(encoded, &pixels)?;
                (encoded, Verification::Passed)
            } else {
                (encoded, Verification::Skipped)
            }
        }
    };

    Ok(Output {
        data,
        pixels,
        grid,
        encoding: options.encoding,
        verification,
        diagnostics,
    })
}

/// Checks that `encoded` decodes and unpacks to exactly `pixels`, handing `encoded` back on
/// success.
///
/// # Errors
///
/// - [`VerificationError`]: Returned if the decoded pixels differ from `pixels`. The error
///     keeps `encoded` for diagnostic output.
pub fn verify(encoded: Vec<u8>, pixels: &[u8]) -> Result<Vec<u8>, VerificationError> {
    let packed = rle::decode(&encoded, pixels.len().div_ceil(8));
    let decoded = unpack(&packed, pixels.len());

    if decoded == pixels {
        return Ok(encoded);
    }

    let first_mismatch = decoded
        .iter()
        .zip(pixels)
        .position(|(decoded, original)| decoded != original)
        .unwrap_or(decoded.len().min(pixels.len()));

    Err(VerificationError {
        first_mismatch,
        expected_len: pixels.len(),
        decoded_len: decoded.len(),
        encoded,
    })
}

/// The produced stream does not decode to the pixels it was produced from.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct VerificationError {
    /// The index of the first pixel that differs.
    pub first_mismatch: usize,
    /// The number of pixels that went in.
    pub expected_len: usize,
    /// The number of pixels that came back out.
    pub decoded_len: usize,
    /// The stream that failed verification.
    pub encoded: Vec<u8>,
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "compression verification failed: first mismatch at pixel {} ({} of {} pixels decoded)",
            self.first_mismatch, self.decoded_len, self.expected_len
        )
    }
}

impl core::error::Error for VerificationError {}

/// Various errors that can occur while running the pipeline.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum PipelineError {
    /// The pixel buffer does not match the image dimensions.
    InvalidDimensions(InvalidDimensionsError),
    /// No usable grid could be resolved.
    Grid(ResolveGridError),
    /// The pixel count is not a multiple of 8.
    InvalidLength(InvalidLengthError),
    /// The produced stream failed verification.
    Verification(VerificationError),
}

impl From<InvalidDimensionsError> for PipelineError {
    fn from(value: InvalidDimensionsError) -> Self {
        Self::InvalidDimensions(value)
    }
}

impl From<ResolveGridError> for PipelineError {
    fn from(value: ResolveGridError) -> Self {
        Self::Grid(value)
    }
}

impl From<InvalidLengthError> for PipelineError {
    fn from(value: InvalidLengthError) -> Self {
        Self::InvalidLength(value)
    }
}

impl From<VerificationError> for PipelineError {
    fn from(value: VerificationError) -> Self {
        Self::Verification(value)
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions(error) => write!(f, "invalid image: {error}"),
            Self::Grid(error) => write!(f, "error resolving grid: {error}"),
            Self::InvalidLength(error) => write!(f, "error packing pixels: {error}"),
            Self::Verification(error) => write!(f, "{error}"),
        }
    }
}

impl core::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidDimensions(error) => Some(error),
            Self::Grid(error) => Some(error),
            Self::InvalidLength(error) => Some(error),
            Self::Verification(error) => Some(error),
        }
    }
}
