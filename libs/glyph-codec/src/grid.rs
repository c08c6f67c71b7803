//! Glyph cell geometry.
//!
//! The grid is either taken from explicit parameters, detected from fully dark separator
//! lines, or assumed from a fixed column count when detection fails.
//!
//! Detection assumes that separators are evenly spaced: the cell pitch is measured between the
//! first two separators of each axis and the cell count is one less than the separator count.
//! Irregular spacing produces a plausible but wrong grid rather than an error.

use core::fmt;

use alloc::vec;

use crate::{GrayImage, binarize::is_lit, charset::Charset};

/// The default number of columns assumed when no grid can be detected.
pub const FALLBACK_COLUMNS: usize = 16;

/// The geometry of the glyph cells of a spritesheet.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct GridSpec {
    /// The number of cells in each row of the grid.
    columns: usize,
    /// The number of cells in each column of the grid.
    rows: usize,
    /// The width of a cell in pixels.
    cell_width: usize,
    /// The height of a cell in pixels.
    cell_height: usize,
}

impl GridSpec {
    /// Creates a new [`GridSpec`], returning `None` if any dimension is zero.
    pub const fn new(
        columns: usize,
        rows: usize,
        cell_width: usize,
        cell_height: usize,
    ) -> Option<Self> {
        if columns == 0 || rows == 0 || cell_width == 0 || cell_height == 0 {
            return None;
        }

        Some(Self {
            columns,
            rows,
            cell_width,
            cell_height,
        })
    }

    /// Returns the number of cells in each row of the grid.
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the number of cells in each column of the grid.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the width of a cell in pixels.
    pub const fn cell_width(&self) -> usize {
        self.cell_width
    }

    /// Returns the height of a cell in pixels.
    pub const fn cell_height(&self) -> usize {
        self.cell_height
    }

    /// Returns the number of cells in the grid.
    pub const fn glyph_count(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    /// Returns the pixel coordinates of the top-left corner of cell `index`.
    ///
    /// Cells are numbered row-major. Indices past [`GridSpec::glyph_count`] continue onto
    /// rows below the grid and may lie outside the image.
    pub const fn cell_origin(&self, index: usize) -> (usize, usize) {
        let x = (index % self.columns).saturating_mul(self.cell_width);
        let y = (index / self.columns).saturating_mul(self.cell_height);
        (x, y)
    }

    /// Returns `true` if an image of `width` by `height` pixels divides evenly into cells.
    pub const fn divides(&self, width: usize, height: usize) -> bool {
        width % self.cell_width == 0 && height % self.cell_height == 0
    }

    /// Returns `true` if every cell of the grid lies within a `width` by `height` image.
    pub const fn fits(&self, width: usize, height: usize) -> bool {
        self.columns.saturating_mul(self.cell_width) <= width
            && self.rows.saturating_mul(self.cell_height) <= height
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} cells of {}x{} pixels",
            self.columns, self.rows, self.cell_width, self.cell_height
        )
    }
}

/// What to do when no grid is requested and none can be detected.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Assume a grid with the given number of columns and enough rows to hold the charset.
    FixedColumns(usize),
    /// Fail with [`ResolveGridError::GridUndetectable`].
    Disabled,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::FixedColumns(FALLBACK_COLUMNS)
    }
}

/// The caller's request for grid geometry.
///
/// Either explicit half bypasses detection. The missing half is derived by dividing the image
/// dimensions.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct GridLayout {
    /// Explicit `(columns, rows)`.
    pub grid: Option<(usize, usize)>,
    /// Explicit `(cell_width, cell_height)`.
    pub cell_size: Option<(usize, usize)>,
    /// The policy applied when detection fails.
    pub fallback: FallbackPolicy,
}

/// How a [`GridSpec`] was obtained.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum GridSource {
    /// Built from explicit grid and/or cell size parameters.
    Explicit,
    /// Detected from separator lines.
    Detected,
    /// Assumed by the [`FallbackPolicy`].
    Fallback,
}

impl GridSource {
    /// Returns the textual representation of the [`GridSource`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Detected => "detected",
            Self::Fallback => "fallback",
        }
    }
}

/// A resolved [`GridSpec`] along with its [`GridSource`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct ResolvedGrid {
    /// The grid geometry.
    pub spec: GridSpec,
    /// Where the geometry came from.
    pub source: GridSource,
}

/// Determines the grid geometry of `image` as requested by `layout`.
///
/// # Errors
///
/// - [`ResolveGridError::GridUndetectable`]: Returned if detection was required, failed, and
///     the fallback policy is [`FallbackPolicy::Disabled`].
/// - [`ResolveGridError::EmptyCell`]: Returned if a given or derived dimension is zero, such
///     as when more columns are requested than the image has pixels.
pub fn resolve_grid(
    image: &GrayImage<'_>,
    threshold: u8,
    layout: &GridLayout,
    charset: &Charset,
) -> Result<ResolvedGrid, ResolveGridError> {
    let (width, height) = (image.width(), image.height());

    let (columns, rows, cell_width, cell_height) = match (layout.grid, layout.cell_size) {
        (Some((columns, rows)), Some((cell_width, cell_height))) => {
            (columns, rows, cell_width, cell_height)
        }
        (Some((columns, rows)), None) => (
            columns,
            rows,
            width.checked_div(columns).unwrap_or(0),
            height.checked_div(rows).unwrap_or(0),
        ),
        (None, Some((cell_width, cell_height))) => (
            width.checked_div(cell_width).unwrap_or(0),
            height.checked_div(cell_height).unwrap_or(0),
            cell_width,
            cell_height,
        ),
        (None, None) => {
            if let Some(spec) = detect_grid(image, threshold) {
                log::debug!("detected {spec}");
                return Ok(ResolvedGrid {
                    spec,
                    source: GridSource::Detected,
                });
            }

            let FallbackPolicy::FixedColumns(columns) = layout.fallback else {
                return Err(ResolveGridError::GridUndetectable);
            };

            let spec = fallback_grid(width, height, columns, charset)?;
            return Ok(ResolvedGrid {
                spec,
                source: GridSource::Fallback,
            });
        }
    };

    let spec = GridSpec::new(columns, rows, cell_width, cell_height).ok_or(
        ResolveGridError::EmptyCell {
            columns,
            rows,
            cell_width,
            cell_height,
        },
    )?;

    Ok(ResolvedGrid {
        spec,
        source: GridSource::Explicit,
    })
}

/// Detects the grid of `image` from fully dark separator columns and rows.
///
/// Returns `None` if fewer than two separators exist along either axis.
pub fn detect_grid(image: &GrayImage<'_>, threshold: u8) -> Option<GridSpec> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return None;
    }

    let mut dark_columns = vec![true; width];
    let mut dark_rows = vec![true; height];
    for (y, row) in image.pixels().chunks_exact(width).take(height).enumerate() {
        for (x, &sample) in row.iter().enumerate() {
            if is_lit(sample, threshold) {
                dark_columns[x] = false;
                dark_rows[y] = false;
            }
        }
    }

    let (vertical, cell_width) = separators(&dark_columns)?;
    let (horizontal, cell_height) = separators(&dark_rows)?;

    GridSpec::new(vertical - 1, horizontal - 1, cell_width, cell_height)
}

/// Returns the number of separators marked in `flags` and the distance between the first two,
/// or `None` if fewer than two are marked.
fn separators(flags: &[bool]) -> Option<(usize, usize)> {
    let mut positions = flags
        .iter()
        .enumerate()
        .filter_map(|(position, &dark)| dark.then_some(position));

    let first = positions.next()?;
    let second = positions.next()?;

    Some((2 + positions.count(), second - first))
}

/// Returns the grid assumed for a `width` by `height` image with `columns` columns and enough
/// rows to hold every glyph of `charset`.
///
/// Cells are at least one pixel in each direction. On images too small to give every cell a
/// pixel, the grid extends past the image and the cells outside it are clipped.
///
/// # Errors
///
/// - [`ResolveGridError::EmptyCell`]: Returned if `columns` or the charset is empty.
pub fn fallback_grid(
    width: usize,
    height: usize,
    columns: usize,
    charset: &Charset,
) -> Result<GridSpec, ResolveGridError> {
    if columns == 0 || charset.count == 0 {
        return Err(ResolveGridError::EmptyCell {
            columns,
            rows: 0,
            cell_width: 0,
            cell_height: 0,
        });
    }

    let rows = charset.count.div_ceil(columns);
    let cell_width = (width / columns).max(1);
    let cell_height = (height / rows).max(1);

    GridSpec::new(columns, rows, cell_width, cell_height).ok_or(ResolveGridError::EmptyCell {
        columns,
        rows,
        cell_width,
        cell_height,
    })
}

/// Various errors that can occur while resolving a [`GridSpec`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ResolveGridError {
    /// No grid was requested, none was detected, and fallback is disabled.
    GridUndetectable,
    /// A given or derived dimension of the grid is zero.
    EmptyCell {
        /// The number of columns.
        columns: usize,
        /// The number of rows.
        rows: usize,
        /// The width of a cell.
        cell_width: usize,
        /// The height of a cell.
        cell_height: usize,
    },
}

impl fmt::Display for ResolveGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridUndetectable => write!(f, "no glyph grid could be detected"),
            Self::EmptyCell {
                columns,
                rows,
                cell_width,
                cell_height,
            } => write!(
                f,
                "grid of {columns}x{rows} cells of {cell_width}x{cell_height} pixels is empty"
            ),
        }
    }
}

impl core::error::Error for ResolveGridError {}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;

    /// Builds a lit `width` by `height` image with dark columns at `xs` and dark rows at `ys`.
    fn separated(width: usize, height: usize, xs: &[usize], ys: &[usize]) -> Vec<u8> {
        let mut pixels = vec![0xFF; width * height];
        for y in 0..height {
            for x in 0..width {
                if xs.contains(&x) || ys.contains(&y) {
                    pixels[y * width + x] = 0x00;
                }
            }
        }
        pixels
    }

    #[test]
    fn detects_single_cell() {
        let pixels = separated(20, 20, &[5, 15], &[3, 13]);
        let image = GrayImage::new(20, 20, &pixels).unwrap();

        let spec = detect_grid(&image, 128).unwrap();
        assert_eq!(spec, GridSpec::new(1, 1, 10, 10).unwrap());
    }

    #[test]
    fn detects_multiple_cells() {
        let pixels = separated(25, 13, &[0, 8, 16, 24], &[0, 6, 12]);
        let image = GrayImage::new(25, 13, &pixels).unwrap();

        let spec = detect_grid(&image, 128).unwrap();
        assert_eq!(spec, GridSpec::new(3, 2, 8, 6).unwrap());
    }

    #[test]
    fn irregular_separators_measure_first_pitch() {
        let pixels = separated(30, 10, &[0, 4, 29], &[0, 9]);
        let image = GrayImage::new(30, 10, &pixels).unwrap();

        let spec = detect_grid(&image, 128).unwrap();
        assert_eq!(spec, GridSpec::new(2, 1, 4, 9).unwrap());
    }

    #[test]
    fn single_separator_is_not_detected() {
        let pixels = separated(20, 20, &[5], &[3, 13]);
        let image = GrayImage::new(20, 20, &pixels).unwrap();

        assert_eq!(detect_grid(&image, 128), None);
    }

    #[test]
    fn falls_back_to_sixteen_columns() {
        let pixels = vec![0xFF; 128 * 48];
        let image = GrayImage::new(128, 48, &pixels).unwrap();

        let resolved =
            resolve_grid(&image, 128, &GridLayout::default(), &Charset::ASCII_PRINTABLE).unwrap();
        assert_eq!(resolved.source, GridSource::Fallback);
        assert_eq!(resolved.spec, GridSpec::new(16, 6, 8, 8).unwrap());
    }

    #[test]
    fn fallback_cells_are_at_least_one_pixel() {
        let spec = fallback_grid(8, 8, FALLBACK_COLUMNS, &Charset::ASCII_PRINTABLE).unwrap();

        assert_eq!(spec, GridSpec::new(16, 6, 1, 1).unwrap());
        assert!(spec.divides(8, 8));
        assert!(!spec.fits(8, 8));
    }

    #[test]
    fn fallback_without_columns_is_empty() {
        assert!(matches!(
            fallback_grid(64, 64, 0, &Charset::ASCII_PRINTABLE),
            Err(ResolveGridError::EmptyCell { columns: 0, .. })
        ));
        assert!(matches!(
            fallback_grid(64, 64, 16, &Charset::new(0x20, 0)),
            Err(ResolveGridError::EmptyCell { .. })
        ));
    }

    #[test]
    fn disabled_fallback_fails() {
        let pixels = vec![0xFF; 64];
        let image = GrayImage::new(8, 8, &pixels).unwrap();
        let layout = GridLayout {
            fallback: FallbackPolicy::Disabled,
            ..GridLayout::default()
        };

        assert_eq!(
            resolve_grid(&image, 128, &layout, &Charset::ASCII_PRINTABLE),
            Err(ResolveGridError::GridUndetectable)
        );
    }

    #[test]
    fn explicit_halves_derive_the_other() {
        let pixels = vec![0; 96 * 40];
        let image = GrayImage::new(96, 40, &pixels).unwrap();
        let charset = Charset::ASCII_PRINTABLE;

        let grid_only = GridLayout {
            grid: Some((12, 4)),
            ..GridLayout::default()
        };
        let resolved = resolve_grid(&image, 128, &grid_only, &charset).unwrap();
        assert_eq!(resolved.spec, GridSpec::new(12, 4, 8, 10).unwrap());
        assert_eq!(resolved.source, GridSource::Explicit);

        let cell_only = GridLayout {
            cell_size: Some((7, 9)),
            ..GridLayout::default()
        };
        let resolved = resolve_grid(&image, 128, &cell_only, &charset).unwrap();
        assert_eq!(resolved.spec, GridSpec::new(13, 4, 7, 9).unwrap());
        assert!(!resolved.spec.divides(96, 40));

        let both = GridLayout {
            grid: Some((18, 7)),
            cell_size: Some((5, 5)),
            ..GridLayout::default()
        };
        let resolved = resolve_grid(&image, 128, &both, &charset).unwrap();
        assert_eq!(resolved.spec, GridSpec::new(18, 7, 5, 5).unwrap());
    }

    #[test]
    fn oversized_grid_is_empty() {
        let pixels = vec![0; 10 * 10];
        let image = GrayImage::new(10, 10, &pixels).unwrap();
        let layout = GridLayout {
            grid: Some((20, 1)),
            ..GridLayout::default()
        };

        assert!(matches!(
            resolve_grid(&image, 128, &layout, &Charset::ASCII_PRINTABLE),
            Err(ResolveGridError::EmptyCell { cell_width: 0, .. })
        ));
    }

    #[test]
    fn cell_origin_is_row_major() {
        let spec = GridSpec::new(16, 6, 8, 12).unwrap();

        assert_eq!(spec.cell_origin(0), (0, 0));
        assert_eq!(spec.cell_origin(17), (8, 12));
        assert_eq!(spec.cell_origin(95), (120, 60));
    }
}
