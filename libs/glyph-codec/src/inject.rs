//! In-place filling of glyph cells.

use crate::{SET, charset::Charset, grid::GridSpec};

/// Lights every pixel of cell `index`, clipped to the `width` by `height` image.
///
/// Returns the number of pixels that fall inside the image. A cell lying entirely outside the
/// image is left untouched and `0` is returned.
pub fn fill_cell(
    pixels: &mut [u8],
    width: usize,
    height: usize,
    grid: &GridSpec,
    index: usize,
) -> usize {
    let (x0, y0) = grid.cell_origin(index);
    let x1 = x0.saturating_add(grid.cell_width()).min(width);
    let y1 = y0.saturating_add(grid.cell_height()).min(height);
    if x0 >= x1 || y0 >= y1 {
        return 0;
    }

    let mut filled = 0;
    for row in pixels.chunks_exact_mut(width).take(y1).skip(y0) {
        row[x0..x1].fill(SET);
        filled += x1 - x0;
    }

    filled
}

/// Lights the cell holding the solid cursor glyph of `charset`.
///
/// Returns the number of pixels filled, which is `0` if the grid is too small to hold the cell.
pub fn inject_solid_glyph(
    pixels: &mut [u8],
    width: usize,
    height: usize,
    grid: &GridSpec,
    charset: &Charset,
) -> usize {
    let Some(index) = charset.solid_glyph_index() else {
        return 0;
    };

    fill_cell(pixels, width, height, grid, index)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::CLEAR;

    #[test]
    fn fills_the_del_cell() {
        let grid = GridSpec::new(16, 6, 2, 2).unwrap();
        let (width, height) = (32, 12);
        let mut pixels = vec![CLEAR; width * height];

        let filled = inject_solid_glyph(
            &mut pixels,
            width,
            height,
            &grid,
            &Charset::ASCII_PRINTABLE,
        );
        assert_eq!(filled, 4);

        // Cell 95 sits in the last column of the sixth row.
        for (index, &sample) in pixels.iter().enumerate() {
            let (x, y) = (index % width, index / width);
            let inside = (30..32).contains(&x) && (10..12).contains(&y);
            assert_eq!(sample == SET, inside, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn clips_partial_cells() {
        let grid = GridSpec::new(2, 1, 4, 4).unwrap();
        let (width, height) = (6, 3);
        let mut pixels = vec![CLEAR; width * height];

        assert_eq!(fill_cell(&mut pixels, width, height, &grid, 1), 6);
        assert!(pixels.chunks(width).all(|row| row == [0, 0, 0, 0, 0xFF, 0xFF]));
    }

    #[test]
    fn out_of_range_cell_is_noop() {
        let grid = GridSpec::new(16, 5, 2, 2).unwrap();
        let (width, height) = (32, 10);
        let mut pixels = vec![CLEAR; width * height];

        let filled = inject_solid_glyph(
            &mut pixels,
            width,
            height,
            &grid,
            &Charset::ASCII_PRINTABLE,
        );
        assert_eq!(filled, 0);
        assert!(pixels.iter().all(|&sample| sample == CLEAR));
    }
}
