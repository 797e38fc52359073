//! Geometry types shared across the bridge.

/// Size of a 2D texture in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent2d {
    /// Horizontal extent (number of columns).
    pub width: u32,
    /// Vertical extent (number of rows).
    pub height: u32,
}

impl Extent2d {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Origin of a sub-region upload.
///
/// The components keep the `(x, y)` naming of the engine API, but they are
/// paired with array axes, not with screen axes: `x` offsets array axis 0
/// (rows, the texture's vertical extent) and `y` offsets array axis 1
/// (columns, the horizontal extent). [`PixelRect::from_origin`] is the one
/// place this mapping is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Origin2d {
    /// Offset along array axis 0 (rows).
    pub x: u32,
    /// Offset along array axis 1 (columns).
    pub y: u32,
}

impl Origin2d {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Axis-aligned rectangle of texture pixels, in row/column terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    /// First row (vertical offset).
    pub row: usize,
    /// First column (horizontal offset).
    pub col: usize,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl PixelRect {
    pub fn new(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self {
            row,
            col,
            rows,
            cols,
        }
    }

    /// Rectangle covering a whole texture.
    pub fn whole(size: Extent2d) -> Self {
        Self::new(0, 0, size.height as usize, size.width as usize)
    }

    /// Rectangle of `rows x cols` pixels placed at a sub-region origin.
    pub fn from_origin(origin: Origin2d, rows: usize, cols: usize) -> Self {
        Self::new(origin.x as usize, origin.y as usize, rows, cols)
    }

    /// One past the last row, `None` on overflow.
    pub fn row_end(&self) -> Option<usize> {
        self.row.checked_add(self.rows)
    }

    /// One past the last column, `None` on overflow.
    pub fn col_end(&self) -> Option<usize> {
        self.col.checked_add(self.cols)
    }

    /// Whether the rectangle lies inside a texture of the given size.
    ///
    /// Touching the far edge is allowed.
    pub fn fits_within(&self, size: Extent2d) -> bool {
        let rows_ok = self
            .row_end()
            .is_some_and(|end| end <= size.height as usize);
        let cols_ok = self.col_end().is_some_and(|end| end <= size.width as usize);
        rows_ok && cols_ok
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_x_to_rows() {
        let rect = PixelRect::from_origin(Origin2d::new(3, 5), 2, 4);
        assert_eq!(rect.row, 3);
        assert_eq!(rect.col, 5);
        assert_eq!(rect.rows, 2);
        assert_eq!(rect.cols, 4);
    }

    #[test]
    fn test_fits_within_boundary() {
        let size = Extent2d::new(8, 4);
        assert!(PixelRect::new(2, 6, 2, 2).fits_within(size));
        assert!(!PixelRect::new(3, 6, 2, 2).fits_within(size));
        assert!(!PixelRect::new(2, 7, 2, 2).fits_within(size));
        assert!(PixelRect::whole(size).fits_within(size));
    }

    #[test]
    fn test_fits_within_overflow() {
        let rect = PixelRect::new(usize::MAX, 0, 1, 1);
        assert!(!rect.fits_within(Extent2d::new(1, 1)));
    }
}
