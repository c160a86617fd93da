//! Affine geotransformation for rasters

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Relative tolerance for pixel-size comparisons.
///
/// Exact float equality would reject rasters whose cell size went through
/// any coordinate arithmetic upstream (warping, extent snapping).
pub const PIXEL_SIZE_REL_TOL: f64 = 1e-9;

/// Affine transformation coefficients for georeferencing rasters.
///
/// Maps pixel coordinates (col, row) to geographic coordinates (x, y):
/// ```text
/// x = origin_x + col * pixel_width + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// For north-up images `row_rotation` and `col_rotation` are 0 and
/// `pixel_height` is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// X coordinate of the upper-left corner
    pub origin_x: f64,
    /// Y coordinate of the upper-left corner
    pub origin_y: f64,
    /// Pixel width (cell size in X direction)
    pub pixel_width: f64,
    /// Pixel height (cell size in Y direction, usually negative)
    pub pixel_height: f64,
    /// Rotation about X axis (usually 0)
    pub row_rotation: f64,
    /// Rotation about Y axis (usually 0)
    pub col_rotation: f64,
}

impl GeoTransform {
    /// Create a new GeoTransform with no rotation (north-up image)
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation: 0.0,
            col_rotation: 0.0,
        }
    }

    /// Parse a GDAL-style coefficient slice
    /// `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`.
    ///
    /// Fails with [`Error::InvalidGeoTransform`] when fewer than 6
    /// coefficients are supplied; extra coefficients are ignored.
    pub fn parse(coeffs: &[f64]) -> Result<Self> {
        match coeffs.first_chunk::<6>() {
            Some(&arr) => Ok(Self::from_gdal(arr)),
            None => Err(Error::InvalidGeoTransform { got: coeffs.len() }),
        }
    }

    /// Create from a GDAL-style array (infallible variant of [`parse`](Self::parse))
    pub fn from_gdal(coeffs: [f64; 6]) -> Self {
        Self {
            origin_x: coeffs[0],
            pixel_width: coeffs[1],
            row_rotation: coeffs[2],
            origin_y: coeffs[3],
            col_rotation: coeffs[4],
            pixel_height: coeffs[5],
        }
    }

    /// Convert to a GDAL-style array
    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.col_rotation,
            self.pixel_height,
        ]
    }

    /// Get the cell size in X direction (absolute value)
    pub fn cell_size(&self) -> f64 {
        self.pixel_width.abs()
    }

    /// Get the cell size, requiring square pixels.
    ///
    /// The dispersion and area computations are only defined on square
    /// pixels (`|pixel_width| == |pixel_height|`). Fails with
    /// [`Error::NonSquarePixel`] otherwise and [`Error::InvalidPixelSize`]
    /// when the size is not positive.
    pub fn square_pixel_size(&self) -> Result<f64> {
        let w = self.pixel_width.abs();
        let h = self.pixel_height.abs();

        if !pixel_sizes_match(w, h) {
            return Err(Error::NonSquarePixel {
                x: self.pixel_width,
                y: self.pixel_height,
            });
        }
        if w <= 0.0 || !w.is_finite() {
            return Err(Error::InvalidPixelSize(self.pixel_width));
        }

        Ok(w)
    }

    /// Check if this is a north-up image (no rotation)
    pub fn is_north_up(&self) -> bool {
        self.row_rotation.abs() < 1e-10
            && self.col_rotation.abs() < 1e-10
            && self.pixel_height < 0.0
    }

    /// Geographic coordinates of the top-left corner of a pixel
    pub fn pixel_to_geo_corner(&self, col: usize, row: usize) -> (f64, f64) {
        let col_f = col as f64;
        let row_f = row as f64;

        let x = self.origin_x + col_f * self.pixel_width + row_f * self.row_rotation;
        let y = self.origin_y + col_f * self.col_rotation + row_f * self.pixel_height;

        (x, y)
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` for a raster of given dimensions
    pub fn bounds(&self, width: usize, height: usize) -> (f64, f64, f64, f64) {
        let (x0, y0) = self.pixel_to_geo_corner(0, 0);
        let (x1, y1) = self.pixel_to_geo_corner(width, 0);
        let (x2, y2) = self.pixel_to_geo_corner(0, height);
        let (x3, y3) = self.pixel_to_geo_corner(width, height);

        let min_x = x0.min(x1).min(x2).min(x3);
        let max_x = x0.max(x1).max(x2).max(x3);
        let min_y = y0.min(y1).min(y2).min(y3);
        let max_y = y0.max(y1).max(y2).max(y3);

        (min_x, min_y, max_x, max_y)
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}

/// Compare two absolute pixel sizes within [`PIXEL_SIZE_REL_TOL`]
pub fn pixel_sizes_match(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= PIXEL_SIZE_REL_TOL * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_gdal_order() {
        let gt = GeoTransform::parse(&[100.0, 10.0, 0.0, 200.0, 0.0, -10.0]).unwrap();
        assert_relative_eq!(gt.origin_x, 100.0);
        assert_relative_eq!(gt.origin_y, 200.0);
        assert_relative_eq!(gt.pixel_width, 10.0);
        assert_relative_eq!(gt.pixel_height, -10.0);
        assert!(gt.is_north_up());
    }

    #[test]
    fn test_parse_too_few_coefficients() {
        let err = GeoTransform::parse(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidGeoTransform { got: 3 }));
    }

    #[test]
    fn test_gdal_roundtrip() {
        let coeffs = [5.0, 2.0, 0.0, 7.0, 0.0, -2.0];
        let gt = GeoTransform::from_gdal(coeffs);
        assert_eq!(gt.to_gdal(), coeffs);
    }

    #[test]
    fn test_square_pixel_size() {
        let gt = GeoTransform::new(0.0, 0.0, 30.0, -30.0);
        assert_relative_eq!(gt.square_pixel_size().unwrap(), 30.0);
    }

    #[test]
    fn test_non_square_pixels_rejected() {
        let gt = GeoTransform::new(0.0, 0.0, 30.0, -25.0);
        assert!(matches!(
            gt.square_pixel_size(),
            Err(Error::NonSquarePixel { .. })
        ));
    }

    #[test]
    fn test_zero_pixel_size_rejected() {
        let gt = GeoTransform::new(0.0, 0.0, 0.0, 0.0);
        assert!(matches!(
            gt.square_pixel_size(),
            Err(Error::InvalidPixelSize(_))
        ));
    }

    #[test]
    fn test_bounds() {
        let gt = GeoTransform::new(0.0, 100.0, 1.0, -1.0);
        let (min_x, min_y, max_x, max_y) = gt.bounds(100, 100);

        assert_relative_eq!(min_x, 0.0, epsilon = 1e-10);
        assert_relative_eq!(min_y, 0.0, epsilon = 1e-10);
        assert_relative_eq!(max_x, 100.0, epsilon = 1e-10);
        assert_relative_eq!(max_y, 100.0, epsilon = 1e-10);
    }
}
