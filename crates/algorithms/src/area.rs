//! Ground-area measurement
//!
//! Converts cell counts to ground area in the raster's linear units
//! squared. Feeds the land-uptake (LUP) computation.

use sprawlgis_core::{Raster, RasterElement, Result};

/// Ground area covered by cells satisfying a predicate.
///
/// A single pass over the grid; the result is
/// `matching_count * pixel_size^2`. Requires square pixels.
pub fn selected_area<T, F>(raster: &Raster<T>, predicate: F) -> Result<f64>
where
    T: RasterElement,
    F: Fn(T) -> bool,
{
    let pixel_size = raster.square_pixel_size()?;

    let count = raster.data().iter().filter(|&&v| predicate(v)).count();

    Ok(count as f64 * pixel_size * pixel_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sprawlgis_core::{Error, GeoTransform};

    #[test]
    fn test_area_counts_matching_cells() {
        // 10x10 grid, 2-unit pixels, 25 build-up cells -> 25 * 2^2 = 100
        let mut raster: Raster<i32> = Raster::new(10, 10);
        raster.set_transform(GeoTransform::new(0.0, 20.0, 2.0, -2.0));
        for row in 0..5 {
            for col in 0..5 {
                raster.set(row, col, 1).unwrap();
            }
        }

        let area = selected_area(&raster, |v| v == 1).unwrap();
        assert_relative_eq!(area, 100.0);
    }

    #[test]
    fn test_area_empty_selection() {
        let mut raster: Raster<i32> = Raster::new(4, 4);
        raster.set_transform(GeoTransform::new(0.0, 4.0, 1.0, -1.0));

        let area = selected_area(&raster, |v| v == 1).unwrap();
        assert_relative_eq!(area, 0.0);
    }

    #[test]
    fn test_area_requires_square_pixels() {
        let mut raster: Raster<i32> = Raster::new(4, 4);
        raster.set_transform(GeoTransform::new(0.0, 4.0, 2.0, -1.0));

        assert!(matches!(
            selected_area(&raster, |v| v == 1),
            Err(Error::NonSquarePixel { .. })
        ));
    }
}
