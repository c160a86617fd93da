//! Raster data structures and operations

mod element;
mod geotransform;
mod grid;

pub use element::RasterElement;
pub use geotransform::{pixel_sizes_match, GeoTransform, PIXEL_SIZE_REL_TOL};
pub use grid::{Raster, RasterStatistics};
