//! # sprawlgis Core
//!
//! Core types and I/O for the sprawlgis urban-sprawl metric suite.
//!
//! This crate provides:
//! - `Raster<T>`: Generic georeferenced raster grid
//! - `GeoTransform`: Affine transformation for georeferencing
//! - `CancelToken`: Cooperative cancellation for long scans
//! - Native single-band GeoTIFF I/O

pub mod cancel;
pub mod error;
pub mod io;
pub mod raster;

pub use cancel::CancelToken;
pub use error::{Error, Result};
pub use raster::{GeoTransform, Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cancel::CancelToken;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{GeoTransform, Raster, RasterElement};
}
