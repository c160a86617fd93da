//! Error types for sprawlgis

use thiserror::Error;

/// Main error type for sprawlgis operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Invalid geotransform: expected 6 coefficients, got {got}")]
    InvalidGeoTransform { got: usize },

    #[error("Pixels are not square: {x} x {y}")]
    NonSquarePixel { x: f64, y: f64 },

    #[error("Pixel size mismatch between rasters: {a} vs {b}")]
    PixelSizeMismatch { a: f64, b: f64 },

    #[error("Rasters do not share a pixel grid: origin ({ax}, {ay}) vs ({bx}, {by})")]
    TransformMismatch { ax: f64, ay: f64, bx: f64, by: f64 },

    #[error(
        "Clipped raster does not fit the full extent: \
         offset ({row_offset}, {col_offset}), clip ({rows}, {cols}) in ({full_rows}, {full_cols})"
    )]
    AlignmentOutOfBounds {
        row_offset: i64,
        col_offset: i64,
        rows: usize,
        cols: usize,
        full_rows: usize,
        full_cols: usize,
    },

    #[error("Invalid pixel size: {0}")]
    InvalidPixelSize(f64),

    #[error("No positive SI values in raster")]
    NoPositiveValues,

    #[error("Sum of resident and employee count must be positive, got {0}")]
    NonPositivePopulation(i64),

    #[error("SSA value must be between 0 and 1, got {0}")]
    InvalidSsa(f64),

    #[error("Division by zero: {0}")]
    DivisionByZero(&'static str),

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

/// Result type alias for sprawlgis operations
pub type Result<T> = std::result::Result<T, Error>;
