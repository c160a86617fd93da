//! Clip-extent alignment
//!
//! An external masking step (polygon clip) produces a raster covering only
//! the clip footprint. [`overlay_clip`] places that sub-extent back into the
//! coordinate frame of the full raster, so every later stage works on grids
//! of identical dimensions.

use ndarray::s;
use sprawlgis_core::raster::pixel_sizes_match;
use sprawlgis_core::{Error, Raster, RasterElement, Result};

/// Overlay a clipped sub-extent raster onto the full raster's frame.
///
/// Both rasters must have square pixels of the same absolute size. The
/// result has the full raster's dimensions and transform; cells inside the
/// clip footprint carry the clipped values, everything else is `no_data`.
///
/// The clipped extent must be fully contained in the full extent; a clip
/// that sticks out means the inputs disagree about the study area and is
/// rejected with [`Error::AlignmentOutOfBounds`] rather than truncated.
pub fn overlay_clip<T: RasterElement>(
    full: &Raster<T>,
    clipped: &Raster<T>,
    no_data: T,
) -> Result<Raster<T>> {
    let pixel_size = full.square_pixel_size()?;
    let clipped_pixel_size = clipped.square_pixel_size()?;

    if !pixel_sizes_match(pixel_size, clipped_pixel_size) {
        return Err(Error::PixelSizeMismatch {
            a: pixel_size,
            b: clipped_pixel_size,
        });
    }

    let full_gt = full.transform();
    let clip_gt = clipped.transform();

    let row_offset = ((full_gt.origin_y - clip_gt.origin_y) / pixel_size).round() as i64;
    let col_offset = ((clip_gt.origin_x - full_gt.origin_x) / pixel_size).round() as i64;

    let (full_rows, full_cols) = full.shape();
    let (clip_rows, clip_cols) = clipped.shape();

    let out_of_bounds = row_offset < 0
        || col_offset < 0
        || row_offset as usize + clip_rows > full_rows
        || col_offset as usize + clip_cols > full_cols;
    if out_of_bounds {
        return Err(Error::AlignmentOutOfBounds {
            row_offset,
            col_offset,
            rows: clip_rows,
            cols: clip_cols,
            full_rows,
            full_cols,
        });
    }

    let r0 = row_offset as usize;
    let c0 = col_offset as usize;

    let mut output = full.like(no_data);
    output.set_nodata(Some(no_data));
    output
        .data_mut()
        .slice_mut(s![r0..r0 + clip_rows, c0..c0 + clip_cols])
        .assign(clipped.data());

    Ok(output)
}
