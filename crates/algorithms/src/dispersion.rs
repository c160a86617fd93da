//! Dispersion field (SI) calculation
//!
//! The per-pixel scattered-settlement intensity score. For every build-up
//! cell selected by the clip mask, scans a radius-bounded neighborhood of
//! the source grid and accumulates a distance-decay weight over the
//! build-up cells found there. Cells with no build-up neighbor in reach
//! keep the no-data sentinel.

use ndarray::Array2;
use rayon::prelude::*;
use sprawlgis_core::{CancelToken, Error, Raster, Result};

/// Parameters for the dispersion field calculation
#[derive(Debug, Clone)]
pub struct DispersionParams {
    /// Horizon of perception: ground distance in the raster's linear unit
    pub radius: f64,
    /// Sentinel written to cells without a defined score
    pub no_data_value: f64,
    /// Cell value marking build-up land use
    pub build_up_value: i32,
}

impl Default for DispersionParams {
    fn default() -> Self {
        Self {
            radius: 2000.0,
            no_data_value: 0.0,
            build_up_value: 1,
        }
    }
}

/// Pixel-size-dependent calibration constant added to every cell's
/// weighted distance sum. Computed once per invocation.
pub fn wcc(pixel_size: f64) -> f64 {
    (0.97428 * pixel_size + 1.046).sqrt() - 0.996249
}

/// Calculate the dispersion field over a source grid.
///
/// `source` is the full classified raster; `clip_mask` shares its pixel
/// grid and dimensions and decides which cells get a computed value. See
/// [`dispersion_field_cancellable`] for the scan semantics.
pub fn dispersion_field(
    source: &Raster<i32>,
    clip_mask: &Raster<i32>,
    params: &DispersionParams,
) -> Result<Raster<f64>> {
    dispersion_field_cancellable(source, clip_mask, params, &CancelToken::new())
}

/// Calculate the dispersion field, polling a cancellation token between rows.
///
/// Per output cell where the mask carries the build-up value:
/// - scan the square window of `round(radius / pixel_size)` cells around it,
///   clipped to the grid bounds;
/// - for each build-up source cell in the window whose Euclidean ground
///   distance is within `radius`, accumulate `sqrt(2*distance + 1) - 1`;
/// - score = `(distance_sum + wcc) / count` when any neighbor was found
///   (the cell itself counts when it is build-up in the source), the
///   no-data sentinel otherwise.
///
/// All other cells keep the sentinel unconditionally. A non-positive
/// radius degenerates to the self-cell window. Rows are computed in
/// parallel; each worker owns disjoint output rows.
pub fn dispersion_field_cancellable(
    source: &Raster<i32>,
    clip_mask: &Raster<i32>,
    params: &DispersionParams,
    cancel: &CancelToken,
) -> Result<Raster<f64>> {
    let (rows, cols) = source.shape();
    let (mask_rows, mask_cols) = clip_mask.shape();
    if (mask_rows, mask_cols) != (rows, cols) {
        return Err(Error::SizeMismatch {
            er: rows,
            ec: cols,
            ar: mask_rows,
            ac: mask_cols,
        });
    }

    // Equal dimensions are not enough: a mask with a different origin
    // would select shifted cells. Both grids must share one pixel grid.
    let source_gt = source.transform();
    let mask_gt = clip_mask.transform();
    if source_gt != mask_gt {
        return Err(Error::TransformMismatch {
            ax: source_gt.origin_x,
            ay: source_gt.origin_y,
            bx: mask_gt.origin_x,
            by: mask_gt.origin_y,
        });
    }

    let pixel_size = source.square_pixel_size()?;
    let radius = params.radius.max(0.0);
    // Window half-width in cells; clamping to the grid size keeps the
    // bound arithmetic safe for arbitrarily large radii.
    let offset = ((radius / pixel_size).round() as isize).min(rows.max(cols) as isize);
    let wcc = wcc(pixel_size);

    let row_results: Result<Vec<Vec<f64>>> = (0..rows)
        .into_par_iter()
        .map(|row| {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let mut row_data = vec![params.no_data_value; cols];

            for (col, out) in row_data.iter_mut().enumerate() {
                let selected = unsafe { clip_mask.get_unchecked(row, col) };
                if selected != params.build_up_value {
                    continue;
                }

                if let Some(score) =
                    scan_cell(source, row, col, offset, pixel_size, radius, wcc, params)
                {
                    *out = score;
                }
            }

            Ok(row_data)
        })
        .collect();

    let data: Vec<f64> = row_results?.into_iter().flatten().collect();

    let mut output = source.with_same_meta::<f64>();
    output.set_nodata(Some(params.no_data_value));
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

/// Scan one cell's window. Returns `None` when no build-up neighbor is in reach.
#[allow(clippy::too_many_arguments)]
fn scan_cell(
    source: &Raster<i32>,
    center_row: usize,
    center_col: usize,
    offset: isize,
    pixel_size: f64,
    radius: f64,
    wcc: f64,
    params: &DispersionParams,
) -> Option<f64> {
    let (rows, cols) = source.shape();

    let row_start = (center_row as isize - offset).max(0) as usize;
    let row_end = ((center_row as isize + offset) as usize).min(rows - 1);
    let col_start = (center_col as isize - offset).max(0) as usize;
    let col_end = ((center_col as isize + offset) as usize).min(cols - 1);

    let mut count: usize = 0;
    let mut distance_sum = 0.0;

    for nr in row_start..=row_end {
        for nc in col_start..=col_end {
            let value = unsafe { source.get_unchecked(nr, nc) };
            if value != params.build_up_value {
                continue;
            }

            let dr = nr as f64 - center_row as f64;
            let dc = nc as f64 - center_col as f64;
            let distance = (dr * dr + dc * dc).sqrt() * pixel_size;

            // The square window is a superset of the disc; the membership
            // test below is the actual radius filter.
            if distance > radius {
                continue;
            }

            count += 1;
            distance_sum += (2.0 * distance + 1.0).sqrt() - 1.0;
        }
    }

    (count > 0).then(|| (distance_sum + wcc) / count as f64)
}
