//! Full metric pipeline
//!
//! Sequences clip alignment → SI → DIS → LUP → WUP with typed results
//! passed stage to stage. Input validation that multiple stages depend on
//! (population, SSA) happens up front, and the cancellation token is
//! checked between stages so an abort never produces a partial report.

use sprawlgis_core::{CancelToken, Error, Raster, Result};

use crate::align::overlay_clip;
use crate::area::selected_area;
use crate::dispersion::{dispersion_field_cancellable, DispersionParams};
use crate::metrics::{dis, lup, wup};

/// Parameters for the full urban-sprawl pipeline
#[derive(Debug, Clone)]
pub struct SprawlParams {
    /// Horizon of perception for the dispersion scan
    pub radius: f64,
    /// No-data sentinel, shared by the aligned mask and the SI output
    pub no_data_value: i32,
    /// Cell value marking build-up land use
    pub build_up_value: i32,
    /// Share of settlement area, in [0, 1]
    pub ssa: f64,
    /// Residents inside the boundary
    pub resident_count: i64,
    /// Employees inside the boundary
    pub employee_count: i64,
}

impl Default for SprawlParams {
    fn default() -> Self {
        Self {
            radius: 2000.0,
            no_data_value: 0,
            build_up_value: 1,
            ssa: 1.0,
            resident_count: 0,
            employee_count: 0,
        }
    }
}

/// Results of the full pipeline
#[derive(Debug, Clone)]
pub struct SprawlReport {
    /// Per-pixel dispersion field
    pub si: Raster<f64>,
    /// Ground area covered by build-up cells inside the clip footprint
    pub build_up_area: f64,
    /// Degree of urban dispersion
    pub dis: f64,
    /// Land uptake per person
    pub lup: f64,
    /// Weighted urban proliferation
    pub wup: f64,
}

/// Run the full pipeline over a classified raster and its clipped sub-extent.
///
/// `full` is the complete classified grid; `clipped` is the output of an
/// external polygon-mask step covering only the boundary footprint. The
/// first failing stage aborts the rest; cancellation surfaces as
/// [`Error::Cancelled`].
pub fn run(
    full: &Raster<i32>,
    clipped: &Raster<i32>,
    params: &SprawlParams,
    cancel: &CancelToken,
) -> Result<SprawlReport> {
    let population = params.resident_count + params.employee_count;
    if population <= 0 {
        return Err(Error::NonPositivePopulation(population));
    }
    if !(0.0..=1.0).contains(&params.ssa) {
        return Err(Error::InvalidSsa(params.ssa));
    }

    let mask = overlay_clip(full, clipped, params.no_data_value)?;
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let si = dispersion_field_cancellable(
        full,
        &mask,
        &DispersionParams {
            radius: params.radius,
            no_data_value: params.no_data_value as f64,
            build_up_value: params.build_up_value,
        },
        cancel,
    )?;
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let dis_value = dis(&si)?;

    let build_up_value = params.build_up_value;
    let build_up_area = selected_area(&mask, |v| v == build_up_value)?;
    let lup_value = lup(build_up_area, params.resident_count, params.employee_count)?;
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let wup_value = wup(dis_value, lup_value, params.ssa)?;

    Ok(SprawlReport {
        si,
        build_up_area,
        dis: dis_value,
        lup: lup_value,
        wup: wup_value,
    })
}
