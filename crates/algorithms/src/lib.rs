//! # sprawlgis Algorithms
//!
//! Urban-sprawl metric algorithms over classified land-use rasters.
//!
//! ## Modules
//!
//! - **align**: overlay a clipped sub-extent onto the full raster frame
//! - **area**: ground-area measurement by cell predicate
//! - **dispersion**: the per-pixel dispersion field (SI)
//! - **metrics**: DIS, LUP and WUP scalar formulas
//! - **pipeline**: typed stage-to-stage sequencing of the full suite

pub mod align;
pub mod area;
pub mod dispersion;
pub mod metrics;
pub mod pipeline;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::align::overlay_clip;
    pub use crate::area::selected_area;
    pub use crate::dispersion::{
        dispersion_field, dispersion_field_cancellable, wcc, DispersionParams,
    };
    pub use crate::metrics::{dis, lup, wup};
    pub use crate::pipeline::{run, SprawlParams, SprawlReport};
    pub use sprawlgis_core::prelude::*;
}
