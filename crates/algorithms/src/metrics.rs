//! Scalar sprawl metrics: DIS, LUP, WUP
//!
//! Closed-form arithmetic chained after the dispersion field. The formulas
//! and their constants follow the weighted-urban-proliferation method; the
//! guards make every division explicit instead of propagating infinities.

use sprawlgis_core::{Error, Raster, Result};

/// Degree of urban dispersion: mean of the strictly positive cells of the
/// SI raster.
///
/// Fails with [`Error::NoPositiveValues`] when no cell is positive (an
/// all-no-data field has no defined dispersion).
pub fn dis(si: &Raster<f64>) -> Result<f64> {
    let mut sum = 0.0;
    let mut count: usize = 0;

    for &value in si.data().iter() {
        if value > 0.0 {
            sum += value;
            count += 1;
        }
    }

    if count == 0 {
        return Err(Error::NoPositiveValues);
    }

    Ok(sum / count as f64)
}

/// Land uptake per person: build-up area divided by the summed population.
///
/// Fails with [`Error::NonPositivePopulation`] when
/// `resident_count + employee_count <= 0`.
pub fn lup(build_up_area: f64, resident_count: i64, employee_count: i64) -> Result<f64> {
    let population = resident_count + employee_count;
    if population <= 0 {
        return Err(Error::NonPositivePopulation(population));
    }

    Ok(build_up_area / population as f64)
}

/// Weighted urban proliferation: logistic-weighted combination of DIS, LUP
/// and the share of settlement area.
///
/// `ssa` must lie in `[0, 1]` and `lup` must be positive; in the full
/// pipeline the LUP denominator guard makes the latter hold, but a direct
/// caller violating it gets [`Error::DivisionByZero`] instead of an
/// infinity in the exponent.
pub fn wup(dis: f64, lup: f64, ssa: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&ssa) {
        return Err(Error::InvalidSsa(ssa));
    }
    if lup == 0.0 {
        return Err(Error::DivisionByZero("LUP in the WUP weighting term"));
    }

    let up = ssa * dis;

    let value1 = (4.159 - 613.125 / lup).exp();
    let weight1 = value1 / (1.0 + value1);

    let value2 = (0.294432 * dis - 12.955).exp();
    let weight2 = value2 / (1.0 + value2);

    Ok(up * dis * weight1 * (0.5 + weight2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dis_single_positive_cell() {
        let mut si: Raster<f64> = Raster::new(4, 4);
        si.set(1, 2, 3.5).unwrap();

        assert_relative_eq!(dis(&si).unwrap(), 3.5);
    }

    #[test]
    fn test_dis_averages_positive_cells_only() {
        let mut si: Raster<f64> = Raster::filled(3, 3, -1.0);
        si.set(0, 0, 2.0).unwrap();
        si.set(2, 2, 4.0).unwrap();

        assert_relative_eq!(dis(&si).unwrap(), 3.0);
    }

    #[test]
    fn test_dis_all_nodata_rejected() {
        let si: Raster<f64> = Raster::new(4, 4);
        assert!(matches!(dis(&si), Err(Error::NoPositiveValues)));
    }

    #[test]
    fn test_lup_divides_by_population() {
        assert_relative_eq!(lup(1200.0, 100, 200).unwrap(), 4.0);
    }

    #[test]
    fn test_lup_rejects_non_positive_population() {
        assert!(matches!(
            lup(1200.0, 0, 0),
            Err(Error::NonPositivePopulation(0))
        ));
        assert!(matches!(
            lup(1200.0, 10, -30),
            Err(Error::NonPositivePopulation(-20))
        ));
    }

    #[test]
    fn test_wup_zero_dispersion_is_zero() {
        // up = ssa * dis = 0, so the weights cannot matter
        assert_relative_eq!(wup(0.0, 1000.0, 0.5).unwrap(), 0.0);
    }

    #[test]
    fn test_wup_matches_formula() {
        let dis_value = 44.0;
        let lup_value = 250.0;
        let ssa = 0.8;

        let up = ssa * dis_value;
        let value1 = (4.159_f64 - 613.125 / lup_value).exp();
        let weight1 = value1 / (1.0 + value1);
        let value2 = (0.294432_f64 * dis_value - 12.955).exp();
        let weight2 = value2 / (1.0 + value2);
        let expected = up * dis_value * weight1 * (0.5 + weight2);

        assert_relative_eq!(wup(dis_value, lup_value, ssa).unwrap(), expected);
    }

    #[test]
    fn test_wup_rejects_ssa_out_of_range() {
        assert!(matches!(wup(1.0, 100.0, -0.1), Err(Error::InvalidSsa(_))));
        assert!(matches!(wup(1.0, 100.0, 1.1), Err(Error::InvalidSsa(_))));
    }

    #[test]
    fn test_wup_accepts_ssa_boundaries() {
        assert!(wup(1.0, 100.0, 0.0).is_ok());
        assert!(wup(1.0, 100.0, 1.0).is_ok());
    }

    #[test]
    fn test_wup_rejects_zero_lup() {
        assert!(matches!(
            wup(1.0, 0.0, 0.5),
            Err(Error::DivisionByZero(_))
        ));
    }
}
