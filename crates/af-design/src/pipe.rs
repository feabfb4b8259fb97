//! Catalog-backed pipe selection.

use std::f64::consts::PI;

use af_catalog::{CatalogResult, id_sdr, kminor, nd_sdr, nd_sdr_all, od};
use af_core::units::constants::G0_MPS2;
use af_core::units::{Area, Length, Time, m};

/// Fittings on a standard tank drain line: entrance, exit, one elbow.
pub const DRAIN_K_MINOR: f64 = kminor::ENTRANCE + kminor::EXIT + kminor::EL90;

/// A nominal size chosen from the pipe schedule, with the dimensions
/// that selection implies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedPipe {
    /// Nominal diameter.
    pub nd: Length,
    /// Outer diameter of the matching schedule row.
    pub od: Length,
    /// Inner diameter at the selection SDR.
    pub id: Length,
    /// Standard dimension ratio the selection was made at.
    pub sdr: f64,
}

impl SelectedPipe {
    /// Smallest stocked size whose inner diameter is at least `id_req`.
    pub fn stocked(id_req: Length, sdr: f64) -> CatalogResult<Self> {
        let nd = nd_sdr(id_req, sdr)?;
        Ok(Self {
            nd,
            od: od(nd),
            id: id_sdr(nd, sdr),
            sdr,
        })
    }

    /// Smallest size over the whole schedule, stocked or not.
    pub fn any_row(id_req: Length, sdr: f64) -> CatalogResult<Self> {
        let nd = nd_sdr_all(id_req, sdr)?;
        Ok(Self {
            nd,
            od: od(nd),
            id: id_sdr(nd, sdr),
            sdr,
        })
    }
}

/// Inner diameter required of a vertical drain that empties a tank of
/// the given plan area, starting at `depth`, within `drain_t`.
///
/// Torricelli draining with the drain line's minor losses folded in;
/// `k_minor` is the sum over the line's fittings.
pub fn drain_id_req(plan_area: Area, depth: Length, k_minor: f64, drain_t: Time) -> Length {
    let req = (8.0 * plan_area.value / (PI * drain_t.value)
        * (depth.value * k_minor / (2.0 * G0_MPS2)).sqrt())
    .sqrt();
    m(req)
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_core::units::{inch, m2, s};

    #[test]
    fn stocked_selection_skips_unstocked_rows() {
        // An 8.5 cm bore fits 3.5 in pipe, but 3.5 in is special order.
        let pipe = SelectedPipe::stocked(m(0.085), 26.0).unwrap();
        assert_eq!(pipe.nd, inch(4.0));
        assert_eq!(pipe.id, id_sdr(inch(4.0), 26.0));
        assert_eq!(pipe.od, od(inch(4.0)));
        assert!(pipe.id.value >= 0.085);
    }

    #[test]
    fn any_row_selection_may_use_unstocked_rows() {
        let pipe = SelectedPipe::any_row(m(0.085), 26.0).unwrap();
        assert_eq!(pipe.nd, inch(3.5));
    }

    #[test]
    fn drain_requirement_grows_with_plan_area_and_depth() {
        let base = drain_id_req(m2(4.0), m(2.0), 2.4, s(1800.0));
        assert!(drain_id_req(m2(8.0), m(2.0), 2.4, s(1800.0)) > base);
        assert!(drain_id_req(m2(4.0), m(3.0), 2.4, s(1800.0)) > base);
        assert!(drain_id_req(m2(4.0), m(2.0), 2.4, s(3600.0)) < base);
    }
}
