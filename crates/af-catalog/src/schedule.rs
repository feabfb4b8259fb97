//! Nominal pipe schedule and size-selection queries.
//!
//! The schedule lists every nominal size the design rules may reference; the
//! `stocked` flag marks the subset a plant can actually buy locally. Selection
//! queries come in two flavors: `nd_sdr` restricts itself to stocked sizes,
//! `nd_sdr_all` searches the full table (used where a fabricated size is
//! acceptable, e.g. small drain fittings).

use crate::error::{CatalogError, CatalogResult};
use af_core::units::{Length, inch};

/// SDR assumed for slip-over fittings.
pub const FITTING_SDR: f64 = 41.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleRow {
    /// Nominal diameter [in]
    pub nd_in: f64,
    /// Outer diameter [in]
    pub od_in: f64,
    /// Whether the size is stocked (vs. special order)
    pub stocked: bool,
}

const ND_SCHEDULE: [ScheduleRow; 27] = [
    ScheduleRow { nd_in: 0.375, od_in: 0.675, stocked: false },
    ScheduleRow { nd_in: 0.5, od_in: 0.84, stocked: true },
    ScheduleRow { nd_in: 0.75, od_in: 1.05, stocked: false },
    ScheduleRow { nd_in: 1.0, od_in: 1.315, stocked: true },
    ScheduleRow { nd_in: 1.25, od_in: 1.66, stocked: false },
    ScheduleRow { nd_in: 1.5, od_in: 1.9, stocked: true },
    ScheduleRow { nd_in: 2.0, od_in: 2.375, stocked: true },
    ScheduleRow { nd_in: 2.5, od_in: 2.875, stocked: false },
    ScheduleRow { nd_in: 3.0, od_in: 3.5, stocked: true },
    ScheduleRow { nd_in: 3.5, od_in: 4.0, stocked: false },
    ScheduleRow { nd_in: 4.0, od_in: 4.5, stocked: true },
    ScheduleRow { nd_in: 5.0, od_in: 5.563, stocked: false },
    ScheduleRow { nd_in: 6.0, od_in: 6.625, stocked: true },
    ScheduleRow { nd_in: 8.0, od_in: 8.625, stocked: true },
    ScheduleRow { nd_in: 10.0, od_in: 10.75, stocked: true },
    ScheduleRow { nd_in: 12.0, od_in: 12.75, stocked: true },
    ScheduleRow { nd_in: 14.0, od_in: 14.0, stocked: false },
    ScheduleRow { nd_in: 16.0, od_in: 16.0, stocked: true },
    ScheduleRow { nd_in: 18.0, od_in: 18.0, stocked: true },
    ScheduleRow { nd_in: 20.0, od_in: 20.0, stocked: false },
    ScheduleRow { nd_in: 24.0, od_in: 24.0, stocked: true },
    ScheduleRow { nd_in: 26.0, od_in: 26.0, stocked: false },
    ScheduleRow { nd_in: 30.0, od_in: 30.0, stocked: true },
    ScheduleRow { nd_in: 36.0, od_in: 36.0, stocked: true },
    ScheduleRow { nd_in: 48.0, od_in: 48.0, stocked: true },
    ScheduleRow { nd_in: 60.0, od_in: 60.0, stocked: true },
    ScheduleRow { nd_in: 72.0, od_in: 72.0, stocked: true },
];

pub fn nd_all_rows() -> &'static [ScheduleRow] {
    &ND_SCHEDULE
}

/// Outer diameter of the schedule row whose nominal size is nearest `nd`.
///
/// Searches the full table: a request between two rows maps to the closer one,
/// and oversized requests saturate at the largest row.
pub fn od(nd: Length) -> Length {
    let nd_in = nd.get::<uom::si::length::inch>();
    let mut best = &ND_SCHEDULE[0];
    let mut best_dist = (best.nd_in - nd_in).abs();
    for row in &ND_SCHEDULE[1..] {
        let dist = (row.nd_in - nd_in).abs();
        if dist < best_dist {
            best = row;
            best_dist = dist;
        }
    }
    inch(best.od_in)
}

/// Inner diameter of nominal size `nd` under the SDR wall rule
/// `ID = OD * (1 - 2/SDR)`. Meaningful for SDR > 2.
pub fn id_sdr(nd: Length, sdr: f64) -> Length {
    od(nd) * (1.0 - 2.0 / sdr)
}

fn smallest_satisfying(id_req: Length, sdr: f64, stocked_only: bool) -> CatalogResult<Length> {
    for row in &ND_SCHEDULE {
        if stocked_only && !row.stocked {
            continue;
        }
        let id = inch(row.od_in) * (1.0 - 2.0 / sdr);
        if id >= id_req {
            return Ok(inch(row.nd_in));
        }
    }
    Err(CatalogError::NoSuitableSize {
        required_id_m: id_req.value,
        sdr,
    })
}

/// Smallest STOCKED nominal size whose SDR inner diameter is >= `id_req`.
pub fn nd_sdr(id_req: Length, sdr: f64) -> CatalogResult<Length> {
    smallest_satisfying(id_req, sdr, true)
}

/// Like [`nd_sdr`] but over the full table, special-order sizes included.
pub fn nd_sdr_all(id_req: Length, sdr: f64) -> CatalogResult<Length> {
    smallest_satisfying(id_req, sdr, false)
}

/// Outer diameter of the fitting that slips over a pipe of nominal size `nd`:
/// the smallest stocked SDR-41 pipe whose bore admits the pipe's OD.
pub fn fitting_od(nd: Length) -> CatalogResult<Length> {
    let fitting_nd = nd_sdr(od(nd), FITTING_SDR)?;
    Ok(od(fitting_nd))
}
