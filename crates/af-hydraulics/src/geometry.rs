//! Cross-section geometry: circles and hydraulic radii.

use std::f64::consts::PI;

use af_core::units::{Area, Length, m, m2};

use crate::compat::warn_deprecated_name;
use crate::error::HydResult;
use crate::validation::require_positive;

#[inline]
pub(crate) fn area_circle_raw(diam: f64) -> f64 {
    PI * diam * diam / 4.0
}

#[inline]
pub(crate) fn diam_circle_raw(area: f64) -> f64 {
    (4.0 * area / PI).sqrt()
}

/// Area of a circle from its diameter.
pub fn area_circle(diam: Length) -> HydResult<Area> {
    let d = require_positive(diam.value, "circle diameter")?;
    Ok(m2(area_circle_raw(d)))
}

/// Diameter of a circle from its area.
pub fn diam_circle(area: Area) -> HydResult<Length> {
    let a = require_positive(area.value, "circle area")?;
    Ok(m(diam_circle_raw(a)))
}

#[inline]
pub(crate) fn radius_hydraulic_rect_raw(w: f64, h: f64, open_channel: bool) -> f64 {
    if open_channel {
        w * h / (w + 2.0 * h)
    } else {
        w * h / (2.0 * (w + h))
    }
}

/// Hydraulic radius of a rectangular section.
///
/// With `open_channel` the free surface does not count toward the wetted
/// perimeter: `w*h/(w + 2h)` open versus `w*h/(2(w + h))` closed.
pub fn radius_hydraulic_rect(width: Length, depth: Length, open_channel: bool) -> HydResult<Length> {
    let w = require_positive(width.value, "channel width")?;
    let h = require_positive(depth.value, "water depth")?;
    Ok(m(radius_hydraulic_rect_raw(w, h, open_channel)))
}

/// Hydraulic radius of an arbitrary section: area over wetted perimeter.
pub fn radius_hydraulic_channel(area: Area, wetted_perimeter: Length) -> HydResult<Length> {
    let a = require_positive(area.value, "flow area")?;
    let wp = require_positive(wetted_perimeter.value, "wetted perimeter")?;
    Ok(m(a / wp))
}

/// Former name of [`radius_hydraulic_rect`].
#[deprecated(note = "use radius_hydraulic_rect")]
pub fn radius_hydraulic(width: Length, depth: Length, open_channel: bool) -> HydResult<Length> {
    warn_deprecated_name("radius_hydraulic", "radius_hydraulic_rect");
    radius_hydraulic_rect(width, depth, open_channel)
}

/// Former name of [`radius_hydraulic_channel`].
#[deprecated(note = "use radius_hydraulic_channel")]
pub fn radius_hydraulic_general(area: Area, wetted_perimeter: Length) -> HydResult<Length> {
    warn_deprecated_name("radius_hydraulic_general", "radius_hydraulic_channel");
    radius_hydraulic_channel(area, wetted_perimeter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_area_and_diameter() {
        let a = area_circle(m(2.0)).unwrap();
        assert!((a.value - PI).abs() < 1e-12);
        let d = diam_circle(a).unwrap();
        assert!((d.value - 2.0).abs() < 1e-12);
    }

    #[test]
    fn circle_rejects_nonpositive_inputs() {
        assert!(area_circle(m(0.0)).is_err());
        assert!(area_circle(m(-1.0)).is_err());
        assert!(diam_circle(m2(0.0)).is_err());
    }

    #[test]
    fn hydraulic_radius_open_vs_closed() {
        let open = radius_hydraulic_rect(m(2.0), m(1.0), true).unwrap();
        assert!((open.value - 0.5).abs() < 1e-12);
        let closed = radius_hydraulic_rect(m(2.0), m(1.0), false).unwrap();
        assert!((closed.value - 2.0 / 6.0).abs() < 1e-12);
        assert!(open.value > closed.value);
    }

    #[test]
    fn hydraulic_radius_channel() {
        let rh = radius_hydraulic_channel(m2(6.0), m(12.0)).unwrap();
        assert!((rh.value - 0.5).abs() < 1e-12);
        assert!(radius_hydraulic_channel(m2(6.0), m(0.0)).is_err());
    }

    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn circle_round_trip(d in 1e-6f64..1e4) {
                let area = area_circle(m(d)).unwrap();
                let back = diam_circle(area).unwrap();
                prop_assert!((back.value - d).abs() <= 1e-9 * d);
            }

            #[test]
            fn open_rect_radius_below_half_depth(w in 1e-3f64..1e3, h in 1e-3f64..1e3) {
                let rh = radius_hydraulic_rect(m(w), m(h), true).unwrap();
                // Rh is bounded by both the depth and w/2
                prop_assert!(rh.value < h);
                prop_assert!(rh.value < w / 2.0 + 1e-12);
            }
        }
    }
}
