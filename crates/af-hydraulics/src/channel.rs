//! Open-channel sizing helpers.
//!
//! The two `horiz_chan_*` solvers size a horizontal rectangular channel so
//! that it spends exactly the allotted head loss, splitting it between the
//! exit velocity head, minor losses and wall friction. Both iterate a short
//! fixed point starting from the all-velocity-head estimate.

use std::f64::consts::PI;

use af_core::units::constants::G0_MPS2;
use af_core::units::{m, mps, Flow, KinVisc, Length, Velocity};

use crate::error::{HydResult, HydraulicsError};
use crate::friction::fric_rect_raw;
use crate::geometry::radius_hydraulic_rect_raw;
use crate::validation::{require_non_negative, require_positive};

const CHAN_MAX_ITER: u32 = 20;
const CHAN_TOL: f64 = 0.001;

/// Critical flow depth over a horizontal surface of the given width.
pub fn height_water_critical(flow: Flow, width: Length) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let w = require_positive(width.value, "width")?;
    Ok(m((q * q / (G0_MPS2 * w * w)).powf(1.0 / 3.0)))
}

/// Horizontal velocity of critical flow at the given depth.
pub fn vel_horizontal(height_water_critical: Length) -> HydResult<Velocity> {
    let h = require_positive(height_water_critical.value, "critical depth")?;
    Ok(mps((G0_MPS2 * h).sqrt()))
}

/// Inner pipe diameter passing `flow` when `head` of water drives it,
/// all head spent as velocity head.
pub fn pipe_id(flow: Flow, head: Length) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let h = require_positive(head.value, "driving head")?;
    Ok(m((q / ((PI / 4.0) * (2.0 * G0_MPS2 * h).sqrt())).sqrt()))
}

/// Width of a horizontal rectangular channel that spends `headloss` while
/// carrying `flow` at the given total depth.
///
/// The water depth available for flow is the total depth minus the head
/// loss, so `depth` must exceed `headloss`.
pub fn horiz_chan_w(
    flow: Flow,
    depth: Length,
    headloss: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
    open_channel: bool,
    k_minor: f64,
) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let depth = require_positive(depth.value, "channel depth")?;
    let hl = require_positive(headloss.value, "head loss")?;
    let l = require_positive(length.value, "channel length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(roughness.value, "channel roughness")?;
    let k = require_non_negative(k_minor, "minor loss coefficient")?;
    if depth <= hl {
        return Err(HydraulicsError::Domain {
            what: "channel depth",
            requirement: "greater than the allotted head loss",
            value: depth,
        });
    }
    let h = depth - hl;
    let mut w = q / (h * (2.0 * G0_MPS2 * hl).sqrt());
    for _ in 0..CHAN_MAX_ITER {
        let w_prev = w;
        let rh = radius_hydraulic_rect_raw(w, h, open_channel);
        let f = fric_rect_raw(q, w, h, nu, rough, open_channel);
        let v2 = 2.0 * G0_MPS2 * hl / (1.0 + k + f * l / (4.0 * rh));
        w = q / (h * v2.sqrt());
        if (w - w_prev).abs() / ((w + w_prev) / 2.0) < CHAN_TOL {
            break;
        }
    }
    Ok(m(w))
}

/// Total depth of a horizontal rectangular channel of the given width that
/// spends `headloss` while carrying `flow`.
///
/// Returns the flow depth plus the head loss itself, so the result is
/// directly comparable against a total channel depth.
pub fn horiz_chan_h(
    flow: Flow,
    width: Length,
    headloss: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
    open_channel: bool,
) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let w = require_positive(width.value, "channel width")?;
    let hl = require_positive(headloss.value, "head loss")?;
    let l = require_positive(length.value, "channel length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(roughness.value, "channel roughness")?;
    let mut h = q / (w * (2.0 * G0_MPS2 * hl).sqrt());
    for _ in 0..CHAN_MAX_ITER {
        let h_prev = h;
        let rh = radius_hydraulic_rect_raw(w, h, open_channel);
        let f = fric_rect_raw(q, w, h, nu, rough, open_channel);
        let v2 = 2.0 * G0_MPS2 * hl / (1.0 + f * l / (4.0 * rh));
        h = q / (w * v2.sqrt());
        if (h - h_prev).abs() / ((h + h_prev) / 2.0) < CHAN_TOL {
            break;
        }
    }
    Ok(m(h + hl))
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_core::units::{m2ps, m3ps};

    #[test]
    fn critical_flow_reference_values() {
        let h = height_water_critical(m3ps(0.006), m(1.2)).unwrap();
        assert!((h.value - 0.013660704939951885).abs() < 1e-12);
        let v = vel_horizontal(m(0.03)).unwrap();
        assert!((v.value - 0.5424016039799292).abs() < 1e-12);
        let d = pipe_id(m3ps(0.006), m(1.2)).unwrap();
        assert!((d.value - 0.039682379412712764).abs() < 1e-12);
    }

    #[test]
    fn channel_width_reference_value() {
        let w = horiz_chan_w(
            m3ps(0.02),
            m(0.5),
            m(0.0039087750000000015),
            m(4.8672),
            m2ps(1.0035551586946028e-06),
            m(0.002),
            true,
            0.0,
        )
        .unwrap();
        assert!((w.value - 0.181123956547638).abs() < 1e-9);
    }

    #[test]
    fn channel_depth_reference_value() {
        let h = horiz_chan_h(
            m3ps(0.02),
            m(1.062),
            m(0.0039087750000000015),
            m(4.8672),
            m2ps(1.0035551586946028e-06),
            m(0.002),
            true,
        )
        .unwrap();
        assert!((h.value - 0.08933041703807712).abs() < 1e-9);
    }

    #[test]
    fn minor_losses_widen_the_channel() {
        let clean = horiz_chan_w(
            m3ps(0.05),
            m(0.6),
            m(0.004),
            m(5.0),
            m2ps(1e-6),
            m(0.002),
            true,
            0.0,
        )
        .unwrap();
        let with_k = horiz_chan_w(
            m3ps(0.05),
            m(0.6),
            m(0.004),
            m(5.0),
            m2ps(1e-6),
            m(0.002),
            true,
            1.0,
        )
        .unwrap();
        assert!(with_k.value > clean.value);
    }

    #[test]
    fn depth_must_exceed_the_head_loss() {
        let err = horiz_chan_w(
            m3ps(0.02),
            m(0.004),
            m(0.004),
            m(5.0),
            m2ps(1e-6),
            m(0.002),
            true,
            0.0,
        )
        .unwrap_err();
        assert!(matches!(err, HydraulicsError::Domain { .. }));
    }

    #[test]
    fn solved_depth_spends_the_allotted_head() {
        // forward check: the returned geometry loses close to hl
        let hl = 0.004;
        let h_total = horiz_chan_h(
            m3ps(0.03),
            m(0.8),
            m(hl),
            m(5.0),
            m2ps(1e-6),
            m(0.002),
            true,
        )
        .unwrap();
        let h_flow = h_total.value - hl;
        let v = 0.03 / (0.8 * h_flow);
        let rh = radius_hydraulic_rect_raw(0.8, h_flow, true);
        let f = fric_rect_raw(0.03, 0.8, h_flow, 1e-6, 0.002, true);
        let spent = (1.0 + f * 5.0 / (4.0 * rh)) * v * v / (2.0 * G0_MPS2);
        assert!((spent - hl).abs() / hl < 0.01);
    }
}
