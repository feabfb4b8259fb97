//! Orifice flow, sizing and head.
//!
//! All relations share the vena contracta ratio as the discharge
//! coefficient. Submergence heights may be zero or negative; a dry orifice
//! passes zero flow rather than failing.

use std::f64::consts::PI;

use af_core::units::constants::G0_MPS2;
use af_core::units::{m, m2, m3ps, Area, Flow, Length};

use crate::error::{HydResult, HydraulicsError};
use crate::geometry::area_circle_raw;
use crate::validation::{require_in_unit_interval, require_positive};

/// Vena contracta area ratio of a sharp-edged orifice.
pub const RATIO_VC_ORIFICE: f64 = 0.63;

const SIMPSON_TOL: f64 = 1e-12;
const SIMPSON_MAX_DEPTH: u32 = 45;

fn simpson_step<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    fa: f64,
    mid: f64,
    fm: f64,
    b: f64,
    fb: f64,
    whole: f64,
    depth: u32,
) -> f64 {
    let lm = 0.5 * (a + mid);
    let flm = f(lm);
    let rm = 0.5 * (mid + b);
    let frm = f(rm);
    let left = (mid - a) / 6.0 * (fa + 4.0 * flm + fm);
    let right = (b - mid) / 6.0 * (fm + 4.0 * frm + fb);
    let delta = left + right - whole;
    if depth == 0 || delta.abs() <= 15.0 * SIMPSON_TOL {
        left + right + delta / 15.0
    } else {
        simpson_step(f, a, fa, lm, flm, mid, fm, left, depth - 1)
            + simpson_step(f, mid, fm, rm, frm, b, fb, right, depth - 1)
    }
}

fn adaptive_simpson<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> f64 {
    let fa = f(a);
    let fb = f(b);
    let mid = 0.5 * (a + b);
    let fm = f(mid);
    let whole = (b - a) / 6.0 * (fa + 4.0 * fm + fb);
    simpson_step(f, a, fa, mid, fm, b, fb, whole, SIMPSON_MAX_DEPTH)
}

/// Flow through a horizontal orifice under `height` of water.
///
/// A non-positive submergence height passes zero flow.
pub fn flow_orifice(diam: Length, height: Length, ratio_vc: f64) -> HydResult<Flow> {
    let d = require_positive(diam.value, "orifice diameter")?;
    let c = require_in_unit_interval(ratio_vc, "vena contracta ratio")?;
    let h = height.value;
    if h <= 0.0 {
        return Ok(m3ps(0.0));
    }
    Ok(m3ps(c * area_circle_raw(d) * (2.0 * G0_MPS2 * h).sqrt()))
}

/// Flow through a vertically mounted orifice whose center sits `height`
/// below the water surface.
///
/// The head varies over the orifice face, so the discharge is integrated
/// over horizontal strips. Partially exposed orifices integrate only their
/// wet portion; a fully exposed one passes zero flow.
pub fn flow_orifice_vert(diam: Length, height: Length, ratio_vc: f64) -> HydResult<Flow> {
    let d = require_positive(diam.value, "orifice diameter")?;
    let c = require_in_unit_interval(ratio_vc, "vena contracta ratio")?;
    let h = height.value;
    if h <= -d / 2.0 {
        return Ok(m3ps(0.0));
    }
    // strip substitution x = -(d/2) cos(theta); theta_hi marks the waterline
    let theta_hi = f64::acos((2.0 * f64::min(d / 2.0, h) / d).clamp(-1.0, 1.0));
    let integrand = |theta: f64| {
        let submergence = f64::max(h - (d / 2.0) * theta.cos(), 0.0);
        theta.sin().powi(2) * submergence.sqrt()
    };
    let integral = (d * d / 2.0) * adaptive_simpson(&integrand, theta_hi, PI);
    Ok(m3ps(c * (2.0 * G0_MPS2).sqrt() * integral))
}

/// Head required to push `flow` through an orifice of the given diameter.
pub fn head_orifice(diam: Length, ratio_vc: f64, flow: Flow) -> HydResult<Length> {
    let d = require_positive(diam.value, "orifice diameter")?;
    let c = require_in_unit_interval(ratio_vc, "vena contracta ratio")?;
    let q = require_positive(flow.value, "flow")?;
    if c == 0.0 {
        return Err(HydraulicsError::DivisionByZero {
            what: "vena contracta ratio",
        });
    }
    let v = q / (c * area_circle_raw(d));
    Ok(m(v * v / (2.0 * G0_MPS2)))
}

/// Orifice area passing `flow` under `height` of water.
pub fn area_orifice(height: Length, ratio_vc: f64, flow: Flow) -> HydResult<Area> {
    let c = require_in_unit_interval(ratio_vc, "vena contracta ratio")?;
    let q = require_positive(flow.value, "flow")?;
    let h = height.value;
    if h < 0.0 {
        return Err(HydraulicsError::Domain {
            what: "submergence height",
            requirement: "non-negative",
            value: h,
        });
    }
    if h == 0.0 {
        return Err(HydraulicsError::DivisionByZero {
            what: "submergence height",
        });
    }
    if c == 0.0 {
        return Err(HydraulicsError::DivisionByZero {
            what: "vena contracta ratio",
        });
    }
    Ok(m2(q / (c * (2.0 * G0_MPS2 * h).sqrt())))
}

/// Number of identical orifices needed to pass `flow_plant`, rounded up.
pub fn num_orifices(
    flow_plant: Flow,
    ratio_vc: f64,
    head_loss_orifice: Length,
    diam_orifice: Length,
) -> HydResult<u32> {
    let q = require_positive(flow_plant.value, "plant flow")?;
    let per_orifice = flow_orifice(diam_orifice, head_loss_orifice, ratio_vc)?;
    if per_orifice.value <= 0.0 {
        return Err(HydraulicsError::DivisionByZero {
            what: "single orifice flow",
        });
    }
    Ok((q / per_orifice.value).ceil() as u32)
}
