//! Reynolds numbers for the supported conduit shapes.
//!
//! Zero flow (or velocity) is legal and yields a Reynolds number of exactly
//! zero; negative flow and non-positive viscosity or geometry are domain
//! errors. Results are dimensionless plain `f64`.

use std::f64::consts::PI;

use af_core::units::{Area, Flow, KinVisc, Length, Velocity};

use crate::compat::warn_deprecated_name;
use crate::error::HydResult;
use crate::geometry::radius_hydraulic_rect_raw;
use crate::validation::{require_non_negative, require_positive};

#[inline]
pub(crate) fn re_pipe_raw(q: f64, d: f64, nu: f64) -> f64 {
    4.0 * q / (PI * d * nu)
}

/// Reynolds number of full pipe flow, `4Q/(pi*D*nu)`.
pub fn re_pipe(flow: Flow, diam: Length, nu: KinVisc) -> HydResult<f64> {
    let q = require_non_negative(flow.value, "flow")?;
    let d = require_positive(diam.value, "pipe diameter")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    Ok(re_pipe_raw(q, d, nu))
}

#[inline]
pub(crate) fn re_rect_raw(q: f64, w: f64, h: f64, nu: f64, open_channel: bool) -> f64 {
    4.0 * q * radius_hydraulic_rect_raw(w, h, open_channel) / (w * h * nu)
}

/// Reynolds number of flow through a rectangular section, using four times
/// the hydraulic radius as the characteristic length.
pub fn re_rect(flow: Flow, width: Length, depth: Length, nu: KinVisc, open_channel: bool) -> HydResult<f64> {
    let q = require_non_negative(flow.value, "flow")?;
    let w = require_positive(width.value, "channel width")?;
    let h = require_positive(depth.value, "water depth")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    Ok(re_rect_raw(q, w, h, nu, open_channel))
}

#[inline]
pub(crate) fn re_channel_raw(v: f64, a: f64, wp: f64, nu: f64) -> f64 {
    4.0 * v * (a / wp) / nu
}

/// Reynolds number of an arbitrary channel section from its mean velocity.
pub fn re_channel(vel: Velocity, area: Area, wetted_perimeter: Length, nu: KinVisc) -> HydResult<f64> {
    let v = require_non_negative(vel.value, "velocity")?;
    let a = require_positive(area.value, "flow area")?;
    let wp = require_positive(wetted_perimeter.value, "wetted perimeter")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    Ok(re_channel_raw(v, a, wp, nu))
}

/// Former name of [`re_channel`].
#[deprecated(note = "use re_channel")]
pub fn re_general(vel: Velocity, area: Area, wetted_perimeter: Length, nu: KinVisc) -> HydResult<f64> {
    warn_deprecated_name("re_general", "re_channel");
    re_channel(vel, area, wetted_perimeter, nu)
}
