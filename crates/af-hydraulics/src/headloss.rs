//! Head loss through pipes, rectangular sections and general channels.
//!
//! Major (wall friction) and minor (expansion) losses are exposed separately
//! and combined. All results are lengths of water column.

use std::f64::consts::PI;

use af_core::units::constants::G0_MPS2;
use af_core::units::{m, Area, Flow, KinVisc, Length, Velocity};

use af_catalog::kminor;

use crate::compat::warn_deprecated_name;
use crate::error::HydResult;
use crate::friction::{fric_channel_raw, fric_pipe_raw, fric_rect_raw};
use crate::geometry::radius_hydraulic_rect_raw;
use crate::validation::{require_non_negative, require_positive, require_whole_positive};

#[inline]
pub(crate) fn headloss_major_pipe_raw(q: f64, d: f64, l: f64, nu: f64, rough: f64) -> f64 {
    fric_pipe_raw(q, d, nu, rough) * 8.0 * l * q * q / (G0_MPS2 * PI * PI * d.powi(5))
}

/// Major (friction) head loss through a pipe, Darcy-Weisbach in flow form.
pub fn headloss_major_pipe(
    flow: Flow,
    diam: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let d = require_positive(diam.value, "pipe diameter")?;
    let l = require_positive(length.value, "pipe length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(roughness.value, "pipe roughness")?;
    Ok(m(headloss_major_pipe_raw(q, d, l, nu, rough)))
}

#[inline]
pub(crate) fn headloss_minor_pipe_raw(q: f64, d: f64, k: f64) -> f64 {
    k * 8.0 * q * q / (G0_MPS2 * PI * PI * d.powi(4))
}

/// Minor (expansion) head loss through a pipe from its summed loss
/// coefficient.
pub fn headloss_minor_pipe(flow: Flow, diam: Length, k_minor: f64) -> HydResult<Length> {
    let q = require_non_negative(flow.value, "flow")?;
    let d = require_positive(diam.value, "pipe diameter")?;
    let k = require_non_negative(k_minor, "minor loss coefficient")?;
    Ok(m(headloss_minor_pipe_raw(q, d, k)))
}

#[inline]
pub(crate) fn headloss_pipe_raw(q: f64, d: f64, l: f64, nu: f64, rough: f64, k: f64) -> f64 {
    headloss_major_pipe_raw(q, d, l, nu, rough) + headloss_minor_pipe_raw(q, d, k)
}

/// Total head loss through a pipe, major plus minor.
pub fn headloss_pipe(
    flow: Flow,
    diam: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
    k_minor: f64,
) -> HydResult<Length> {
    let major = headloss_major_pipe(flow, diam, length, nu, roughness)?;
    let minor = headloss_minor_pipe(flow, diam, k_minor)?;
    Ok(major + minor)
}

/// Head loss through one standard 90 degree elbow.
pub fn headloss_minor_elbow(flow: Flow, diam: Length) -> HydResult<Length> {
    headloss_minor_pipe(flow, diam, kminor::EL90)
}

/// Major head loss through a rectangular section.
pub fn headloss_major_rect(
    flow: Flow,
    width: Length,
    depth: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
    open_channel: bool,
) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let w = require_positive(width.value, "channel width")?;
    let h = require_positive(depth.value, "water depth")?;
    let l = require_positive(length.value, "channel length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(roughness.value, "channel roughness")?;
    let f = fric_rect_raw(q, w, h, nu, rough, open_channel);
    let rh = radius_hydraulic_rect_raw(w, h, open_channel);
    let v = q / (w * h);
    Ok(m(f * (l / (4.0 * rh)) * v * v / (2.0 * G0_MPS2)))
}

/// Minor head loss through a rectangular section.
pub fn headloss_minor_rect(
    flow: Flow,
    width: Length,
    depth: Length,
    k_minor: f64,
) -> HydResult<Length> {
    let q = require_non_negative(flow.value, "flow")?;
    let w = require_positive(width.value, "channel width")?;
    let h = require_positive(depth.value, "water depth")?;
    let k = require_non_negative(k_minor, "minor loss coefficient")?;
    let v = q / (w * h);
    Ok(m(k * v * v / (2.0 * G0_MPS2)))
}

/// Total head loss through a rectangular section.
pub fn headloss_rect(
    flow: Flow,
    width: Length,
    depth: Length,
    length: Length,
    k_minor: f64,
    nu: KinVisc,
    roughness: Length,
    open_channel: bool,
) -> HydResult<Length> {
    let major = headloss_major_rect(flow, width, depth, length, nu, roughness, open_channel)?;
    let minor = headloss_minor_rect(flow, width, depth, k_minor)?;
    Ok(major + minor)
}

/// Major head loss through an arbitrary channel section.
pub fn headloss_major_channel(
    vel: Velocity,
    area: Area,
    wetted_perimeter: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
) -> HydResult<Length> {
    let v = require_positive(vel.value, "velocity")?;
    let a = require_positive(area.value, "flow area")?;
    let wp = require_positive(wetted_perimeter.value, "wetted perimeter")?;
    let l = require_positive(length.value, "channel length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(roughness.value, "channel roughness")?;
    let f = fric_channel_raw(v, a, wp, nu, rough);
    let rh = a / wp;
    Ok(m(f * (l / (4.0 * rh)) * v * v / (2.0 * G0_MPS2)))
}

/// Minor head loss through an arbitrary channel section.
pub fn headloss_minor_channel(vel: Velocity, k_minor: f64) -> HydResult<Length> {
    let v = require_non_negative(vel.value, "velocity")?;
    let k = require_non_negative(k_minor, "minor loss coefficient")?;
    Ok(m(k * v * v / (2.0 * G0_MPS2)))
}

/// Total head loss through an arbitrary channel section.
pub fn headloss_channel(
    area: Area,
    vel: Velocity,
    wetted_perimeter: Length,
    length: Length,
    k_minor: f64,
    nu: KinVisc,
    roughness: Length,
) -> HydResult<Length> {
    let major = headloss_major_channel(vel, area, wetted_perimeter, length, nu, roughness)?;
    let minor = headloss_minor_channel(vel, k_minor)?;
    Ok(major + minor)
}

/// Head loss through a manifold with `n_outlets` evenly spaced ports,
/// the straight-pipe loss scaled by the dwindling-flow correction
/// `1/3 + 1/(2N) + 1/(6N^2)`.
pub fn headloss_manifold(
    flow: Flow,
    diam: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
    k_minor: f64,
    n_outlets: f64,
) -> HydResult<Length> {
    let n = require_whole_positive(n_outlets, "outlet count")?;
    let straight = headloss_pipe(flow, diam, length, nu, roughness, k_minor)?;
    let correction = 1.0 / 3.0 + 1.0 / (2.0 * n) + 1.0 / (6.0 * n * n);
    Ok(straight * correction)
}

/// Former name of [`headloss_major_pipe`].
#[deprecated(note = "use headloss_major_pipe")]
pub fn headloss_fric(
    flow: Flow,
    diam: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
) -> HydResult<Length> {
    warn_deprecated_name("headloss_fric", "headloss_major_pipe");
    headloss_major_pipe(flow, diam, length, nu, roughness)
}

/// Former name of [`headloss_minor_pipe`].
#[deprecated(note = "use headloss_minor_pipe")]
pub fn headloss_exp(flow: Flow, diam: Length, k_minor: f64) -> HydResult<Length> {
    warn_deprecated_name("headloss_exp", "headloss_minor_pipe");
    headloss_minor_pipe(flow, diam, k_minor)
}

/// Former name of [`headloss_pipe`].
#[deprecated(note = "use headloss_pipe")]
pub fn headloss(
    flow: Flow,
    diam: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
    k_minor: f64,
) -> HydResult<Length> {
    warn_deprecated_name("headloss", "headloss_pipe");
    headloss_pipe(flow, diam, length, nu, roughness, k_minor)
}

/// Former name of [`headloss_minor_elbow`].
#[deprecated(note = "use headloss_minor_elbow")]
pub fn elbow_minor_loss(flow: Flow, diam: Length) -> HydResult<Length> {
    warn_deprecated_name("elbow_minor_loss", "headloss_minor_elbow");
    headloss_minor_elbow(flow, diam)
}

/// Former name of [`headloss_major_rect`].
#[deprecated(note = "use headloss_major_rect")]
pub fn headloss_fric_rect(
    flow: Flow,
    width: Length,
    depth: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
    open_channel: bool,
) -> HydResult<Length> {
    warn_deprecated_name("headloss_fric_rect", "headloss_major_rect");
    headloss_major_rect(flow, width, depth, length, nu, roughness, open_channel)
}

/// Former name of [`headloss_minor_rect`].
#[deprecated(note = "use headloss_minor_rect")]
pub fn headloss_exp_rect(
    flow: Flow,
    width: Length,
    depth: Length,
    k_minor: f64,
) -> HydResult<Length> {
    warn_deprecated_name("headloss_exp_rect", "headloss_minor_rect");
    headloss_minor_rect(flow, width, depth, k_minor)
}

/// Former name of [`headloss_major_channel`].
#[deprecated(note = "use headloss_major_channel")]
pub fn headloss_fric_general(
    vel: Velocity,
    area: Area,
    wetted_perimeter: Length,
    length: Length,
    nu: KinVisc,
    roughness: Length,
) -> HydResult<Length> {
    warn_deprecated_name("headloss_fric_general", "headloss_major_channel");
    headloss_major_channel(vel, area, wetted_perimeter, length, nu, roughness)
}

/// Former name of [`headloss_minor_channel`].
#[deprecated(note = "use headloss_minor_channel")]
pub fn headloss_exp_general(vel: Velocity, k_minor: f64) -> HydResult<Length> {
    warn_deprecated_name("headloss_exp_general", "headloss_minor_channel");
    headloss_minor_channel(vel, k_minor)
}

/// Former name of [`headloss_channel`].
#[deprecated(note = "use headloss_channel")]
pub fn headloss_gen(
    area: Area,
    vel: Velocity,
    wetted_perimeter: Length,
    length: Length,
    k_minor: f64,
    nu: KinVisc,
    roughness: Length,
) -> HydResult<Length> {
    warn_deprecated_name("headloss_gen", "headloss_channel");
    headloss_channel(area, vel, wetted_perimeter, length, k_minor, nu, roughness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FailureKind, HydraulicsError};
    use af_core::units::{m2, m2ps, m3ps, mps};

    #[test]
    fn pipe_reference_values() {
        let major = headloss_major_pipe(m3ps(100.0), m(2.0), m(4.0), m2ps(0.001), m(0.0)).unwrap();
        assert!((major.value - 2.032838149828097).abs() < 1e-12);
        let minor = headloss_minor_pipe(m3ps(60.0), m(0.9), 0.067).unwrap();
        assert!((minor.value - 30.386230766265218).abs() < 1e-9);
        let total = headloss_pipe(m3ps(100.0), m(2.0), m(4.0), m2ps(0.001), m(1.0), 2.0).unwrap();
        assert!((total.value - 137.5737950973186).abs() < 1e-9);
    }

    #[test]
    fn channel_reference_values() {
        let major =
            headloss_major_channel(mps(1.0), m2(1.0), m(1.0), m(1.0), m2ps(1.0), m(1.0)).unwrap();
        assert!((major.value - 0.20394324259558566).abs() < 1e-12);
        let minor = headloss_minor_channel(mps(0.06), 0.02).unwrap();
        assert!((minor.value - 3.6709783667205415e-06).abs() < 1e-18);
        let total = headloss_channel(
            m2(36.0),
            mps(0.1),
            m(4.0),
            m(6.0),
            0.02,
            m2ps(0.86),
            m(0.0045),
        )
        .unwrap();
        assert!((total.value - 0.0013093911519979544).abs() < 1e-15);
    }

    #[test]
    fn manifold_applies_the_dwindling_flow_correction() {
        let hl = headloss_manifold(m3ps(2.0), m(6.0), m(40.0), m2ps(1.1), m(0.04), 5.0, 6.0)
            .unwrap();
        assert!((hl.value - 0.11938889890999548).abs() < 1e-12);
        // one outlet sees the full straight-pipe loss
        let one = headloss_manifold(m3ps(2.0), m(6.0), m(40.0), m2ps(1.1), m(0.04), 5.0, 1.0)
            .unwrap();
        let straight = headloss_pipe(m3ps(2.0), m(6.0), m(40.0), m2ps(1.1), m(0.04), 5.0).unwrap();
        assert!((one.value - straight.value).abs() < 1e-12);
    }

    #[test]
    fn manifold_rejects_fractional_outlet_counts() {
        let err = headloss_manifold(m3ps(2.0), m(6.0), m(40.0), m2ps(1.1), m(0.04), 5.0, 2.5)
            .unwrap_err();
        assert!(matches!(err, HydraulicsError::NotWhole { .. }));
        assert_eq!(err.kind(), FailureKind::CallerContract);
    }

    #[test]
    fn zero_flow_minor_loss_is_zero_but_major_fails() {
        let minor = headloss_minor_pipe(m3ps(0.0), m(1.0), 4.0).unwrap();
        assert_eq!(minor.value, 0.0);
        assert!(headloss_major_pipe(m3ps(0.0), m(1.0), m(1.0), m2ps(1e-6), m(0.0)).is_err());
    }

    #[test]
    fn elbow_uses_the_standard_coefficient() {
        let elbow = headloss_minor_elbow(m3ps(0.01), m(0.1)).unwrap();
        let by_hand = headloss_minor_pipe(m3ps(0.01), m(0.1), 0.9).unwrap();
        assert_eq!(elbow.value, by_hand.value);
    }
}
