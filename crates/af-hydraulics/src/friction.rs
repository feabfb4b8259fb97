//! Darcy friction factors.
//!
//! Below the transition Reynolds number the laminar `64/Re` law applies and
//! surface roughness drops out; above it the Swamee-Jain explicit
//! approximation of the Colebrook equation is used. Rectangular and general
//! channel sections run the same correlation on four hydraulic radii.

use af_core::units::{Area, Flow, KinVisc, Length, Velocity};

use crate::compat::warn_deprecated_name;
use crate::error::HydResult;
use crate::geometry::radius_hydraulic_rect_raw;
use crate::reynolds::{re_channel_raw, re_pipe_raw, re_rect_raw};
use crate::validation::{require_non_negative, require_positive};

/// Reynolds number above which flow is treated as turbulent.
pub const RE_TRANSITION: f64 = 2100.0;

/// Swamee-Jain over a characteristic length (pipe diameter or four
/// hydraulic radii), falling back to `64/Re` in the laminar range.
#[inline]
pub(crate) fn fric_raw(re: f64, rough: f64, char_len: f64) -> f64 {
    if re <= RE_TRANSITION {
        64.0 / re
    } else {
        let log = f64::log10(rough / (3.7 * char_len) + 5.74 / re.powf(0.9));
        0.25 / (log * log)
    }
}

#[inline]
pub(crate) fn fric_pipe_raw(q: f64, d: f64, nu: f64, rough: f64) -> f64 {
    fric_raw(re_pipe_raw(q, d, nu), rough, d)
}

/// Darcy friction factor of full pipe flow.
pub fn fric_pipe(flow: Flow, diam: Length, nu: KinVisc, roughness: Length) -> HydResult<f64> {
    let q = require_positive(flow.value, "flow")?;
    let d = require_positive(diam.value, "pipe diameter")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(roughness.value, "pipe roughness")?;
    Ok(fric_pipe_raw(q, d, nu, rough))
}

#[inline]
pub(crate) fn fric_rect_raw(q: f64, w: f64, h: f64, nu: f64, rough: f64, open_channel: bool) -> f64 {
    let re = re_rect_raw(q, w, h, nu, open_channel);
    fric_raw(re, rough, 4.0 * radius_hydraulic_rect_raw(w, h, open_channel))
}

/// Darcy friction factor of flow through a rectangular section.
pub fn fric_rect(
    flow: Flow,
    width: Length,
    depth: Length,
    nu: KinVisc,
    roughness: Length,
    open_channel: bool,
) -> HydResult<f64> {
    let q = require_positive(flow.value, "flow")?;
    let w = require_positive(width.value, "channel width")?;
    let h = require_positive(depth.value, "water depth")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(roughness.value, "channel roughness")?;
    Ok(fric_rect_raw(q, w, h, nu, rough, open_channel))
}

#[inline]
pub(crate) fn fric_channel_raw(v: f64, a: f64, wp: f64, nu: f64, rough: f64) -> f64 {
    fric_raw(re_channel_raw(v, a, wp, nu), rough, 4.0 * a / wp)
}

/// Darcy friction factor of an arbitrary channel section from its mean
/// velocity.
pub fn fric_channel(
    vel: Velocity,
    area: Area,
    wetted_perimeter: Length,
    nu: KinVisc,
    roughness: Length,
) -> HydResult<f64> {
    let v = require_positive(vel.value, "velocity")?;
    let a = require_positive(area.value, "flow area")?;
    let wp = require_positive(wetted_perimeter.value, "wetted perimeter")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(roughness.value, "channel roughness")?;
    Ok(fric_channel_raw(v, a, wp, nu, rough))
}

/// Former name of [`fric_pipe`].
#[deprecated(note = "use fric_pipe")]
pub fn fric(flow: Flow, diam: Length, nu: KinVisc, roughness: Length) -> HydResult<f64> {
    warn_deprecated_name("fric", "fric_pipe");
    fric_pipe(flow, diam, nu, roughness)
}

/// Former name of [`fric_channel`].
#[deprecated(note = "use fric_channel")]
pub fn fric_general(
    vel: Velocity,
    area: Area,
    wetted_perimeter: Length,
    nu: KinVisc,
    roughness: Length,
) -> HydResult<f64> {
    warn_deprecated_name("fric_general", "fric_channel");
    fric_channel(vel, area, wetted_perimeter, nu, roughness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_core::units::{m, m2ps, m3ps};

    #[test]
    fn turbulent_pipe_reference_values() {
        let rough = fric_pipe(m3ps(100.0), m(2.0), m2ps(0.001), m(1.0)).unwrap();
        assert!((rough - 0.33154589118654193).abs() < 1e-12);
        let smooth = fric_pipe(m3ps(100.0), m(2.0), m2ps(0.001), m(0.0)).unwrap();
        assert!((smooth - 0.019675384283293733).abs() < 1e-12);
    }

    #[test]
    fn laminar_pipe_ignores_roughness() {
        let f = fric_pipe(m3ps(100.0), m(2.0), m2ps(0.1), m(1.0)).unwrap();
        assert!((f - 0.10053096491487337).abs() < 1e-12);
        let f0 = fric_pipe(m3ps(100.0), m(2.0), m2ps(0.1), m(0.0)).unwrap();
        assert_eq!(f, f0);
    }

    #[test]
    fn rect_reference_values() {
        let laminar = fric_rect(m3ps(60.0), m(0.7), m(1.0), m2ps(0.6), m(0.001), true).unwrap();
        assert!((laminar - 0.432).abs() < 1e-12);
        let turbulent = fric_rect(m3ps(120.0), m(1.0), m(0.04), m2ps(0.125), m(0.6), true).unwrap();
        assert!((turbulent - 150.9085987435641).abs() < 1e-9);
        let closed = fric_rect(m3ps(120.0), m(1.0), m(0.04), m2ps(0.125), m(0.0), false).unwrap();
        assert!((closed - 0.034666666666666665).abs() < 1e-12);
    }

    #[test]
    fn zero_flow_is_rejected() {
        assert!(fric_pipe(m3ps(0.0), m(1.0), m2ps(1e-6), m(0.0)).is_err());
        assert!(fric_rect(m3ps(0.0), m(1.0), m(1.0), m2ps(1e-6), m(0.0), true).is_err());
    }

    #[test]
    fn laminar_and_smooth_turbulent_stay_close_at_the_transition() {
        let laminar = fric_raw(RE_TRANSITION, 0.0, 1.0);
        let turbulent = fric_raw(RE_TRANSITION + 1e-9, 0.0, 1.0);
        let rel = (laminar - turbulent).abs() / laminar;
        assert!(rel < 0.5, "discontinuity {rel} too large");
    }

    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn friction_factor_is_positive_and_finite(
                q in 1e-6f64..1e3,
                d in 1e-3f64..10.0,
                rough in 0.0f64..0.01,
            ) {
                let f = fric_pipe(m3ps(q), m(d), m2ps(1e-6), m(rough)).unwrap();
                prop_assert!(f.is_finite());
                prop_assert!(f > 0.0);
            }

            #[test]
            fn rougher_pipe_never_reduces_turbulent_friction(
                q in 1.0f64..100.0,
                extra in 0.0f64..0.01,
            ) {
                // q >= 1 on a 0.5 m pipe at water viscosity is well past transition
                let base = fric_pipe(m3ps(q), m(0.5), m2ps(1e-6), m(1e-4)).unwrap();
                let rougher = fric_pipe(m3ps(q), m(0.5), m2ps(1e-6), m(1e-4 + extra)).unwrap();
                prop_assert!(rougher >= base);
            }
        }
    }
}
