//! Pipe capacity and sizing solvers.
//!
//! The forward family answers "how much flow does this pipe pass under a
//! given head loss", the inverse family "what diameter passes this flow".
//! Both dispatch between the laminar Hagen-Poiseuille closed form and the
//! turbulent Swamee-Jain closed form, and both resolve combined major plus
//! minor losses with a short fixed-point split of the available head.

use std::f64::consts::PI;

use af_core::units::constants::G0_MPS2;
use af_core::units::{m, m3ps, Flow, KinVisc, Length};

use crate::compat::warn_deprecated_name;
use crate::error::HydResult;
use crate::friction::RE_TRANSITION;
use crate::geometry::diam_circle_raw;
use crate::headloss::{headloss_major_pipe_raw, headloss_minor_pipe_raw};
use crate::reynolds::re_pipe_raw;
use crate::validation::{require_non_negative, require_positive};

const SPLIT_MAX_ITER: u32 = 100;
const FLOW_SPLIT_TOL: f64 = 0.01;
const DIAM_SPLIT_TOL: f64 = 0.001;

#[inline]
fn flow_transition_raw(d: f64, nu: f64) -> f64 {
    PI * d * nu * RE_TRANSITION / 4.0
}

/// Largest flow that is still laminar in a pipe of the given diameter.
pub fn flow_transition(diam: Length, nu: KinVisc) -> HydResult<Flow> {
    let d = require_positive(diam.value, "pipe diameter")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    Ok(m3ps(flow_transition_raw(d, nu)))
}

#[inline]
fn flow_hagen_raw(d: f64, hf: f64, l: f64, nu: f64) -> f64 {
    PI * G0_MPS2 * hf * d.powi(4) / (128.0 * nu * l)
}

/// Laminar flow through a pipe losing `headloss_major` to wall friction.
pub fn flow_hagen(
    diam: Length,
    headloss_major: Length,
    length: Length,
    nu: KinVisc,
) -> HydResult<Flow> {
    let d = require_positive(diam.value, "pipe diameter")?;
    let hf = require_non_negative(headloss_major.value, "friction head loss")?;
    let l = require_positive(length.value, "pipe length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    Ok(m3ps(flow_hagen_raw(d, hf, l, nu)))
}

#[inline]
fn flow_swamee_raw(d: f64, hf: f64, l: f64, nu: f64, rough: f64) -> f64 {
    let logterm = f64::log10(
        rough / (3.7 * d) + 2.51 * nu * (l / (2.0 * G0_MPS2 * hf * d.powi(3))).sqrt(),
    );
    -PI / 2.0_f64.sqrt() * d.powf(2.5) * (G0_MPS2 * hf / l).sqrt() * logterm
}

/// Turbulent flow through a pipe losing `headloss_major` to wall friction.
pub fn flow_swamee(
    diam: Length,
    headloss_major: Length,
    length: Length,
    nu: KinVisc,
    pipe_rough: Length,
) -> HydResult<Flow> {
    let d = require_positive(diam.value, "pipe diameter")?;
    let hf = require_positive(headloss_major.value, "friction head loss")?;
    let l = require_positive(length.value, "pipe length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(pipe_rough.value, "pipe roughness")?;
    Ok(m3ps(flow_swamee_raw(d, hf, l, nu, rough)))
}

#[inline]
fn flow_major_raw(d: f64, hf: f64, l: f64, nu: f64, rough: f64) -> f64 {
    let q_hagen = flow_hagen_raw(d, hf, l, nu);
    if q_hagen < flow_transition_raw(d, nu) {
        q_hagen
    } else {
        flow_swamee_raw(d, hf, l, nu, rough)
    }
}

/// Flow through a pipe losing `headloss_major` to wall friction, laminar or
/// turbulent as the Hagen-Poiseuille estimate decides.
pub fn flow_major_pipe(
    diam: Length,
    headloss_major: Length,
    length: Length,
    nu: KinVisc,
    pipe_rough: Length,
) -> HydResult<Flow> {
    let d = require_positive(diam.value, "pipe diameter")?;
    let hf = require_non_negative(headloss_major.value, "friction head loss")?;
    let l = require_positive(length.value, "pipe length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(pipe_rough.value, "pipe roughness")?;
    Ok(m3ps(flow_major_raw(d, hf, l, nu, rough)))
}

#[inline]
fn flow_minor_raw(d: f64, he: f64, k: f64) -> f64 {
    (PI / 4.0) * d * d * (2.0 * G0_MPS2 * he / k).sqrt()
}

/// Flow through a pipe losing `headloss_expans` to minor losses only.
pub fn flow_minor_pipe(diam: Length, headloss_expans: Length, k_minor: f64) -> HydResult<Flow> {
    let d = require_positive(diam.value, "pipe diameter")?;
    let he = require_non_negative(headloss_expans.value, "expansion head loss")?;
    let k = require_positive(k_minor, "minor loss coefficient")?;
    Ok(m3ps(flow_minor_raw(d, he, k)))
}

/// Flow through a pipe spending `headloss` on both friction and minor
/// losses.
///
/// With no minor losses the whole head drives friction. Otherwise the head
/// is split between the two loss mechanisms by fixed-point iteration on the
/// friction share.
pub fn flow_pipe(
    diam: Length,
    headloss: Length,
    length: Length,
    nu: KinVisc,
    pipe_rough: Length,
    k_minor: f64,
) -> HydResult<Flow> {
    let d = require_positive(diam.value, "pipe diameter")?;
    let hl = require_non_negative(headloss.value, "head loss")?;
    let l = require_positive(length.value, "pipe length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(pipe_rough.value, "pipe roughness")?;
    let k = require_non_negative(k_minor, "minor loss coefficient")?;
    if k == 0.0 {
        return Ok(m3ps(flow_major_raw(d, hl, l, nu, rough)));
    }
    let mut q = f64::min(flow_major_raw(d, hl, l, nu, rough), flow_minor_raw(d, hl, k));
    for _ in 0..SPLIT_MAX_ITER {
        if q == 0.0 {
            break;
        }
        let q_prev = q;
        let hf = headloss_major_pipe_raw(q, d, l, nu, rough);
        let he = headloss_minor_pipe_raw(q, d, k);
        q = flow_major_raw(d, hl * hf / (hf + he), l, nu, rough);
        if (q - q_prev).abs() / (q + q_prev) <= FLOW_SPLIT_TOL {
            break;
        }
    }
    Ok(m3ps(q))
}

#[inline]
fn diam_hagen_raw(q: f64, hf: f64, l: f64, nu: f64) -> f64 {
    (128.0 * nu * q * l / (G0_MPS2 * hf * PI)).powf(0.25)
}

/// Diameter of a laminar pipe passing `flow` under `headloss_major`.
pub fn diam_hagen(
    flow: Flow,
    headloss_major: Length,
    length: Length,
    nu: KinVisc,
) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let hf = require_positive(headloss_major.value, "friction head loss")?;
    let l = require_positive(length.value, "pipe length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    Ok(m(diam_hagen_raw(q, hf, l, nu)))
}

#[inline]
fn diam_swamee_raw(q: f64, hf: f64, l: f64, nu: f64, rough: f64) -> f64 {
    let gh = G0_MPS2 * hf;
    let a = rough.powf(1.25) * (l * q * q / gh).powf(4.75);
    let b = nu * q.powf(9.4) * (l / gh).powf(5.2);
    0.66 * (a + b).powf(0.04)
}

/// Diameter of a turbulent pipe passing `flow` under `headloss_major`.
pub fn diam_swamee(
    flow: Flow,
    headloss_major: Length,
    length: Length,
    nu: KinVisc,
    pipe_rough: Length,
) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let hf = require_positive(headloss_major.value, "friction head loss")?;
    let l = require_positive(length.value, "pipe length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(pipe_rough.value, "pipe roughness")?;
    Ok(m(diam_swamee_raw(q, hf, l, nu, rough)))
}

#[inline]
fn diam_major_raw(q: f64, hf: f64, l: f64, nu: f64, rough: f64) -> f64 {
    let d_hagen = diam_hagen_raw(q, hf, l, nu);
    if re_pipe_raw(q, d_hagen, nu) <= RE_TRANSITION {
        d_hagen
    } else {
        diam_swamee_raw(q, hf, l, nu, rough)
    }
}

/// Diameter passing `flow` under `headloss_major`, laminar or turbulent as
/// the Hagen-Poiseuille estimate decides.
pub fn diam_major_pipe(
    flow: Flow,
    headloss_major: Length,
    length: Length,
    nu: KinVisc,
    pipe_rough: Length,
) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let hf = require_positive(headloss_major.value, "friction head loss")?;
    let l = require_positive(length.value, "pipe length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(pipe_rough.value, "pipe roughness")?;
    Ok(m(diam_major_raw(q, hf, l, nu, rough)))
}

#[inline]
fn diam_minor_raw(q: f64, he: f64, k: f64) -> f64 {
    diam_circle_raw(q / (2.0 * G0_MPS2 * he / k).sqrt())
}

/// Diameter passing `flow` while spending `headloss_expans` on minor losses.
pub fn diam_minor_pipe(flow: Flow, headloss_expans: Length, k_minor: f64) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let he = require_positive(headloss_expans.value, "expansion head loss")?;
    let k = require_positive(k_minor, "minor loss coefficient")?;
    Ok(m(diam_minor_raw(q, he, k)))
}

/// Diameter passing `flow` while spending `headloss` on both friction and
/// minor losses.
pub fn diam_pipe(
    flow: Flow,
    headloss: Length,
    length: Length,
    nu: KinVisc,
    pipe_rough: Length,
    k_minor: f64,
) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let hl = require_positive(headloss.value, "head loss")?;
    let l = require_positive(length.value, "pipe length")?;
    let nu = require_positive(nu.value, "kinematic viscosity")?;
    let rough = require_non_negative(pipe_rough.value, "pipe roughness")?;
    let k = require_non_negative(k_minor, "minor loss coefficient")?;
    if k == 0.0 {
        return Ok(m(diam_major_raw(q, hl, l, nu, rough)));
    }
    let mut d = f64::max(diam_major_raw(q, hl, l, nu, rough), diam_minor_raw(q, hl, k));
    for _ in 0..SPLIT_MAX_ITER {
        let d_prev = d;
        let hf = headloss_major_pipe_raw(q, d, l, nu, rough);
        let he = headloss_minor_pipe_raw(q, d, k);
        d = diam_major_raw(q, hl * hf / (hf + he), l, nu, rough);
        if (d - d_prev).abs() / (d + d_prev) <= DIAM_SPLIT_TOL {
            break;
        }
    }
    Ok(m(d))
}

/// Former name of [`flow_major_pipe`].
#[deprecated(note = "use flow_major_pipe")]
pub fn flow_pipemajor(
    diam: Length,
    headloss_major: Length,
    length: Length,
    nu: KinVisc,
    pipe_rough: Length,
) -> HydResult<Flow> {
    warn_deprecated_name("flow_pipemajor", "flow_major_pipe");
    flow_major_pipe(diam, headloss_major, length, nu, pipe_rough)
}

/// Former name of [`flow_minor_pipe`].
#[deprecated(note = "use flow_minor_pipe")]
pub fn flow_pipeminor(diam: Length, headloss_expans: Length, k_minor: f64) -> HydResult<Flow> {
    warn_deprecated_name("flow_pipeminor", "flow_minor_pipe");
    flow_minor_pipe(diam, headloss_expans, k_minor)
}

/// Former name of [`diam_major_pipe`].
#[deprecated(note = "use diam_major_pipe")]
pub fn diam_pipemajor(
    flow: Flow,
    headloss_major: Length,
    length: Length,
    nu: KinVisc,
    pipe_rough: Length,
) -> HydResult<Length> {
    warn_deprecated_name("diam_pipemajor", "diam_major_pipe");
    diam_major_pipe(flow, headloss_major, length, nu, pipe_rough)
}

/// Former name of [`diam_minor_pipe`].
#[deprecated(note = "use diam_minor_pipe")]
pub fn diam_pipeminor(flow: Flow, headloss_expans: Length, k_minor: f64) -> HydResult<Length> {
    warn_deprecated_name("diam_pipeminor", "diam_minor_pipe");
    diam_minor_pipe(flow, headloss_expans, k_minor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_core::units::m2ps;

    #[test]
    fn transition_flow_reference_value() {
        let q = flow_transition(m(2.0), m2ps(0.4)).unwrap();
        assert!((q.value - 1319.4689145077132).abs() < 1e-9);
    }

    #[test]
    fn closed_form_capacity_reference_values() {
        let hagen = flow_hagen(m(1.0), m(0.4), m(5.21), m2ps(0.6)).unwrap();
        assert!((hagen.value - 0.03079864403023667).abs() < 1e-12);
        let swamee = flow_swamee(m(2.0), m(0.04), m(3.0), m2ps(0.1), m(0.37)).unwrap();
        assert!((swamee.value - 2.9565931732010045).abs() < 1e-9);
        let major = flow_major_pipe(m(1.0), m(0.97), m(0.5), m2ps(0.025), m(0.06)).unwrap();
        assert!((major.value - 18.67765288027284).abs() < 1e-9);
        let minor = flow_minor_pipe(m(1.0), m(0.125), 3.0).unwrap();
        assert!((minor.value - 0.7100020393161108).abs() < 1e-12);
    }

    #[test]
    fn combined_capacity_splits_the_head() {
        let no_minor = flow_pipe(m(0.25), m(0.4), m(2.0), m2ps(0.58), m(0.029), 0.0).unwrap();
        assert!((no_minor.value - 0.000324207170118938).abs() < 1e-15);
        let with_minor = flow_pipe(m(0.25), m(0.4), m(2.0), m2ps(0.58), m(0.029), 0.35).unwrap();
        assert!((with_minor.value - 0.0003242065391839879).abs() < 1e-15);
        assert!(with_minor.value < no_minor.value);
    }

    #[test]
    fn zero_head_passes_zero_flow() {
        let q = flow_pipe(m(0.25), m(0.0), m(2.0), m2ps(1e-6), m(0.0), 2.0).unwrap();
        assert_eq!(q.value, 0.0);
    }

    #[test]
    fn closed_form_sizing_reference_values() {
        let hagen = diam_hagen(m3ps(0.006), m(0.00025), m(0.75), m2ps(0.0004)).unwrap();
        assert!((hagen.value - 0.4158799465199102).abs() < 1e-12);
        let swamee = diam_swamee(m3ps(0.06), m(1.2), m(7.0), m2ps(0.2), m(0.0004)).unwrap();
        assert!((swamee.value - 0.19286307314945772).abs() < 1e-12);
        let minor = diam_minor_pipe(m3ps(0.008), m(0.012), 0.93).unwrap();
        assert!((minor.value - 0.14229440061589257).abs() < 1e-12);
    }

    #[test]
    fn combined_sizing_reference_values() {
        let no_minor = diam_pipe(m3ps(0.007), m(0.04), m(0.75), m2ps(0.16), m(0.0079), 0.0).unwrap();
        assert!((no_minor.value - 0.5434876490369928).abs() < 1e-12);
        let with_minor = diam_pipe(m3ps(0.006), m(0.001), m(1.0), m2ps(1.0), m(1.0), 1.0).unwrap();
        assert!((with_minor.value - 2.2345271056755576).abs() < 1e-9);
    }

    #[test]
    fn hagen_forms_invert_each_other() {
        let d = m(0.31);
        let q = flow_hagen(d, m(0.02), m(4.0), m2ps(1e-4)).unwrap();
        let d_back = diam_hagen(q, m(0.02), m(4.0), m2ps(1e-4)).unwrap();
        assert!((d_back.value - d.value).abs() < 1e-12);
    }

    #[test]
    fn laminar_branch_is_kept_only_below_transition() {
        // high viscosity keeps the Hagen estimate laminar
        let q = m3ps(0.006);
        let d = diam_major_pipe(q, m(0.00025), m(0.75), m2ps(0.0004), m(0.001)).unwrap();
        let re = re_pipe_raw(q.value, d.value, 0.0004);
        assert!(re <= RE_TRANSITION);
        // water viscosity pushes the same demand turbulent
        let d_turb = diam_major_pipe(q, m(0.00025), m(0.75), m2ps(1e-6), m(0.001)).unwrap();
        let d_swamee = diam_swamee(q, m(0.00025), m(0.75), m2ps(1e-6), m(0.001)).unwrap();
        assert_eq!(d_turb.value, d_swamee.value);
    }

    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn capacity_grows_with_available_head(
                hl in 1e-4f64..10.0,
                extra in 1e-4f64..10.0,
            ) {
                let lo = flow_pipe(m(0.1), m(hl), m(5.0), m2ps(1e-6), m(1e-4), 2.0)
                    .unwrap();
                let hi = flow_pipe(m(0.1), m(hl + extra), m(5.0), m2ps(1e-6), m(1e-4), 2.0)
                    .unwrap();
                prop_assert!(hi.value >= lo.value);
            }

            #[test]
            fn sized_pipe_carries_the_demanded_flow(
                q in 1e-5f64..0.1,
                hl in 1e-3f64..1.0,
            ) {
                let d = diam_pipe(m3ps(q), m(hl), m(5.0), m2ps(1e-6), m(1e-4), 3.0).unwrap();
                let capacity = flow_pipe(d, m(hl), m(5.0), m2ps(1e-6), m(1e-4), 3.0).unwrap();
                // fixed point converges to a few percent
                prop_assert!(capacity.value > 0.9 * q);
            }
        }
    }
}
