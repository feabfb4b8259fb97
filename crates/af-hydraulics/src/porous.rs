//! Flow through porous media via the Ergun relations.
//!
//! The approach (superficial) velocity is the flow divided by the empty bed
//! cross section; porosity must lie strictly between 0 and 1. Water
//! properties are evaluated at the supplied temperature.

use af_core::units::constants::G0_MPS2;
use af_core::units::{hz, m, Frequency, Length, Temperature, Velocity};

use crate::compat::warn_deprecated_name;
use crate::error::{HydResult, HydraulicsError};
use crate::validation::{require_inside_unit_interval, require_non_negative, require_positive};
use crate::water::viscosity_kinematic_water;

/// Reynolds number of flow through a granular bed.
pub fn re_ergun(
    approach_vel: Velocity,
    diam_media: Length,
    temp: Temperature,
    porosity: f64,
) -> HydResult<f64> {
    let v = require_non_negative(approach_vel.value, "approach velocity")?;
    let d = require_positive(diam_media.value, "media grain diameter")?;
    let phi = require_inside_unit_interval(porosity, "porosity")?;
    let nu = viscosity_kinematic_water(temp)?;
    Ok(v * d / ((1.0 - phi) * nu.value))
}

/// Ergun friction factor, `300/Re + 3.5`.
pub fn fric_ergun(
    approach_vel: Velocity,
    diam_media: Length,
    temp: Temperature,
    porosity: f64,
) -> HydResult<f64> {
    require_positive(approach_vel.value, "approach velocity")?;
    let re = re_ergun(approach_vel, diam_media, temp, porosity)?;
    Ok(300.0 / re + 3.5)
}

/// Head loss through `length` of granular bed.
pub fn headloss_ergun(
    approach_vel: Velocity,
    diam_media: Length,
    temp: Temperature,
    porosity: f64,
    length: Length,
) -> HydResult<Length> {
    let l = require_non_negative(length.value, "bed depth")?;
    let f = fric_ergun(approach_vel, diam_media, temp, porosity)?;
    let v = approach_vel.value;
    let d = diam_media.value;
    let phi = porosity;
    let hl = f * (l / d) * (v * v / (2.0 * G0_MPS2)) * (1.0 - phi) / phi.powi(3);
    Ok(m(hl))
}

/// Camp-Stein velocity gradient of flow through a granular bed.
pub fn g_cs_ergun(
    approach_vel: Velocity,
    diam_media: Length,
    temp: Temperature,
    porosity: f64,
) -> HydResult<Frequency> {
    let f = fric_ergun(approach_vel, diam_media, temp, porosity)?;
    let nu = viscosity_kinematic_water(temp)?;
    let v = approach_vel.value;
    let d = diam_media.value;
    let phi = porosity;
    let g = (f * v.powi(3) * (1.0 - phi) / (2.0 * nu.value * d * phi.powi(4))).sqrt();
    Ok(hz(g))
}

/// Kozeny head loss is no longer offered; it badly underpredicts losses
/// outside the creeping-flow range the Ergun relation covers.
#[deprecated(note = "use headloss_ergun")]
pub fn headloss_kozeny(
    _approach_vel: Velocity,
    _diam_media: Length,
    _temp: Temperature,
    _porosity: f64,
    _length: Length,
) -> HydResult<Length> {
    warn_deprecated_name("headloss_kozeny", "headloss_ergun");
    Err(HydraulicsError::Retired {
        name: "headloss_kozeny",
        successor: "headloss_ergun",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use af_core::units::{k, mps};

    fn bed_vel() -> Velocity {
        mps(0.1)
    }

    fn grain() -> Length {
        m(0.001)
    }

    #[test]
    fn ergun_reference_chain() {
        let re = re_ergun(bed_vel(), grain(), k(298.0), 0.2).unwrap();
        assert!((re - 139.49692604061354).abs() < 1e-9);
        let f = fric_ergun(bed_vel(), grain(), k(298.0), 0.2).unwrap();
        assert!((f - 5.6505850237349105).abs() < 1e-9);
        let hl = headloss_ergun(bed_vel(), grain(), k(298.0), 0.2, m(4.0)).unwrap();
        assert!((hl.value - 1152.398632302552).abs() < 1e-6);
        let g = g_cs_ergun(bed_vel(), grain(), k(298.0), 0.2).unwrap();
        assert!((g.value - 39704.89242252515).abs() < 1e-6);
    }

    #[test]
    fn porosity_must_be_strictly_inside_the_unit_interval() {
        for phi in [0.0, 1.0, -0.2, 1.4] {
            let err = re_ergun(bed_vel(), grain(), k(298.0), phi).unwrap_err();
            assert_eq!(err.kind(), FailureKind::Domain, "porosity {phi}");
        }
    }

    #[test]
    fn still_water_has_zero_bed_reynolds() {
        let re = re_ergun(mps(0.0), grain(), k(298.0), 0.4).unwrap();
        assert_eq!(re, 0.0);
        // but the friction factor needs motion
        assert!(fric_ergun(mps(0.0), grain(), k(298.0), 0.4).is_err());
    }

    #[test]
    #[allow(deprecated)]
    fn kozeny_is_retired_for_every_input() {
        let err = headloss_kozeny(bed_vel(), grain(), k(298.0), 0.4, m(1.0)).unwrap_err();
        assert!(matches!(
            err,
            HydraulicsError::Retired {
                name: "headloss_kozeny",
                ..
            }
        ));
        assert_eq!(err.kind(), FailureKind::Retired);
        // arguments are irrelevant, even invalid ones
        let err = headloss_kozeny(mps(-3.0), m(0.0), k(1.0), 7.0, m(-2.0)).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Retired);
    }
}
