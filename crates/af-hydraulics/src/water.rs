//! Water and gas state properties.
//!
//! Density of water comes from a piecewise-cubic fit of the standard
//! 273.15–373.15 K reference table; dynamic viscosity from the exponential
//! correlation `2.414e-5 * 10^(247.8/(T - 140))`. Both accept any finite
//! temperature inside their documented domain and reject the rest.

use af_core::units::{Density, DynVisc, KinVisc, MolarMass, Pressure, Temperature, kgpm3, m2ps, pas};
use af_core::units::constants::R_UNIVERSAL_J_PER_MOL_K;

use crate::compat::warn_deprecated_name;
use crate::error::{HydResult, HydraulicsError};
use crate::validation::{require_non_negative, require_positive};

/// Correlation floor for the dynamic-viscosity fit [K].
const VISCOSITY_T_FLOOR_K: f64 = 140.0;

/// One segment of the water density fit:
/// `rho(T) = a + dt*(b + dt*(c + dt*d))` with `dt = T - t_k`.
#[derive(Debug, Clone, Copy)]
struct DensitySegment {
    t_k: f64,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

/// Not-a-knot cubic fit of the 12-point water density table (273.15 K to
/// 373.15 K), solved offline; the committed coefficients reproduce the table
/// knots exactly and the end segments extrapolate.
const WATER_DENSITY_FIT: [DensitySegment; 11] = [
    DensitySegment { t_k: 273.15, a: 999.9, b: 0.06607459317408164, c: -0.009822377952223354, d: 0.00012149186348158735 },
    DensitySegment { t_k: 278.15, a: 1000.0, b: -0.02303729658703286, c: -0.007999999999999544, d: 0.00012149186348158671 },
    DensitySegment { t_k: 283.15, a: 999.7, b: -0.09392540682590927, c: -0.006177622047775743, d: 0.00005701627303666719 },
    DensitySegment { t_k: 293.15, a: 998.2, b: -0.200372965870424, c: -0.004467133856675728, d: -0.00004955695562818734 },
    DensitySegment { t_k: 303.15, a: 995.7, b: -0.30458272969239475, c: -0.005953842525521348, d: 0.00014121154947608258 },
    DensitySegment { t_k: 313.15, a: 992.2, b: -0.38129611535999697, c: -0.001717496041238871, d: -0.00011528924227616594 },
    DensitySegment { t_k: 323.15, a: 988.1, b: -0.4502328088676241, c: -0.005176173309523849, d: 0.00011994541962864926 },
    DensitySegment { t_k: 333.15, a: 983.2, b: -0.5177726491695064, c: -0.0015778107206643717, d: -0.00006449243623859072 },
    DensitySegment { t_k: 343.15, a: 977.8, b: -0.568676594454371, c: -0.003512583807822093, d: 0.00003802432532591949 },
    DensitySegment { t_k: 353.15, a: 971.8, b: -0.627520973013037, c: -0.0023718540480445085, d: 0.000012395134934820781 },
    DensitySegment { t_k: 363.15, a: 965.3, b: -0.671239513493481, c: -0.001999999999999885, d: 0.000012395134934820781 },
];

pub(crate) fn density_water_raw(t: f64) -> f64 {
    let seg = WATER_DENSITY_FIT
        .iter()
        .rev()
        .find(|seg| t >= seg.t_k)
        .unwrap_or(&WATER_DENSITY_FIT[0]);
    let dt = t - seg.t_k;
    seg.a + dt * (seg.b + dt * (seg.c + dt * seg.d))
}

/// Density of water at the given temperature.
///
/// Temperatures outside the tabulated range extrapolate on the clamped end
/// segment rather than fail; the absolute temperature must still be strictly
/// positive and finite.
pub fn density_water(temp: Temperature) -> HydResult<Density> {
    let t = require_positive(temp.value, "water temperature")?;
    Ok(kgpm3(density_water_raw(t)))
}

pub(crate) fn viscosity_dynamic_water_raw(t: f64) -> f64 {
    2.414e-5 * 10f64.powf(247.8 / (t - VISCOSITY_T_FLOOR_K))
}

/// Dynamic viscosity of water. Valid above the 140 K correlation floor.
pub fn viscosity_dynamic_water(temp: Temperature) -> HydResult<DynVisc> {
    let t = temp.value;
    if !(t.is_finite() && t > VISCOSITY_T_FLOOR_K) {
        return Err(HydraulicsError::Domain {
            what: "water temperature",
            requirement: "above the 140 K correlation floor",
            value: t,
        });
    }
    Ok(pas(viscosity_dynamic_water_raw(t)))
}

pub(crate) fn viscosity_kinematic_water_raw(t: f64) -> f64 {
    viscosity_dynamic_water_raw(t) / density_water_raw(t)
}

/// Kinematic viscosity of water: dynamic viscosity over density.
pub fn viscosity_kinematic_water(temp: Temperature) -> HydResult<KinVisc> {
    let mu = viscosity_dynamic_water(temp)?;
    let rho = density_water(temp)?;
    Ok(m2ps(mu.value / rho.value))
}

/// Ideal-gas density `P*M/(R*T)`. Zero pressure gives zero density.
pub fn density_gas(molar_mass: MolarMass, pressure: Pressure, temp: Temperature) -> HydResult<Density> {
    let mm = require_positive(molar_mass.value, "molar mass")?;
    let p = require_non_negative(pressure.value, "pressure")?;
    let t = require_positive(temp.value, "absolute temperature")?;
    Ok(kgpm3(p * mm / (R_UNIVERSAL_J_PER_MOL_K * t)))
}

/// Former name of [`density_gas`]; air is not special-cased.
#[deprecated(note = "use density_gas with the gas's molar mass")]
pub fn density_air(molar_mass: MolarMass, pressure: Pressure, temp: Temperature) -> HydResult<Density> {
    warn_deprecated_name("density_air", "density_gas");
    density_gas(molar_mass, pressure, temp)
}

/// Ambiguous entry point kept for compatibility; water is the only fluid this
/// library ever meant here.
#[deprecated(note = "use viscosity_dynamic_water")]
pub fn viscosity_dynamic(temp: Temperature) -> HydResult<DynVisc> {
    warn_deprecated_name("viscosity_dynamic", "viscosity_dynamic_water");
    viscosity_dynamic_water(temp)
}

/// Ambiguous entry point kept for compatibility.
#[deprecated(note = "use viscosity_kinematic_water")]
pub fn viscosity_kinematic(temp: Temperature) -> HydResult<KinVisc> {
    warn_deprecated_name("viscosity_kinematic", "viscosity_kinematic_water");
    viscosity_kinematic_water(temp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_core::units::{k, kgpmol, pa};

    const ATM_PA: f64 = 101_325.0;

    #[test]
    fn density_reproduces_table_knots() {
        for (t, rho) in [
            (273.15, 999.9),
            (278.15, 1000.0),
            (293.15, 998.2),
            (343.15, 977.8),
            (373.15, 958.4),
        ] {
            let got = density_water(k(t)).unwrap().value;
            assert!(
                (got - rho).abs() < 1e-9,
                "density at {t} K: got {got}, want {rho}"
            );
        }
    }

    #[test]
    fn density_interpolates_between_knots() {
        let got = density_water(k(300.0)).unwrap().value;
        assert!((got - 996.6019075420821).abs() < 1e-9);
        let mid = density_water(k(298.15)).unwrap().value;
        assert!((mid - 997.0802622047775).abs() < 1e-9);
    }

    #[test]
    fn density_extrapolates_outside_the_table() {
        // Physically meaningless but well defined: the end segment extends.
        let cold = density_water(k(1.0)).unwrap().value;
        assert!(cold.is_finite());
        let hot = density_water(k(400.0)).unwrap().value;
        assert!(hot.is_finite() && hot < 958.4);
    }

    #[test]
    fn density_rejects_nonpositive_temperature() {
        assert!(density_water(k(0.0)).is_err());
        assert!(density_water(k(-10.0)).is_err());
        assert!(density_water(k(f64::NAN)).is_err());
    }

    #[test]
    fn viscosity_dynamic_matches_correlation() {
        let mu = viscosity_dynamic_water(k(300.0)).unwrap().value;
        assert!((mu - 0.0008540578046518857).abs() < 1e-15);
        assert!(viscosity_dynamic_water(k(140.0)).is_err());
        assert!(viscosity_dynamic_water(k(120.0)).is_err());
    }

    #[test]
    fn viscosity_kinematic_is_dynamic_over_density() {
        let nu = viscosity_kinematic_water(k(300.0)).unwrap().value;
        assert!((nu - 8.569698674952843e-7).abs() < 1e-18);
        let nu20 = viscosity_kinematic_water(k(293.15)).unwrap().value;
        assert!((nu20 - 1.0035551586946028e-6).abs() < 1e-18);
    }

    #[test]
    fn gas_density_follows_ideal_gas_law() {
        let rho = density_gas(kgpmol(0.02897), pa(ATM_PA), k(273.0)).unwrap().value;
        assert!((rho - 1.2932076812516042).abs() < 1e-12);
        // Vacuum is a valid input with zero density.
        let vac = density_gas(kgpmol(0.02897), pa(0.0), k(273.0)).unwrap();
        assert_eq!(vac.value, 0.0);
        assert!(density_gas(kgpmol(0.0), pa(ATM_PA), k(273.0)).is_err());
        assert!(density_gas(kgpmol(0.02897), pa(-1.0), k(273.0)).is_err());
    }

    #[test]
    #[allow(deprecated)]
    fn deprecated_names_forward_to_concrete_variants() {
        let direct = viscosity_dynamic_water(k(293.15)).unwrap();
        let shimmed = viscosity_dynamic(k(293.15)).unwrap();
        assert_eq!(direct.value, shimmed.value);

        let air = density_air(kgpmol(0.02897), pa(ATM_PA), k(273.0)).unwrap();
        let gas = density_gas(kgpmol(0.02897), pa(ATM_PA), k(273.0)).unwrap();
        assert_eq!(air.value, gas.value);
    }
}
