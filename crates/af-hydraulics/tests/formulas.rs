//! Integration tests chaining water properties, catalog lookups and the
//! flow solvers the way the design crates consume them.

use af_catalog::{id_sdr, Material};
use af_core::units::{celsius, inch, k, kgpmol, lps, m, pa, Temperature};
use af_hydraulics::{
    density_gas, density_water, diam_circle, flow_pipe, flow_weir_rect, headloss_major_pipe,
    headloss_weir_rect, horiz_chan_w, re_pipe, viscosity_dynamic_water, viscosity_kinematic_water,
    width_weir_rect,
};

fn t20() -> Temperature {
    celsius(20.0)
}

#[test]
fn water_property_chain_at_reference_temperatures() {
    let rho = density_water(k(298.15)).unwrap();
    assert!((rho.value - 997.0802622047775).abs() < 1e-9);
    let mu = viscosity_dynamic_water(k(300.0)).unwrap();
    assert!((mu.value - 0.0008540578046518857).abs() < 1e-15);
    let nu = viscosity_kinematic_water(t20()).unwrap();
    assert!((nu.value - 1.0035551586946028e-06).abs() < 1e-18);
    let air = density_gas(kgpmol(0.02897), pa(101_325.0), k(273.0)).unwrap();
    assert!((air.value - 1.2932076812516042).abs() < 1e-12);
}

#[test]
fn outlet_pipe_capacity_from_catalog_size_and_temperature() {
    // 6 in SDR 26 PVC, 3.712 m long, 4 cm of available head, three fittings
    let id = id_sdr(inch(6.0), 26.0);
    assert!((id.value - 0.15533076923076922).abs() < 1e-12);
    let nu = viscosity_kinematic_water(t20()).unwrap();
    let q = flow_pipe(id, m(0.04), m(3.712), nu, Material::Pvc.roughness(), 3.3).unwrap();
    assert!(
        (q.value - 0.008596889241798584).abs() < 1e-12,
        "capacity {} m3/s",
        q.value
    );
}

#[test]
fn major_headloss_scales_linearly_with_length() {
    let nu = viscosity_kinematic_water(t20()).unwrap();
    let hl1 = headloss_major_pipe(lps(20.0), m(0.15), m(5.0), nu, Material::Pvc.roughness())
        .unwrap();
    let hl3 = headloss_major_pipe(lps(20.0), m(0.15), m(15.0), nu, Material::Pvc.roughness())
        .unwrap();
    assert!((hl3.value - 3.0 * hl1.value).abs() < 1e-12);
    assert!(headloss_major_pipe(lps(20.0), m(0.15), m(0.0), nu, Material::Pvc.roughness())
        .is_err());
    assert!(headloss_major_pipe(lps(20.0), m(0.15), m(-1.0), nu, Material::Pvc.roughness())
        .is_err());
}

#[test]
fn weir_rating_round_trips() {
    for q_lps in [2.0, 20.0, 120.0] {
        let q = lps(q_lps);
        let w = width_weir_rect(q, m(0.05)).unwrap();
        let h = headloss_weir_rect(q, w).unwrap();
        let q_back = flow_weir_rect(h, w).unwrap();
        assert!(
            (q_back.value - q.value).abs() / q.value < 1e-12,
            "round trip at {q_lps} L/s"
        );
    }
}

#[test]
fn channel_width_solver_runs_on_computed_viscosity() {
    let nu = viscosity_kinematic_water(t20()).unwrap();
    let w = horiz_chan_w(
        lps(20.0),
        m(0.5),
        m(0.0039087750000000015),
        m(4.8672),
        nu,
        Material::Concrete.roughness(),
        true,
        0.0,
    )
    .unwrap();
    assert!((w.value - 0.181123956547638).abs() < 1e-9);
}

#[test]
fn reynolds_number_of_a_sized_pipe_is_turbulent() {
    let nu = viscosity_kinematic_water(t20()).unwrap();
    let d = diam_circle(af_hydraulics::area_orifice(m(0.2), 0.63, lps(20.0)).unwrap()).unwrap();
    let re = re_pipe(lps(20.0), d, nu).unwrap();
    assert!(re > af_hydraulics::RE_TRANSITION, "Re {re} should be turbulent");
}
