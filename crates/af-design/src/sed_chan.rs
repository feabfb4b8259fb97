//! Inlet/outlet channel pair serving a bank of sedimentation tanks.
//!
//! The inlet channel distributes plant flow across the tank manifolds and
//! carries a stepped sloped floor; the outlet channel collects tank effluent
//! over a weir and hands it to a battery of exit pipes. Widths and depths
//! come from governing-maximum pairs: a plumbing-clearance bound and a
//! head-loss bound are evaluated independently and the larger wins.

use serde::{Deserialize, Serialize};

use af_catalog::{Material, fitting_od, id_sdr, kminor};
use af_core::numeric::round_sig_figs;
use af_core::units::{
    Flow, KinVisc, Length, Temperature, celsius, cm, inch, lps, m, m3ps, mm,
};
use af_hydraulics::{
    diam_pipe, flow_pipe, headloss_weir_rect, horiz_chan_h, horiz_chan_w, pipe_id,
    viscosity_kinematic_water,
};

use crate::error::{DesignError, DesignResult};
use crate::memo::Memo;
use crate::pipe::SelectedPipe;

/// Flow uniformity ratio across the tank bank; the channel may only spend
/// the share of the manifold head loss that non-uniformity frees up.
const SED_TANK_Q_RATIO: f64 = 0.95;
/// Estimated water depth of a sedimentation tank.
const TANK_DEPTH_EST_M: f64 = 2.0;
const FREEBOARD_M: f64 = 0.05;
const WEIR_FREEBOARD_M: f64 = 0.02;
/// Tallest step the sloped inlet floor may use.
const STEP_H_MAX_M: f64 = 0.30;
/// Outlet pipes run entrance, exit, and a tee branch.
const OUTLET_PIPE_K_MINOR: f64 = kminor::ENTRANCE + kminor::EXIT + kminor::TEE_BRANCH;

/// Inputs for [`SedimentationChannel`]; override a few fields with struct
/// update syntax and leave the rest at their defaults.
#[derive(Debug, Clone, Copy)]
pub struct SedimentationChannelParams {
    /// Plant flow.
    pub q: Flow,
    /// Design water temperature.
    pub temp: Temperature,
    /// Number of sedimentation tanks in the bank.
    pub sed_tank_n: u32,
    /// Inner width of one tank.
    pub sed_tank_w_inner: Length,
    /// Wall thickness between tanks.
    pub sed_tank_wall_thickness: Length,
    /// Nominal size of a tank inlet manifold.
    pub sed_tank_inlet_man_nd: Length,
    /// Nominal size of a tank outlet manifold.
    pub sed_tank_outlet_man_nd: Length,
    /// Head loss through a tank outlet manifold.
    pub sed_tank_outlet_man_hl: Length,
    /// Head loss through a tank inlet diffuser.
    pub sed_tank_diffuser_hl: Length,
    /// Channel wall thickness.
    pub wall_thickness: Length,
    /// Weir wall thickness.
    pub weir_thickness: Length,
    /// Narrowest channel a mason can form.
    pub w_min: Length,
    /// Clearance kept around pipe fittings.
    pub fitting_s: Length,
    /// Deepest allowed inlet channel.
    pub inlet_depth_max: Length,
    /// Drop from the outlet manifold to the bottom of its drain.
    pub outlet_man_bod_hl: Length,
    pub outlet_pipe_sdr: f64,
    /// Head loss budget for one outlet pipe.
    pub outlet_pipe_hl_max: Length,
    /// Largest outlet pipe worth stocking.
    pub outlet_pipe_nd_max: Length,
    pub drain_sdr: f64,
}

impl Default for SedimentationChannelParams {
    fn default() -> Self {
        Self {
            q: lps(20.0),
            temp: celsius(20.0),
            sed_tank_n: 4,
            sed_tank_w_inner: inch(42.0),
            sed_tank_wall_thickness: cm(15.0),
            sed_tank_inlet_man_nd: cm(60.0),
            sed_tank_outlet_man_nd: cm(60.0),
            sed_tank_outlet_man_hl: cm(4.0),
            sed_tank_diffuser_hl: mm(0.09),
            wall_thickness: cm(15.0),
            weir_thickness: cm(15.0),
            w_min: cm(30.0),
            fitting_s: cm(15.0),
            inlet_depth_max: cm(50.0),
            outlet_man_bod_hl: cm(15.0),
            outlet_pipe_sdr: 26.0,
            outlet_pipe_hl_max: cm(4.0),
            outlet_pipe_nd_max: inch(6.0),
            drain_sdr: 26.0,
        }
    }
}

#[derive(Debug, Default)]
struct Cache {
    nu: Memo<KinVisc>,
    l: Memo<Length>,
    inlet_weir_hl: Memo<Length>,
    outlet_weir_hl: Memo<Length>,
    inlet_hl_max: Memo<Length>,
    inlet_w_pre_weir_plumbing_min: Memo<Length>,
    inlet_w_pre_weir_hl_min: Memo<Length>,
    inlet_w_pre_weir: Memo<Length>,
    inlet_depth_plumbing_min: Memo<Length>,
    inlet_depth_hl: Memo<Length>,
    inlet_depth: Memo<Length>,
    inlet_h: Memo<Length>,
    inlet_weir_h: Memo<Length>,
    inlet_w_post_weir: Memo<Length>,
    inlet_w: Memo<Length>,
    drain_pipe: Memo<SelectedPipe>,
    inlet_drain_box_w: Memo<Length>,
    outlet_depth: Memo<Length>,
    outlet_weir_depth: Memo<Length>,
    outlet_weir_h: Memo<Length>,
    outlet_w_pre_weir: Memo<Length>,
    outlet_pipe_l: Memo<Length>,
    outlet_pipe_q_max: Memo<Flow>,
    outlet_pipe_n: Memo<u32>,
    outlet_pipe_q: Memo<Flow>,
    outlet_pipe: Memo<SelectedPipe>,
    outlet_post_weir_w: Memo<Length>,
    outlet_drain_box_w: Memo<Length>,
    outlet_w: Memo<Length>,
    w_outer: Memo<Length>,
    inlet_last_coupling_h: Memo<Length>,
    inlet_step_n: Memo<u32>,
    inlet_step_h: Memo<Length>,
    inlet_slope_l: Memo<Length>,
}

/// The inlet/outlet channel pair, dimensioned lazily from its parameters.
#[derive(Debug)]
pub struct SedimentationChannel {
    params: SedimentationChannelParams,
    cache: Cache,
}

impl SedimentationChannel {
    pub fn new(params: SedimentationChannelParams) -> Self {
        Self {
            params,
            cache: Cache::default(),
        }
    }

    pub fn params(&self) -> &SedimentationChannelParams {
        &self.params
    }

    fn nu(&self) -> DesignResult<KinVisc> {
        self.cache
            .nu
            .get_or_compute(|| Ok(viscosity_kinematic_water(self.params.temp)?))
    }

    /// Channel length, spanning the whole tank bank plus one end wall.
    pub fn l(&self) -> DesignResult<Length> {
        self.cache.l.get_or_compute(|| {
            let p = &self.params;
            let n = p.sed_tank_n as f64;
            Ok(p.sed_tank_w_inner * n + p.sed_tank_wall_thickness * (n - 1.0) + p.wall_thickness)
        })
    }

    /// Head over the inlet channel weir at plant flow.
    pub fn inlet_weir_hl(&self) -> DesignResult<Length> {
        self.cache
            .inlet_weir_hl
            .get_or_compute(|| Ok(headloss_weir_rect(self.params.q, self.l()?)?))
    }

    /// Head over the outlet channel weir at plant flow.
    pub fn outlet_weir_hl(&self) -> DesignResult<Length> {
        self.cache
            .outlet_weir_hl
            .get_or_compute(|| Ok(headloss_weir_rect(self.params.q, self.l()?)?))
    }

    /// Head loss the inlet channel itself may consume without upsetting
    /// flow division between tanks.
    pub fn inlet_hl_max(&self) -> DesignResult<Length> {
        self.cache.inlet_hl_max.get_or_compute(|| {
            let p = &self.params;
            let man_path = p.sed_tank_outlet_man_hl + p.sed_tank_diffuser_hl;
            Ok(man_path * (1.0 - SED_TANK_Q_RATIO * SED_TANK_Q_RATIO))
        })
    }

    /// Pre-weir inlet width needed to clear the inlet manifold fitting.
    pub fn inlet_w_pre_weir_plumbing_min(&self) -> DesignResult<Length> {
        self.cache.inlet_w_pre_weir_plumbing_min.get_or_compute(|| {
            let p = &self.params;
            Ok(fitting_od(p.sed_tank_inlet_man_nd)? + p.fitting_s * 2.0)
        })
    }

    /// Pre-weir inlet width needed to stay inside the head-loss budget at
    /// the deepest allowed channel.
    pub fn inlet_w_pre_weir_hl_min(&self) -> DesignResult<Length> {
        self.cache.inlet_w_pre_weir_hl_min.get_or_compute(|| {
            let p = &self.params;
            Ok(horiz_chan_w(
                p.q,
                p.inlet_depth_max,
                self.inlet_hl_max()?,
                self.l()?,
                self.nu()?,
                Material::Concrete.roughness(),
                true,
                0.0,
            )?)
        })
    }

    /// Pre-weir inlet width; the larger of the two bounds governs.
    pub fn inlet_w_pre_weir(&self) -> DesignResult<Length> {
        self.cache.inlet_w_pre_weir.get_or_compute(|| {
            let plumbing = self.inlet_w_pre_weir_plumbing_min()?;
            let hydraulic = self.inlet_w_pre_weir_hl_min()?;
            Ok(m(plumbing.value.max(hydraulic.value)))
        })
    }

    /// Inlet depth needed to stack the outlet manifold plumbing below the
    /// weir crest.
    pub fn inlet_depth_plumbing_min(&self) -> DesignResult<Length> {
        self.cache.inlet_depth_plumbing_min.get_or_compute(|| {
            let p = &self.params;
            Ok(p.outlet_man_bod_hl
                + fitting_od(p.sed_tank_outlet_man_nd)?
                + p.sed_tank_outlet_man_hl
                + p.sed_tank_diffuser_hl
                + self.outlet_weir_hl()?)
        })
    }

    /// Inlet depth that spends exactly the head-loss budget at the chosen
    /// pre-weir width.
    pub fn inlet_depth_hl(&self) -> DesignResult<Length> {
        self.cache.inlet_depth_hl.get_or_compute(|| {
            let p = &self.params;
            Ok(horiz_chan_h(
                p.q,
                self.inlet_w_pre_weir()?,
                self.inlet_hl_max()?,
                self.l()?,
                self.nu()?,
                Material::Concrete.roughness(),
                true,
            )?)
        })
    }

    /// Inlet channel water depth; the larger bound governs.
    pub fn inlet_depth(&self) -> DesignResult<Length> {
        self.cache.inlet_depth.get_or_compute(|| {
            let plumbing = self.inlet_depth_plumbing_min()?;
            let hydraulic = self.inlet_depth_hl()?;
            Ok(m(plumbing.value.max(hydraulic.value)))
        })
    }

    /// Inlet channel wall height including freeboard.
    pub fn inlet_h(&self) -> DesignResult<Length> {
        self.cache
            .inlet_h
            .get_or_compute(|| Ok(self.inlet_depth()? + m(FREEBOARD_M)))
    }

    /// Inlet weir crest height above the channel floor.
    pub fn inlet_weir_h(&self) -> DesignResult<Length> {
        self.cache
            .inlet_weir_h
            .get_or_compute(|| Ok(self.inlet_depth()? + m(WEIR_FREEBOARD_M)))
    }

    /// Width of the inlet channel segment after the weir, which feeds the
    /// tank manifolds and pays one exit loss.
    pub fn inlet_w_post_weir(&self) -> DesignResult<Length> {
        self.cache.inlet_w_post_weir.get_or_compute(|| {
            let p = &self.params;
            let solved = horiz_chan_w(
                p.q,
                self.inlet_depth()?,
                self.inlet_hl_max()?,
                self.l()?,
                self.nu()?,
                Material::Concrete.roughness(),
                true,
                kminor::EXIT,
            )?;
            Ok(m(p.w_min.value.max(solved.value)))
        })
    }

    /// Total inlet channel width across both segments and the weir wall.
    pub fn inlet_w(&self) -> DesignResult<Length> {
        self.cache.inlet_w.get_or_compute(|| {
            Ok(self.inlet_w_pre_weir()? + self.params.weir_thickness + self.inlet_w_post_weir()?)
        })
    }

    /// Channel drain, sized to pass plant flow under the standing head of a
    /// full tank plus the inlet channel.
    pub fn drain_pipe(&self) -> DesignResult<SelectedPipe> {
        self.cache.drain_pipe.get_or_compute(|| {
            let p = &self.params;
            let head = m(TANK_DEPTH_EST_M) + self.inlet_depth()?;
            let id_req = pipe_id(p.q, head)?;
            Ok(SelectedPipe::stocked(id_req, p.drain_sdr)?)
        })
    }

    pub fn drain_nd(&self) -> DesignResult<Length> {
        Ok(self.drain_pipe()?.nd)
    }

    /// Width of the box housing the inlet channel drain.
    pub fn inlet_drain_box_w(&self) -> DesignResult<Length> {
        self.cache.inlet_drain_box_w.get_or_compute(|| {
            let p = &self.params;
            let fitted = fitting_od(self.drain_nd()?)? + p.fitting_s * 2.0;
            Ok(m(p.w_min.value.max(fitted.value)))
        })
    }

    /// Outlet channel water depth, below the inlet by the manifold path loss.
    pub fn outlet_depth(&self) -> DesignResult<Length> {
        self.cache.outlet_depth.get_or_compute(|| {
            let p = &self.params;
            Ok(self.inlet_depth()? - p.sed_tank_outlet_man_hl - p.sed_tank_diffuser_hl)
        })
    }

    /// Water depth over the outlet weir apron.
    pub fn outlet_weir_depth(&self) -> DesignResult<Length> {
        self.cache.outlet_weir_depth.get_or_compute(|| {
            Ok(self.outlet_depth()? - m(FREEBOARD_M) - m(WEIR_FREEBOARD_M))
        })
    }

    /// Outlet weir crest height above the channel floor.
    pub fn outlet_weir_h(&self) -> DesignResult<Length> {
        self.cache
            .outlet_weir_h
            .get_or_compute(|| Ok(self.outlet_weir_depth()? + m(WEIR_FREEBOARD_M)))
    }

    /// Pre-weir outlet width sized against the manifold head loss.
    pub fn outlet_w_pre_weir(&self) -> DesignResult<Length> {
        self.cache.outlet_w_pre_weir.get_or_compute(|| {
            let p = &self.params;
            let solved = horiz_chan_w(
                p.q,
                self.outlet_depth()?,
                p.sed_tank_outlet_man_hl,
                self.l()?,
                self.nu()?,
                Material::Concrete.roughness(),
                true,
                0.0,
            )?;
            Ok(m(p.w_min.value.max(solved.value)))
        })
    }

    /// Length of one outlet pipe, dropping a tank depth and crossing the
    /// inlet channel.
    pub fn outlet_pipe_l(&self) -> DesignResult<Length> {
        self.cache.outlet_pipe_l.get_or_compute(|| {
            Ok(m(TANK_DEPTH_EST_M)
                + self.inlet_w()?
                + self.params.weir_thickness
                + m(FREEBOARD_M))
        })
    }

    /// Capacity of the largest allowed outlet pipe, rounded to 5 significant
    /// figures in L/s so the pipe count is stable across platforms.
    pub fn outlet_pipe_q_max(&self) -> DesignResult<Flow> {
        self.cache.outlet_pipe_q_max.get_or_compute(|| {
            let p = &self.params;
            let id_max = id_sdr(p.outlet_pipe_nd_max, p.outlet_pipe_sdr);
            let q = flow_pipe(
                id_max,
                p.outlet_pipe_hl_max,
                self.outlet_pipe_l()?,
                self.nu()?,
                Material::Pvc.roughness(),
                OUTLET_PIPE_K_MINOR,
            )?;
            Ok(m3ps(round_sig_figs(q.value * 1000.0, 5) / 1000.0))
        })
    }

    /// Number of outlet pipes needed to carry plant flow.
    pub fn outlet_pipe_n(&self) -> DesignResult<u32> {
        self.cache.outlet_pipe_n.get_or_compute(|| {
            let q_max = self.outlet_pipe_q_max()?;
            Ok((self.params.q.value / q_max.value).ceil() as u32)
        })
    }

    /// Flow through one outlet pipe.
    pub fn outlet_pipe_q(&self) -> DesignResult<Flow> {
        self.cache
            .outlet_pipe_q
            .get_or_compute(|| Ok(self.params.q / self.outlet_pipe_n()? as f64))
    }

    /// Selected outlet pipe size.
    pub fn outlet_pipe(&self) -> DesignResult<SelectedPipe> {
        self.cache.outlet_pipe.get_or_compute(|| {
            let p = &self.params;
            let id_req = diam_pipe(
                self.outlet_pipe_q()?,
                p.outlet_pipe_hl_max,
                self.outlet_pipe_l()?,
                self.nu()?,
                Material::Pvc.roughness(),
                OUTLET_PIPE_K_MINOR,
            )?;
            Ok(SelectedPipe::stocked(id_req, p.outlet_pipe_sdr)?)
        })
    }

    pub fn outlet_pipe_nd(&self) -> DesignResult<Length> {
        Ok(self.outlet_pipe()?.nd)
    }

    /// Width of the outlet channel segment past the weir, housing the
    /// outlet pipe couplings.
    pub fn outlet_post_weir_w(&self) -> DesignResult<Length> {
        self.cache.outlet_post_weir_w.get_or_compute(|| {
            let p = &self.params;
            let fitted = fitting_od(self.outlet_pipe_nd()?)? + p.fitting_s;
            Ok(m(p.w_min.value.max(fitted.value)))
        })
    }

    /// Width of the box housing the outlet channel drain.
    pub fn outlet_drain_box_w(&self) -> DesignResult<Length> {
        self.cache.outlet_drain_box_w.get_or_compute(|| {
            let fitted = fitting_od(self.drain_nd()?)? + self.params.fitting_s;
            Ok(m(self.outlet_post_weir_w()?.value.max(fitted.value)))
        })
    }

    /// Total outlet channel width.
    pub fn outlet_w(&self) -> DesignResult<Length> {
        self.cache.outlet_w.get_or_compute(|| {
            Ok(self.outlet_w_pre_weir()? + self.params.weir_thickness + self.outlet_post_weir_w()?)
        })
    }

    /// Outer width of the whole channel assembly, walls included.
    pub fn w_outer(&self) -> DesignResult<Length> {
        self.cache.w_outer.get_or_compute(|| {
            Ok(self.inlet_w()? + self.outlet_w()? + self.params.wall_thickness * 3.0)
        })
    }

    /// Height of the last inlet manifold coupling above the channel floor.
    pub fn inlet_last_coupling_h(&self) -> DesignResult<Length> {
        self.cache
            .inlet_last_coupling_h
            .get_or_compute(|| Ok(self.outlet_weir_depth()? - m(WEIR_FREEBOARD_M)))
    }

    /// Number of steps in the sloped inlet floor.
    pub fn inlet_step_n(&self) -> DesignResult<u32> {
        self.cache.inlet_step_n.get_or_compute(|| {
            let drop = self.inlet_last_coupling_h()?;
            if drop.value <= 0.0 {
                return Err(DesignError::Unimplemented {
                    component: "SedimentationChannel",
                    attribute: "inlet_step_n",
                });
            }
            Ok((drop.value / STEP_H_MAX_M).ceil() as u32)
        })
    }

    /// Height of one step of the sloped inlet floor.
    pub fn inlet_step_h(&self) -> DesignResult<Length> {
        self.cache
            .inlet_step_h
            .get_or_compute(|| Ok(self.inlet_last_coupling_h()? / self.inlet_step_n()? as f64))
    }

    /// Length of the sloped section of the inlet floor.
    pub fn inlet_slope_l(&self) -> DesignResult<Length> {
        self.cache.inlet_slope_l.get_or_compute(|| {
            Ok(self.l()? - fitting_od(self.params.sed_tank_inlet_man_nd)?)
        })
    }

    /// Renders the finished design; every value is read from the memoized
    /// attributes.
    pub fn report(&self) -> DesignResult<SedimentationChannelReport> {
        Ok(SedimentationChannelReport {
            l_m: self.l()?.value,
            inlet_w_m: self.inlet_w()?.value,
            inlet_depth_m: self.inlet_depth()?.value,
            inlet_h_m: self.inlet_h()?.value,
            inlet_weir_h_m: self.inlet_weir_h()?.value,
            inlet_drain_box_w_m: self.inlet_drain_box_w()?.value,
            inlet_step_n: self.inlet_step_n()?,
            inlet_step_h_m: self.inlet_step_h()?.value,
            inlet_slope_l_m: self.inlet_slope_l()?.value,
            outlet_w_m: self.outlet_w()?.value,
            outlet_depth_m: self.outlet_depth()?.value,
            outlet_weir_h_m: self.outlet_weir_h()?.value,
            outlet_drain_box_w_m: self.outlet_drain_box_w()?.value,
            outlet_pipe_n: self.outlet_pipe_n()?,
            outlet_pipe_nd_in: self.outlet_pipe_nd()?.get::<uom::si::length::inch>(),
            outlet_pipe_q_max_lps: self
                .outlet_pipe_q_max()?
                .get::<uom::si::volume_rate::liter_per_second>(),
            drain_nd_in: self.drain_nd()?.get::<uom::si::length::inch>(),
            w_outer_m: self.w_outer()?.value,
        })
    }
}

/// Finished channel dimensions in fixed units, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SedimentationChannelReport {
    pub l_m: f64,
    pub inlet_w_m: f64,
    pub inlet_depth_m: f64,
    pub inlet_h_m: f64,
    pub inlet_weir_h_m: f64,
    pub inlet_drain_box_w_m: f64,
    pub inlet_step_n: u32,
    pub inlet_step_h_m: f64,
    pub inlet_slope_l_m: f64,
    pub outlet_w_m: f64,
    pub outlet_depth_m: f64,
    pub outlet_weir_h_m: f64,
    pub outlet_drain_box_w_m: f64,
    pub outlet_pipe_n: u32,
    pub outlet_pipe_nd_in: f64,
    pub outlet_pipe_q_max_lps: f64,
    pub drain_nd_in: f64,
    pub w_outer_m: f64,
}
