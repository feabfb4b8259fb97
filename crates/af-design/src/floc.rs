//! Vertical-baffle hydraulic flocculator dimensioning.
//!
//! The flocculator is a serpentine of baffled concrete channels downstream
//! of the entrance tank. Sizing starts from the collision potential Gθ and
//! the head-loss budget, which fix the average velocity gradient and the
//! active volume; geometry then follows from the footprint limits.

use serde::{Deserialize, Serialize};

use af_core::numeric::ceil_step;
use af_core::units::constants::G0_MPS2;
use af_core::units::{
    Flow, Frequency, KinVisc, Length, Temperature, Time, Volume, celsius, cm, hz, inch, lps, m,
    m3, s,
};
use af_hydraulics::viscosity_kinematic_water;

use crate::error::DesignResult;
use crate::memo::Memo;
use crate::pipe::{DRAIN_K_MINOR, SelectedPipe, drain_id_req};

/// Minor loss coefficient of one baffle turn.
const BAFFLE_K: f64 = 2.5;
/// Channels fold in pairs around the end walls, so the count is even.
const CHAN_N_MIN: u32 = 2;
/// Bounds on the height-to-baffle-spacing ratio of an expansion.
const HS_RATIO_MIN: f64 = 3.0;
const HS_RATIO_MAX: f64 = 6.0;
const DRAIN_SDR: f64 = 41.0;

/// Inputs for [`Flocculator`].
#[derive(Debug, Clone, Copy)]
pub struct FlocculatorParams {
    /// Plant flow.
    pub q: Flow,
    /// Design water temperature.
    pub temp: Temperature,
    /// Length the entrance tank occupies at the head of the first channel.
    pub ent_l: Length,
    /// Widest channel the floor plan allows.
    pub chan_w_max: Length,
    /// Narrowest channel a mason can form.
    pub chan_w_min: Length,
    /// Longest channel the floor plan allows.
    pub l_max: Length,
    /// Target collision potential Gθ.
    pub gt: f64,
    /// Head-loss budget across the whole flocculator.
    pub hl: Length,
    /// Water depth at the flocculator outlet.
    pub end_water_depth: Length,
    /// Time allowed to empty the unit through its drain.
    pub drain_t: Time,
}

impl Default for FlocculatorParams {
    fn default() -> Self {
        Self {
            q: lps(20.0),
            temp: celsius(20.0),
            ent_l: m(1.5),
            chan_w_max: inch(42.0),
            chan_w_min: cm(30.0),
            l_max: m(6.0),
            gt: 37_000.0,
            hl: cm(40.0),
            end_water_depth: m(2.0),
            drain_t: s(30.0 * 60.0),
        }
    }
}

#[derive(Debug, Default)]
struct Cache {
    nu: Memo<KinVisc>,
    vel_grad_avg: Memo<Frequency>,
    retention_time: Memo<Time>,
    vol: Memo<Volume>,
    chan_n: Memo<u32>,
    chan_w_min_gt: Memo<Length>,
    chan_w_min_hs_ratio: Memo<Length>,
    chan_w: Memo<Length>,
    chan_l: Memo<Length>,
    baffle_s: Memo<Length>,
    expansion_h_max: Memo<Length>,
    expansion_n: Memo<u32>,
    expansion_h: Memo<Length>,
    obstacle_n: Memo<u32>,
    drain_pipe: Memo<SelectedPipe>,
}

/// A baffled flocculator, dimensioned lazily from its parameters.
#[derive(Debug)]
pub struct Flocculator {
    params: FlocculatorParams,
    cache: Cache,
}

impl Flocculator {
    pub fn new(params: FlocculatorParams) -> Self {
        Self {
            params,
            cache: Cache::default(),
        }
    }

    pub fn params(&self) -> &FlocculatorParams {
        &self.params
    }

    fn nu(&self) -> DesignResult<KinVisc> {
        self.cache
            .nu
            .get_or_compute(|| Ok(viscosity_kinematic_water(self.params.temp)?))
    }

    /// Average velocity gradient `G` implied by spending the head-loss
    /// budget over the target Gθ.
    pub fn vel_grad_avg(&self) -> DesignResult<Frequency> {
        self.cache.vel_grad_avg.get_or_compute(|| {
            let p = &self.params;
            Ok(hz(G0_MPS2 * p.hl.value / (self.nu()?.value * p.gt)))
        })
    }

    /// Hydraulic retention time θ.
    pub fn retention_time(&self) -> DesignResult<Time> {
        self.cache
            .retention_time
            .get_or_compute(|| Ok(s(self.params.gt / self.vel_grad_avg()?.value)))
    }

    /// Active flocculation volume.
    pub fn vol(&self) -> DesignResult<Volume> {
        self.cache
            .vol
            .get_or_compute(|| Ok(m3(self.params.q.value * self.retention_time()?.value)))
    }

    /// Channel count: enough channels of the maximum length to hold the
    /// volume (plus the entrance tank), rounded up to an even number.
    pub fn chan_n(&self) -> DesignResult<u32> {
        self.cache.chan_n.get_or_compute(|| {
            let p = &self.params;
            let needed = self.vol()?.value / (p.end_water_depth.value * p.chan_w_max.value);
            let raw = (needed + p.ent_l.value) / p.l_max.value;
            let mut n = raw.ceil() as u32;
            if n % 2 == 1 {
                n += 1;
            }
            Ok(n.max(CHAN_N_MIN))
        })
    }

    /// Width lower bound from fitting the volume into the chosen channel
    /// count at maximum length.
    pub fn chan_w_min_gt(&self) -> DesignResult<Length> {
        self.cache.chan_w_min_gt.get_or_compute(|| {
            let p = &self.params;
            let usable_l = self.chan_n()? as f64 * p.l_max.value - p.ent_l.value;
            Ok(m(self.vol()?.value / (p.end_water_depth.value * usable_l)))
        })
    }

    /// Factor `(K/(2·H·ν·G²))^(1/3)` shared by the spacing relations.
    fn baffle_s_factor(&self) -> DesignResult<f64> {
        let p = &self.params;
        let g = self.vel_grad_avg()?.value;
        Ok(
            (BAFFLE_K / (2.0 * p.end_water_depth.value * self.nu()?.value * (g * g)))
                .powf(1.0 / 3.0),
        )
    }

    /// Width lower bound that keeps the expansion H/S ratio above its
    /// minimum.
    pub fn chan_w_min_hs_ratio(&self) -> DesignResult<Length> {
        self.cache.chan_w_min_hs_ratio.get_or_compute(|| {
            let p = &self.params;
            Ok(m(
                HS_RATIO_MIN * p.q.value / p.end_water_depth.value * self.baffle_s_factor()?
            ))
        })
    }

    /// Channel width: the governing maximum of both lower bounds and the
    /// configured minimum, rounded up to whole centimeters.
    pub fn chan_w(&self) -> DesignResult<Length> {
        self.cache.chan_w.get_or_compute(|| {
            let p = &self.params;
            let governing = self
                .chan_w_min_gt()?
                .value
                .max(self.chan_w_min_hs_ratio()?.value)
                .max(p.chan_w_min.value);
            Ok(m(ceil_step(governing, 0.01)))
        })
    }

    /// Channel length that holds the volume at the chosen width.
    pub fn chan_l(&self) -> DesignResult<Length> {
        self.cache.chan_l.get_or_compute(|| {
            let p = &self.params;
            let water_l = self.vol()?.value / (self.chan_w()?.value * p.end_water_depth.value);
            Ok(m((water_l + p.ent_l.value) / self.chan_n()? as f64))
        })
    }

    /// Space between baffles.
    pub fn baffle_s(&self) -> DesignResult<Length> {
        self.cache.baffle_s.get_or_compute(|| {
            Ok(m(
                self.baffle_s_factor()? * self.params.q.value / self.chan_w()?.value
            ))
        })
    }

    /// Tallest expansion that still dissipates enough energy at the
    /// maximum H/S ratio.
    pub fn expansion_h_max(&self) -> DesignResult<Length> {
        self.cache.expansion_h_max.get_or_compute(|| {
            let p = &self.params;
            let g = self.vel_grad_avg()?.value;
            let vel_term = p.q.value * HS_RATIO_MAX / self.chan_w()?.value;
            Ok(m((BAFFLE_K / (2.0 * self.nu()?.value * (g * g))
                * vel_term.powi(3))
            .powf(0.25)))
        })
    }

    /// Flow expansions per baffle space.
    pub fn expansion_n(&self) -> DesignResult<u32> {
        self.cache.expansion_n.get_or_compute(|| {
            let depth = self.params.end_water_depth.value;
            Ok((depth / self.expansion_h_max()?.value).ceil() as u32)
        })
    }

    /// Height of one expansion after dividing the depth evenly.
    pub fn expansion_h(&self) -> DesignResult<Length> {
        self.cache
            .expansion_h
            .get_or_compute(|| Ok(self.params.end_water_depth / self.expansion_n()? as f64))
    }

    /// Obstacles added per baffle space to force the extra expansions.
    pub fn obstacle_n(&self) -> DesignResult<u32> {
        self.cache
            .obstacle_n
            .get_or_compute(|| Ok(self.expansion_n()? - 1))
    }

    /// Drain sized to empty the whole serpentine in the configured time.
    /// Special-order sizes are acceptable for a valve that rarely moves.
    pub fn drain_pipe(&self) -> DesignResult<SelectedPipe> {
        self.cache.drain_pipe.get_or_compute(|| {
            let p = &self.params;
            let plan = self.chan_l()? * (self.chan_n()? as f64) * self.chan_w()?;
            let id_req = drain_id_req(plan, p.end_water_depth, DRAIN_K_MINOR, p.drain_t);
            Ok(SelectedPipe::any_row(id_req, DRAIN_SDR)?)
        })
    }

    pub fn drain_nd(&self) -> DesignResult<Length> {
        Ok(self.drain_pipe()?.nd)
    }

    /// Renders the finished design from the memoized attributes.
    pub fn report(&self) -> DesignResult<FlocculatorReport> {
        Ok(FlocculatorReport {
            vel_grad_avg_hz: self.vel_grad_avg()?.value,
            retention_time_s: self.retention_time()?.value,
            vol_m3: self.vol()?.value,
            chan_n: self.chan_n()?,
            chan_w_m: self.chan_w()?.value,
            chan_l_m: self.chan_l()?.value,
            baffle_s_m: self.baffle_s()?.value,
            expansion_h_m: self.expansion_h()?.value,
            obstacle_n: self.obstacle_n()?,
            drain_nd_in: self.drain_nd()?.get::<uom::si::length::inch>(),
        })
    }
}

/// Finished flocculator dimensions in fixed units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlocculatorReport {
    pub vel_grad_avg_hz: f64,
    pub retention_time_s: f64,
    pub vol_m3: f64,
    pub chan_n: u32,
    pub chan_w_m: f64,
    pub chan_l_m: f64,
    pub baffle_s_m: f64,
    pub expansion_h_m: f64,
    pub obstacle_n: u32,
    pub drain_nd_in: f64,
}
