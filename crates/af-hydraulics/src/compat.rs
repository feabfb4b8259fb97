//! Compatibility layer for renamed formulas and arguments.
//!
//! Several formulas changed their argument names across releases. Callers
//! migrating old call sites go through the `_compat` entry points, which
//! accept an args struct carrying both the current and the legacy name of
//! each renamed argument. Resolution rules: supplying both names of one
//! logical argument is a caller-contract failure; supplying only the legacy
//! name works but emits a warning; a required argument missing under both
//! names is a caller-contract failure distinct from any domain check.
//!
//! Known renamed pairs: `temperature`/`temp`, `roughness`/`pipe_rough`,
//! `open_channel`/`openchannel`, `headloss_major`/`headloss_fric`.

use af_core::units::{Density, Flow, KinVisc, Length, Temperature};
use tracing::warn;

use crate::error::{HydResult, HydraulicsError};
use crate::friction::fric_rect;
use crate::headloss::headloss_manifold;
use crate::pipeflow::{flow_hagen, flow_pipe, flow_swamee};
use crate::water::density_water;

pub(crate) fn warn_deprecated_name(formula: &'static str, successor: &'static str) {
    warn!(formula, successor, "deprecated formula name, forwarding");
}

fn warn_legacy_keyword(legacy: &'static str, current: &'static str) {
    warn!(legacy, current, "legacy argument name, forwarding");
}

fn resolve_pair<T>(
    current: Option<T>,
    legacy: Option<T>,
    current_name: &'static str,
    legacy_name: &'static str,
) -> HydResult<Option<T>> {
    match (current, legacy) {
        (Some(_), Some(_)) => Err(HydraulicsError::ArgConflict {
            current: current_name,
            legacy: legacy_name,
        }),
        (Some(v), None) => Ok(Some(v)),
        (None, Some(v)) => {
            warn_legacy_keyword(legacy_name, current_name);
            Ok(Some(v))
        }
        (None, None) => Ok(None),
    }
}

fn required<T>(value: Option<T>, name: &'static str) -> HydResult<T> {
    value.ok_or(HydraulicsError::ArgMissing { name })
}

/// Arguments of [`density_water_compat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DensityWaterArgs {
    pub temperature: Option<Temperature>,
    /// Legacy name of `temperature`.
    pub temp: Option<Temperature>,
}

impl DensityWaterArgs {
    pub fn resolve(self) -> HydResult<Temperature> {
        let t = resolve_pair(self.temperature, self.temp, "temperature", "temp")?;
        required(t, "temperature")
    }
}

/// [`density_water`] accepting the legacy `temp` argument name.
pub fn density_water_compat(args: DensityWaterArgs) -> HydResult<Density> {
    density_water(args.resolve()?)
}

/// Arguments of [`fric_rect_compat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RectChannelArgs {
    pub flow: Option<Flow>,
    pub width: Option<Length>,
    pub depth: Option<Length>,
    pub nu: Option<KinVisc>,
    pub roughness: Option<Length>,
    /// Legacy name of `roughness`.
    pub pipe_rough: Option<Length>,
    pub open_channel: Option<bool>,
    /// Legacy name of `open_channel`.
    pub openchannel: Option<bool>,
}

impl RectChannelArgs {
    #[allow(clippy::type_complexity)]
    pub fn resolve(self) -> HydResult<(Flow, Length, Length, KinVisc, Length, bool)> {
        let rough = resolve_pair(self.roughness, self.pipe_rough, "roughness", "pipe_rough")?;
        let open = resolve_pair(
            self.open_channel,
            self.openchannel,
            "open_channel",
            "openchannel",
        )?;
        Ok((
            required(self.flow, "flow")?,
            required(self.width, "width")?,
            required(self.depth, "depth")?,
            required(self.nu, "nu")?,
            required(rough, "roughness")?,
            required(open, "open_channel")?,
        ))
    }
}

/// [`fric_rect`] accepting the legacy `pipe_rough` and `openchannel`
/// argument names.
pub fn fric_rect_compat(args: RectChannelArgs) -> HydResult<f64> {
    let (flow, width, depth, nu, roughness, open_channel) = args.resolve()?;
    fric_rect(flow, width, depth, nu, roughness, open_channel)
}

/// Arguments of the pipe capacity `_compat` entry points.
///
/// `headloss_major`/`headloss_fric` name the head driving the pipe: the
/// friction head for the single-mechanism forms, the total available head
/// for the combined dispatcher (which splits it internally).
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorFlowArgs {
    pub diam: Option<Length>,
    pub headloss_major: Option<Length>,
    /// Legacy name of `headloss_major`.
    pub headloss_fric: Option<Length>,
    pub length: Option<Length>,
    pub nu: Option<KinVisc>,
    pub roughness: Option<Length>,
    /// Legacy name of `roughness`.
    pub pipe_rough: Option<Length>,
    pub k_minor: Option<f64>,
}

impl MajorFlowArgs {
    fn resolve_headloss(self) -> HydResult<Length> {
        let hl = resolve_pair(
            self.headloss_major,
            self.headloss_fric,
            "headloss_major",
            "headloss_fric",
        )?;
        required(hl, "headloss_major")
    }

    fn resolve_roughness(self) -> HydResult<Length> {
        let rough = resolve_pair(self.roughness, self.pipe_rough, "roughness", "pipe_rough")?;
        required(rough, "roughness")
    }

    pub fn resolve_hagen(self) -> HydResult<(Length, Length, Length, KinVisc)> {
        Ok((
            required(self.diam, "diam")?,
            self.resolve_headloss()?,
            required(self.length, "length")?,
            required(self.nu, "nu")?,
        ))
    }

    pub fn resolve_swamee(self) -> HydResult<(Length, Length, Length, KinVisc, Length)> {
        let (d, hl, l, nu) = self.resolve_hagen()?;
        Ok((d, hl, l, nu, self.resolve_roughness()?))
    }

    #[allow(clippy::type_complexity)]
    pub fn resolve_combined(self) -> HydResult<(Length, Length, Length, KinVisc, Length, f64)> {
        let (d, hl, l, nu, rough) = self.resolve_swamee()?;
        Ok((d, hl, l, nu, rough, required(self.k_minor, "k_minor")?))
    }
}

/// [`flow_hagen`] accepting the legacy `headloss_fric` argument name.
pub fn flow_hagen_compat(args: MajorFlowArgs) -> HydResult<Flow> {
    let (diam, headloss_major, length, nu) = args.resolve_hagen()?;
    flow_hagen(diam, headloss_major, length, nu)
}

/// [`flow_swamee`] accepting the legacy `headloss_fric` and `pipe_rough`
/// argument names.
pub fn flow_swamee_compat(args: MajorFlowArgs) -> HydResult<Flow> {
    let (diam, headloss_major, length, nu, roughness) = args.resolve_swamee()?;
    flow_swamee(diam, headloss_major, length, nu, roughness)
}

/// [`flow_pipe`] accepting the legacy `headloss_fric` and `pipe_rough`
/// argument names.
pub fn flow_pipe_compat(args: MajorFlowArgs) -> HydResult<Flow> {
    let (diam, headloss, length, nu, roughness, k_minor) = args.resolve_combined()?;
    flow_pipe(diam, headloss, length, nu, roughness, k_minor)
}

/// Arguments of [`headloss_manifold_compat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifoldArgs {
    pub flow: Option<Flow>,
    pub diam: Option<Length>,
    pub length: Option<Length>,
    pub nu: Option<KinVisc>,
    pub roughness: Option<Length>,
    /// Legacy name of `roughness`.
    pub pipe_rough: Option<Length>,
    pub k_minor: Option<f64>,
    pub n_outlets: Option<f64>,
}

impl ManifoldArgs {
    #[allow(clippy::type_complexity)]
    pub fn resolve(self) -> HydResult<(Flow, Length, Length, KinVisc, Length, f64, f64)> {
        let rough = resolve_pair(self.roughness, self.pipe_rough, "roughness", "pipe_rough")?;
        Ok((
            required(self.flow, "flow")?,
            required(self.diam, "diam")?,
            required(self.length, "length")?,
            required(self.nu, "nu")?,
            required(rough, "roughness")?,
            required(self.k_minor, "k_minor")?,
            required(self.n_outlets, "n_outlets")?,
        ))
    }
}

/// [`headloss_manifold`] accepting the legacy `pipe_rough` argument name.
pub fn headloss_manifold_compat(args: ManifoldArgs) -> HydResult<Length> {
    let (flow, diam, length, nu, roughness, k_minor, n_outlets) = args.resolve()?;
    headloss_manifold(flow, diam, length, nu, roughness, k_minor, n_outlets)
}
