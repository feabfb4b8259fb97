//! af-hydraulics: the aquaflow formula library.
//!
//! Deterministic, side-effect-free hydraulic relations over `uom` quantities:
//! - water properties (density fit, viscosity correlation, ideal gas)
//! - conduit geometry and hydraulic radii
//! - Reynolds numbers and Darcy friction factors
//! - major/minor head losses for pipes, rectangular sections and channels
//! - orifice and rectangular-weir ratings
//! - pipe capacity and sizing solvers (Hagen-Poiseuille / Swamee-Jain)
//! - porous-media (Ergun) relations
//! - horizontal-channel width/depth solvers
//!
//! Failures are explicit [`HydraulicsError`] values classified by
//! [`HydraulicsError::kind`]; renamed formulas keep compatibility entry
//! points in [`compat`] that warn through `tracing` instead of breaking old
//! call sites.
//!
//! # Example
//!
//! ```
//! use af_core::units::{lps, m, m2ps, mm};
//! use af_hydraulics::headloss_pipe;
//!
//! // 20 L/s through 12 m of 15 cm PVC with three fittings
//! let hl = headloss_pipe(lps(20.0), m(0.15), m(12.0), m2ps(1.0e-6), mm(0.12), 3.3).unwrap();
//! assert!(hl.value > 0.0);
//! ```

pub mod channel;
pub mod compat;
pub mod error;
pub mod friction;
pub mod geometry;
pub mod headloss;
pub mod orifice;
pub mod pipeflow;
pub mod porous;
pub mod reynolds;
mod validation;
pub mod water;
pub mod weir;

// Re-exports for ergonomics
pub use channel::{height_water_critical, horiz_chan_h, horiz_chan_w, pipe_id, vel_horizontal};
pub use compat::{
    density_water_compat, flow_hagen_compat, flow_pipe_compat, flow_swamee_compat,
    fric_rect_compat, headloss_manifold_compat, DensityWaterArgs, MajorFlowArgs, ManifoldArgs,
    RectChannelArgs,
};
pub use error::{FailureKind, HydResult, HydraulicsError};
pub use friction::{fric_channel, fric_pipe, fric_rect, RE_TRANSITION};
pub use geometry::{area_circle, diam_circle, radius_hydraulic_channel, radius_hydraulic_rect};
pub use headloss::{
    headloss_channel, headloss_major_channel, headloss_major_pipe, headloss_major_rect,
    headloss_manifold, headloss_minor_channel, headloss_minor_elbow, headloss_minor_pipe,
    headloss_minor_rect, headloss_pipe, headloss_rect,
};
pub use orifice::{
    area_orifice, flow_orifice, flow_orifice_vert, head_orifice, num_orifices, RATIO_VC_ORIFICE,
};
pub use pipeflow::{
    diam_hagen, diam_major_pipe, diam_minor_pipe, diam_pipe, diam_swamee, flow_hagen,
    flow_major_pipe, flow_minor_pipe, flow_pipe, flow_swamee, flow_transition,
};
pub use porous::{fric_ergun, g_cs_ergun, headloss_ergun, re_ergun};
pub use reynolds::{re_channel, re_pipe, re_rect};
pub use water::{density_gas, density_water, viscosity_dynamic_water, viscosity_kinematic_water};
pub use weir::{flow_weir_rect, headloss_weir_rect, width_weir_rect};
