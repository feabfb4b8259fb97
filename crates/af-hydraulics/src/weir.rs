//! Sharp-crested rectangular weirs.
//!
//! The three relations are one rating equation solved for width, head and
//! flow, all sharing the orifice vena contracta ratio as the discharge
//! coefficient.

use af_core::units::constants::G0_MPS2;
use af_core::units::{m, m3ps, Flow, Length};

use crate::compat::warn_deprecated_name;
use crate::error::HydResult;
use crate::orifice::RATIO_VC_ORIFICE;
use crate::validation::require_positive;

/// Crest width needed to pass `flow` at `height` of head over the weir.
pub fn width_weir_rect(flow: Flow, height: Length) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let h = require_positive(height.value, "head over the weir")?;
    let w = 3.0 * q / (2.0 * RATIO_VC_ORIFICE * (2.0 * G0_MPS2).sqrt() * h.powf(1.5));
    Ok(m(w))
}

/// Head over the weir when `flow` passes a crest of the given width.
pub fn headloss_weir_rect(flow: Flow, width: Length) -> HydResult<Length> {
    let q = require_positive(flow.value, "flow")?;
    let w = require_positive(width.value, "weir width")?;
    let h = (3.0 * q / (2.0 * RATIO_VC_ORIFICE * (2.0 * G0_MPS2).sqrt() * w)).powf(2.0 / 3.0);
    Ok(m(h))
}

/// Flow over a rectangular weir at `height` of head.
pub fn flow_weir_rect(height: Length, width: Length) -> HydResult<Flow> {
    let h = require_positive(height.value, "head over the weir")?;
    let w = require_positive(width.value, "weir width")?;
    let q = (2.0 / 3.0) * RATIO_VC_ORIFICE * (2.0 * G0_MPS2).sqrt() * w * h.powf(1.5);
    Ok(m3ps(q))
}

/// Former name of [`width_weir_rect`].
#[deprecated(note = "use width_weir_rect")]
pub fn width_rect_weir(flow: Flow, height: Length) -> HydResult<Length> {
    warn_deprecated_name("width_rect_weir", "width_weir_rect");
    width_weir_rect(flow, height)
}

/// Former name of [`headloss_weir_rect`].
#[deprecated(note = "use headloss_weir_rect")]
pub fn headloss_weir(flow: Flow, width: Length) -> HydResult<Length> {
    warn_deprecated_name("headloss_weir", "headloss_weir_rect");
    headloss_weir_rect(flow, width)
}

/// Former name of [`flow_weir_rect`].
#[deprecated(note = "use flow_weir_rect")]
pub fn flow_rect_weir(height: Length, width: Length) -> HydResult<Flow> {
    warn_deprecated_name("flow_rect_weir", "flow_weir_rect");
    flow_weir_rect(height, width)
}
