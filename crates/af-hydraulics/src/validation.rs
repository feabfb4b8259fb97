//! Input validation helpers shared by the formula modules.
//!
//! Each helper takes the raw SI magnitude and the quantity's name so the
//! resulting error carries both. NaN fails every check.

use crate::error::{HydResult, HydraulicsError};

pub(crate) fn require_positive(value: f64, what: &'static str) -> HydResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(HydraulicsError::Domain {
            what,
            requirement: "strictly positive",
            value,
        })
    }
}

pub(crate) fn require_non_negative(value: f64, what: &'static str) -> HydResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(HydraulicsError::Domain {
            what,
            requirement: "non-negative",
            value,
        })
    }
}

/// Closed unit interval, for discharge coefficients.
pub(crate) fn require_in_unit_interval(value: f64, what: &'static str) -> HydResult<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(HydraulicsError::Domain {
            what,
            requirement: "within [0, 1]",
            value,
        })
    }
}

/// Open unit interval, for porosity: the bounds themselves are invalid.
pub(crate) fn require_inside_unit_interval(value: f64, what: &'static str) -> HydResult<f64> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(HydraulicsError::Domain {
            what,
            requirement: "strictly between 0 and 1",
            value,
        })
    }
}

/// Positive whole number supplied as a float (e.g. a manifold outlet count).
/// A fractional part is a caller-contract failure; zero or negative is a
/// domain failure.
pub(crate) fn require_whole_positive(value: f64, what: &'static str) -> HydResult<f64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(HydraulicsError::NotWhole { what, value });
    }
    require_positive(value, what)
}
