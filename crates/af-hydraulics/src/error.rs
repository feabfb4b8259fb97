//! Error types for the formula library.
//!
//! Three failure classes are kept distinct so callers (and tests) can assert
//! on the right one: physically invalid inputs, misuse of the calling
//! convention, and permanently retired formulas. [`HydraulicsError::kind`]
//! performs the classification.

use thiserror::Error;

pub type HydResult<T> = Result<T, HydraulicsError>;

/// Errors that can occur while evaluating a hydraulic formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydraulicsError {
    /// An input violates the formula's documented physical precondition.
    #[error("{what} must be {requirement}, got {value}")]
    Domain {
        what: &'static str,
        requirement: &'static str,
        value: f64,
    },

    /// An inverse relation degenerates to division by zero for this input.
    #[error("division by zero computing {what}")]
    DivisionByZero { what: &'static str },

    /// Both the current and the legacy name of one logical argument were
    /// supplied.
    #[error("conflicting arguments: both `{current}` and legacy `{legacy}` were supplied")]
    ArgConflict {
        current: &'static str,
        legacy: &'static str,
    },

    /// A required argument was supplied under neither its current nor its
    /// legacy name.
    #[error("missing required argument `{name}`")]
    ArgMissing { name: &'static str },

    /// A count parameter carried a fractional part.
    #[error("{what} must be a whole number, got {value}")]
    NotWhole { what: &'static str, value: f64 },

    /// The formula was removed and is kept only as a marker.
    #[error("`{name}` has been removed; use `{successor}`")]
    Retired {
        name: &'static str,
        successor: &'static str,
    },
}

/// Coarse classification of [`HydraulicsError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Physically invalid scenario.
    Domain,
    /// Misuse of the API surface.
    CallerContract,
    /// Call to a removed formula.
    Retired,
}

impl HydraulicsError {
    pub fn kind(&self) -> FailureKind {
        match self {
            HydraulicsError::Domain { .. } | HydraulicsError::DivisionByZero { .. } => {
                FailureKind::Domain
            }
            HydraulicsError::ArgConflict { .. }
            | HydraulicsError::ArgMissing { .. }
            | HydraulicsError::NotWhole { .. } => FailureKind::CallerContract,
            HydraulicsError::Retired { .. } => FailureKind::Retired,
        }
    }
}
