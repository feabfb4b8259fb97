//! Errors surfaced while evaluating design attributes.

use af_catalog::CatalogError;
use af_hydraulics::HydraulicsError;
use thiserror::Error;

/// Anything that can go wrong while dimensioning a component.
///
/// Formula and catalog failures pass through unchanged so callers can
/// still classify them (see [`HydraulicsError::kind`]). Results are
/// memoized per attribute, which is why every variant is `Clone`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    #[error(transparent)]
    Hydraulics(#[from] HydraulicsError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The requested attribute has no formula for this configuration.
    #[error("{component}.{attribute} is not defined for this configuration")]
    Unimplemented {
        component: &'static str,
        attribute: &'static str,
    },
}

pub type DesignResult<T> = Result<T, DesignError>;
