//! Pipe materials and fitting loss coefficients.

use af_core::units::{Length, mm};

/// Pipe/channel construction materials with catalog roughness values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Pvc,
    Concrete,
}

impl Material {
    /// Absolute surface roughness for the material.
    pub fn roughness(self) -> Length {
        match self {
            Material::Pvc => mm(0.12),
            Material::Concrete => mm(2.0),
        }
    }
}

/// Dimensionless minor-loss coefficients for common fittings.
pub mod kminor {
    pub const ENTRANCE: f64 = 0.5;
    pub const EXIT: f64 = 1.0;
    pub const EL90: f64 = 0.9;
    pub const EL45: f64 = 0.45;
    pub const TEE_RUN: f64 = 0.6;
    pub const TEE_BRANCH: f64 = 1.8;
}
