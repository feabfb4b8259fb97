//! af-catalog: pipe and material catalog for aquaflow.
//!
//! Provides:
//! - the nominal pipe schedule (ND/OD pairs with a stocked flag)
//! - SDR-based inner diameter and smallest-satisfying-size queries
//! - fitting outer-diameter lookup
//! - material roughness and minor-loss coefficient constants
//!
//! Everything here is an in-memory table read; the only failure mode is a
//! required size exceeding the largest catalog entry.

pub mod error;
pub mod materials;
pub mod schedule;

pub use error::{CatalogError, CatalogResult};
pub use materials::{Material, kminor};
pub use schedule::{ScheduleRow, fitting_od, id_sdr, nd_all_rows, nd_sdr, nd_sdr_all, od};
