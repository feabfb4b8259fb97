use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during catalog lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("No catalog size with SDR {sdr} inner diameter >= {required_id_m} m")]
    NoSuitableSize { required_id_m: f64, sdr: f64 },
}
