// Dashboard errors surfaced to the caller
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DashboardError {
    #[error("No data to export")]
    EmptyExport,
    #[error("Invalid airport code: {0}")]
    InvalidAirport(String),
    #[error("Origin and destination must differ: {0}")]
    SameAirport(String),
    #[error("Limit {limit} exceeds the maximum of {max}")]
    InvalidLimit { limit: usize, max: usize },
    #[error("CSV export failed: {0}")]
    Csv(String),
}
