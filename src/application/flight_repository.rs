// Repository trait for remote flight search
use crate::domain::flight::FlightRecord;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Every variant is handled the same way by the dashboard: substitute sample data.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("search endpoint returned status {status}: {body}")]
    Http { status: u16, body: String },
    #[error("invalid search response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Search flights matching the request
    async fn search(&self, request: &SearchRequest) -> Result<Vec<FlightRecord>, SearchError>;
}
