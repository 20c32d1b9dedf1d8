// Dashboard domain model
use super::chart::ChartSeries;
use super::flight::FlightRecord;
use super::view::{Statistics, TableView, TopRouteEntry};
use chrono::NaiveDate;

pub const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<NaiveDate>,
    pub limit: usize,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            origin: None,
            destination: None,
            date: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Remote,
    Sample,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub flights: Vec<FlightRecord>,
    pub filters: Filters,
    pub price_trend: Option<ChartSeries>,
    pub phase: Phase,
    pub source: Option<DataSource>,
    /// Sequence token of the load that produced `flights`.
    pub generation: u64,
}

impl DashboardState {
    pub fn new(default_limit: usize) -> Self {
        Self {
            flights: Vec::new(),
            filters: Filters {
                limit: default_limit,
                ..Filters::default()
            },
            price_trend: None,
            phase: Phase::Idle,
            source: None,
            generation: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub title: String,
    pub phase: Phase,
    pub source: Option<DataSource>,
    pub filters: Filters,
    pub statistics: Statistics,
    pub charts: Vec<ChartSeries>,
    pub table: TableView,
    pub top_routes: Vec<TopRouteEntry>,
}
