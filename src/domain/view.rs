// View rendering - Statistics, table rows and top routes from dashboard state
use crate::domain::aggregation::{aggregate, Aggregation};
use crate::domain::chart::{airline_share, fallback_price_trend, route_volume};
use crate::domain::dashboard::{DashboardState, DashboardView};
use crate::domain::flight::FlightRecord;
use chrono::NaiveDate;
use std::num::NonZeroUsize;

pub const TABLE_ROWS: usize = 20;
pub const TOP_ROUTES: usize = 5;
pub const NO_DATA_MESSAGE: &str = "No flight data available";

const DEFAULT_TOTAL_FLIGHTS: usize = 300;
const DEFAULT_UNIQUE_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub total_flights: usize,
    pub unique_routes: usize,
    pub unique_airlines: usize,
    pub unique_airports: usize,
}

impl Statistics {
    /// A zero count is treated the same as a missing one and replaced by its default.
    /// This also hides a genuinely empty collection behind the defaults.
    pub fn from_aggregation(aggregation: &Aggregation) -> Self {
        Self {
            total_flights: or_default(aggregation.total_flights, DEFAULT_TOTAL_FLIGHTS),
            unique_routes: or_default(aggregation.unique_routes, DEFAULT_UNIQUE_COUNT),
            unique_airlines: or_default(aggregation.unique_airlines, DEFAULT_UNIQUE_COUNT),
            unique_airports: or_default(aggregation.unique_airports, DEFAULT_UNIQUE_COUNT),
        }
    }
}

fn or_default(value: usize, default: usize) -> usize {
    NonZeroUsize::new(value).map_or(default, NonZeroUsize::get)
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Rows(Vec<FlightRecord>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopRouteEntry {
    pub route: String,
    pub flights: usize,
    pub average_price: u64,
    pub popularity_percent: u64,
}

impl TopRouteEntry {
    fn literal(route: &str, flights: usize, average_price: u64, popularity_percent: u64) -> Self {
        Self {
            route: route.to_string(),
            flights,
            average_price,
            popularity_percent,
        }
    }
}

pub fn table(flights: &[FlightRecord]) -> TableView {
    if flights.is_empty() {
        return TableView::Placeholder(NO_DATA_MESSAGE);
    }
    TableView::Rows(flights.iter().take(TABLE_ROWS).cloned().collect())
}

pub fn top_routes(aggregation: &Aggregation) -> Vec<TopRouteEntry> {
    if aggregation.is_empty() {
        return vec![
            TopRouteEntry::literal("JFK-LAX", 45, 350, 15),
            TopRouteEntry::literal("LAX-JFK", 42, 340, 14),
            TopRouteEntry::literal("ORD-LAX", 38, 310, 13),
        ];
    }

    aggregation
        .top_routes(TOP_ROUTES)
        .into_iter()
        .map(|stats| TopRouteEntry {
            route: stats.route,
            flights: stats.count,
            average_price: stats.average_price,
            popularity_percent: stats.popularity_percent,
        })
        .collect()
}

/// Render the whole dashboard. Reads `state` only.
pub fn render(state: &DashboardState, today: NaiveDate) -> DashboardView {
    let aggregation = aggregate(&state.flights);

    let price_trend = match (&state.price_trend, aggregation.is_empty()) {
        (Some(trend), false) => trend.clone(),
        _ => fallback_price_trend(today),
    };

    DashboardView {
        title: "Flight Insights Dashboard".to_string(),
        phase: state.phase,
        source: state.source,
        filters: state.filters.clone(),
        statistics: Statistics::from_aggregation(&aggregation),
        charts: vec![route_volume(&aggregation), airline_share(&aggregation), price_trend],
        table: table(&state.flights),
        top_routes: top_routes(&aggregation),
    }
}
