// Mapper to convert domain views to JSON wire types
use crate::domain::chart::{ChartKind, ChartSeries};
use crate::domain::dashboard::{DashboardView, DataSource, Filters, Phase};
use crate::domain::flight::FlightRecord;
use crate::domain::view::{Statistics, TableView, TopRouteEntry};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub title: String,
    pub phase: &'static str,
    pub source: Option<&'static str>,
    pub filters: FiltersDto,
    pub statistics: StatisticsDto,
    pub charts: Vec<ChartDto>,
    pub table: TableDto,
    pub top_routes: Vec<TopRouteDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersDto {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
    pub limit: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDto {
    pub total_flights: usize,
    pub unique_routes: usize,
    pub unique_airlines: usize,
    pub unique_airports: usize,
}

#[derive(Debug, Serialize)]
pub struct ChartDto {
    pub id: String,
    pub title: String,
    pub kind: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDto {
    pub rows: Vec<FlightDto>,
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDto {
    pub flight_number: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub route: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub price: u32,
    pub duration: String,
    pub status: String,
    pub date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRouteDto {
    pub route: String,
    pub flights: usize,
    pub average_price: u64,
    pub popularity_percent: u64,
}

pub fn dashboard_to_dto(view: DashboardView) -> DashboardDto {
    DashboardDto {
        title: view.title,
        phase: phase_name(view.phase),
        source: view.source.map(source_name),
        filters: filters_to_dto(view.filters),
        statistics: statistics_to_dto(view.statistics),
        charts: view.charts.into_iter().map(chart_to_dto).collect(),
        table: table_to_dto(view.table),
        top_routes: view.top_routes.into_iter().map(top_route_to_dto).collect(),
    }
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Loading => "loading",
        Phase::Loaded => "loaded",
    }
}

fn source_name(source: DataSource) -> &'static str {
    match source {
        DataSource::Remote => "remote",
        DataSource::Sample => "sample",
    }
}

fn filters_to_dto(filters: Filters) -> FiltersDto {
    FiltersDto {
        origin: filters.origin,
        destination: filters.destination,
        date: filters.date.map(|d| d.format("%Y-%m-%d").to_string()),
        limit: filters.limit,
    }
}

fn statistics_to_dto(stats: Statistics) -> StatisticsDto {
    StatisticsDto {
        total_flights: stats.total_flights,
        unique_routes: stats.unique_routes,
        unique_airlines: stats.unique_airlines,
        unique_airports: stats.unique_airports,
    }
}

fn chart_to_dto(chart: ChartSeries) -> ChartDto {
    let kind = match chart.kind {
        ChartKind::Bar => "bar",
        ChartKind::Doughnut => "doughnut",
        ChartKind::Line => "line",
    };

    ChartDto {
        id: chart.id,
        title: chart.title,
        kind,
        labels: chart.labels,
        values: chart.values,
    }
}

fn table_to_dto(table: TableView) -> TableDto {
    match table {
        TableView::Rows(rows) => TableDto {
            rows: rows.into_iter().map(flight_to_dto).collect(),
            placeholder: None,
        },
        TableView::Placeholder(message) => TableDto {
            rows: Vec::new(),
            placeholder: Some(message),
        },
    }
}

pub fn flight_to_dto(flight: FlightRecord) -> FlightDto {
    FlightDto {
        flight_number: flight.flight_number,
        airline: flight.airline,
        origin: flight.origin,
        destination: flight.destination,
        route: flight.route,
        departure_time: flight.departure_time,
        arrival_time: flight.arrival_time,
        price: flight.price,
        duration: flight.duration,
        status: flight.status,
        date: flight.date.format("%Y-%m-%d").to_string(),
    }
}

fn top_route_to_dto(entry: TopRouteEntry) -> TopRouteDto {
    TopRouteDto {
        route: entry.route,
        flights: entry.flights,
        average_price: entry.average_price,
        popularity_percent: entry.popularity_percent,
    }
}
