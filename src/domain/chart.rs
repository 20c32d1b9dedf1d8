// Chart projection - Aggregation outputs as chart-ready label/value series
use crate::domain::aggregation::{Aggregation, OrderedCounts};
use chrono::{Days, NaiveDate};
use rand::Rng;

pub const TOP_CHART_ENTRIES: usize = 8;
pub const PRICE_TREND_DAYS: u64 = 30;
pub const PRICE_FLOOR: f64 = 200.0;

const TREND_BASE_PRICE: f64 = 400.0;
const TREND_NOISE: f64 = 50.0;
const TREND_SEASONAL_AMPLITUDE: f64 = 100.0;
const TREND_RADIANS_PER_DAY: f64 = 0.1;

const FALLBACK_ROUTES: [(&str, f64); 8] = [
    ("JFK-LAX", 45.0),
    ("LAX-JFK", 42.0),
    ("ORD-LAX", 38.0),
    ("ATL-LAX", 35.0),
    ("JFK-SFO", 32.0),
    ("LAX-SFO", 28.0),
    ("ORD-ATL", 25.0),
    ("JFK-MIA", 22.0),
];

const FALLBACK_AIRLINES: [(&str, f64); 8] = [
    ("American Airlines", 52.0),
    ("Delta Air Lines", 48.0),
    ("United Airlines", 45.0),
    ("Southwest Airlines", 40.0),
    ("JetBlue Airways", 30.0),
    ("Alaska Airlines", 25.0),
    ("Spirit Airlines", 20.0),
    ("Frontier Airlines", 15.0),
];

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Bar,
    Doughnut,
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn new(id: &str, title: &str, kind: ChartKind, labels: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            labels,
            values,
        }
    }
}

pub fn route_volume(aggregation: &Aggregation) -> ChartSeries {
    let (labels, values) = if aggregation.is_empty() {
        literal_series(&FALLBACK_ROUTES)
    } else {
        ranked_series(&aggregation.route_counts)
    };
    ChartSeries::new("routes", "Popular Routes", ChartKind::Bar, labels, values)
}

pub fn airline_share(aggregation: &Aggregation) -> ChartSeries {
    let (labels, values) = if aggregation.is_empty() {
        literal_series(&FALLBACK_AIRLINES)
    } else {
        ranked_series(&aggregation.airline_counts)
    };
    ChartSeries::new("airlines", "Airline Distribution", ChartKind::Doughnut, labels, values)
}

/// Simulated daily average price for `today` and the 30 days before it.
///
/// Not derived from flight records: each point is the base price plus a uniform
/// perturbation in [-50, 50] and a seasonal sine of `offset * 0.1` radians, floored at 200.
pub fn price_trend<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> ChartSeries {
    trend_series(today, |offset| {
        let noise = rng.gen_range(-TREND_NOISE..=TREND_NOISE);
        TREND_BASE_PRICE + noise + seasonal(offset)
    })
}

/// Deterministic trend shown when there are no flights: the seasonal curve alone.
pub fn fallback_price_trend(today: NaiveDate) -> ChartSeries {
    trend_series(today, |offset| TREND_BASE_PRICE + seasonal(offset))
}

fn seasonal(offset: u64) -> f64 {
    (offset as f64 * TREND_RADIANS_PER_DAY).sin() * TREND_SEASONAL_AMPLITUDE
}

fn trend_series(today: NaiveDate, mut price_at: impl FnMut(u64) -> f64) -> ChartSeries {
    let mut labels = Vec::with_capacity(PRICE_TREND_DAYS as usize + 1);
    let mut values = Vec::with_capacity(PRICE_TREND_DAYS as usize + 1);

    // oldest first, ending at today
    for offset in (0..=PRICE_TREND_DAYS).rev() {
        let day = today.checked_sub_days(Days::new(offset)).unwrap_or(today);
        labels.push(day.format("%Y-%m-%d").to_string());
        values.push(price_at(offset).round().max(PRICE_FLOOR));
    }

    ChartSeries::new("price_trend", "Price Trends", ChartKind::Line, labels, values)
}

fn ranked_series(counts: &OrderedCounts) -> (Vec<String>, Vec<f64>) {
    counts
        .top(TOP_CHART_ENTRIES)
        .into_iter()
        .map(|(label, count)| (label, count as f64))
        .unzip()
}

fn literal_series(entries: &[(&str, f64)]) -> (Vec<String>, Vec<f64>) {
    entries.iter().map(|(label, v)| (label.to_string(), *v)).unzip()
}
