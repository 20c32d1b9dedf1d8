// Aggregation over a flight collection - counts, averages and rankings
use crate::domain::flight::FlightRecord;
use std::collections::{HashMap, HashSet};

/// Counts keyed by string, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedCounts {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl OrderedCounts {
    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// The `n` largest counts, descending. Equal counts keep first-seen order.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStats {
    pub route: String,
    pub count: usize,
    pub total_price: u64,
    pub average_price: u64,
    pub popularity_percent: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub total_flights: usize,
    pub unique_routes: usize,
    pub unique_airlines: usize,
    pub unique_airports: usize,
    pub route_counts: OrderedCounts,
    pub airline_counts: OrderedCounts,
    /// First-seen route order.
    pub route_stats: Vec<RouteStats>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.route_counts.is_empty()
    }

    /// Route stats ranked by count, descending, stable for ties.
    pub fn top_routes(&self, n: usize) -> Vec<RouteStats> {
        let mut ranked = self.route_stats.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}

pub fn aggregate(flights: &[FlightRecord]) -> Aggregation {
    if flights.is_empty() {
        return Aggregation::default();
    }

    let mut route_counts = OrderedCounts::default();
    let mut airline_counts = OrderedCounts::default();
    let mut airports: HashSet<&str> = HashSet::new();
    let mut price_totals: HashMap<&str, u64> = HashMap::new();

    for flight in flights {
        route_counts.increment(&flight.route);
        airline_counts.increment(&flight.airline);
        airports.insert(&flight.origin);
        airports.insert(&flight.destination);
        *price_totals.entry(flight.route.as_str()).or_default() += u64::from(flight.price);
    }

    let total = flights.len();
    let route_stats = route_counts
        .iter()
        .map(|(route, count)| {
            let total_price = price_totals.get(route).copied().unwrap_or_default();
            RouteStats {
                route: route.to_string(),
                count,
                total_price,
                average_price: round_div(total_price, count as u64),
                popularity_percent: round_div(100 * count as u64, total as u64),
            }
        })
        .collect();

    Aggregation {
        total_flights: total,
        unique_routes: route_counts.len(),
        unique_airlines: airline_counts.len(),
        unique_airports: airports.len(),
        route_counts,
        airline_counts,
        route_stats,
    }
}

/// Integer division rounded half up. Zero divisor yields zero.
fn round_div(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    (2 * numerator + denominator) / (2 * denominator)
}
