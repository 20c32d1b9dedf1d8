// Flight record domain model
use chrono::NaiveDate;

/// Carriers used for sample data, with the code that prefixes their flight numbers.
pub const AIRLINES: [(&str, &str); 8] = [
    ("American Airlines", "AA"),
    ("Delta Air Lines", "DL"),
    ("United Airlines", "UA"),
    ("Southwest Airlines", "WN"),
    ("JetBlue Airways", "B6"),
    ("Alaska Airlines", "AS"),
    ("Spirit Airlines", "NK"),
    ("Frontier Airlines", "F9"),
];

pub const AIRPORTS: [&str; 16] = [
    "JFK", "LAX", "ORD", "DFW", "DEN", "SFO", "LAS", "MIA", "BOS", "SEA", "ATL", "PHX", "LGA",
    "EWR", "IAD", "DCA",
];

pub const STATUSES: [&str; 4] = ["On Time", "Delayed", "Boarding", "Departed"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightRecord {
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
    pub date: NaiveDate,
}

impl FlightRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        flight_number: String,
        airline: String,
        origin: String,
        destination: String,
        departure_time: String,
        arrival_time: String,
        price: u32,
        duration: String,
        status: String,
        date: NaiveDate,
    ) -> Self {
        let route = route_key(&origin, &destination);
        Self {
            flight_number,
            airline,
            origin,
            destination,
            route,
            departure_time,
            arrival_time,
            price,
            duration,
            status,
            date,
        }
    }
}

/// "JFK" + "LAX" -> "JFK-LAX"
pub fn route_key(origin: &str, destination: &str) -> String {
    format!("{}-{}", origin, destination)
}

/// Format minutes since midnight as zero-padded `HH:MM`, wrapping past midnight.
pub fn format_clock(minutes: u32) -> String {
    let minutes = minutes % (24 * 60);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_is_derived_from_endpoints() {
        let flight = FlightRecord::new(
            "AA1234".to_string(),
            "American Airlines".to_string(),
            "JFK".to_string(),
            "LAX".to_string(),
            "08:00".to_string(),
            "11:00".to_string(),
            350,
            "3h 0m".to_string(),
            "On Time".to_string(),
            NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        );
        assert_eq!(flight.route, "JFK-LAX");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(8 * 60 + 5), "08:05");
        assert_eq!(format_clock(23 * 60 + 59), "23:59");
        assert_eq!(format_clock(25 * 60 + 30), "01:30");
    }
}
