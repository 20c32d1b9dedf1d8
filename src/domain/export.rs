// CSV export of flight records
use crate::domain::flight::FlightRecord;
use chrono::NaiveDate;

pub const CSV_HEADER: [&str; 7] = [
    "Flight Number",
    "Airline",
    "Route",
    "Departure",
    "Arrival",
    "Price",
    "Status",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// One line per record after the header, joined with `\n` and without a trailing newline.
///
/// Fields are written verbatim with no quoting, so a value containing a comma
/// shifts the columns of its row.
pub fn convert_to_csv(flights: &[FlightRecord]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for f in flights {
        writer.write_record([
            f.flight_number.as_str(),
            f.airline.as_str(),
            f.route.as_str(),
            f.departure_time.as_str(),
            f.arrival_time.as_str(),
            f.price.to_string().as_str(),
            f.status.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let mut content = String::from_utf8_lossy(&bytes).into_owned();
    if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}

pub fn export_filename(today: NaiveDate) -> String {
    format!("flight_data_{}.csv", today.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(airline: &str) -> FlightRecord {
        FlightRecord::new(
            "AA123".to_string(),
            airline.to_string(),
            "JFK".to_string(),
            "LAX".to_string(),
            "08:00".to_string(),
            "11:00".to_string(),
            350,
            "3h 0m".to_string(),
            "On Time".to_string(),
            NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        )
    }

    #[test]
    fn test_single_record() {
        assert_eq!(
            convert_to_csv(&[flight("American Airlines")]).unwrap(),
            "Flight Number,Airline,Route,Departure,Arrival,Price,Status\nAA123,American Airlines,JFK-LAX,08:00,11:00,350,On Time"
        );
    }

    #[test]
    fn test_empty_is_header_only() {
        assert_eq!(
            convert_to_csv(&[]).unwrap(),
            "Flight Number,Airline,Route,Departure,Arrival,Price,Status"
        );
    }

    #[test]
    fn test_embedded_commas_are_not_escaped() {
        let csv = convert_to_csv(&[flight("Acme, Inc")]).unwrap();
        assert!(!csv.contains('"'));
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row.split(',').count(), 8);
    }

    #[test]
    fn test_rows_follow_input_order() {
        let mut second = flight("Delta Air Lines");
        second.flight_number = "DL456".to_string();
        let csv = convert_to_csv(&[flight("American Airlines"), second]).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("AA123,"));
        assert!(lines[2].starts_with("DL456,Delta Air Lines,"));
    }

    #[test]
    fn test_export_filename() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(export_filename(today), "flight_data_2026-10-16.csv");
    }
}
