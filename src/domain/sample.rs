// Sample flight generator - Synthetic records used when no live data is available
use crate::domain::flight::{format_clock, FlightRecord, AIRLINES, AIRPORTS, STATUSES};
use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

const MIN_PRICE: u32 = 200;
const MAX_PRICE: u32 = 1000;
const MAX_DATE_OFFSET_DAYS: u64 = 30;

#[derive(Debug, Clone)]
pub struct SampleDataGenerator {
    today: NaiveDate,
}

impl SampleDataGenerator {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Generate exactly `count` records. A fixed origin or destination is applied to every
    /// record; missing endpoints are drawn so that origin and destination always differ.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        origin: Option<&str>,
        destination: Option<&str>,
    ) -> Vec<FlightRecord> {
        (0..count)
            .map(|_| self.generate_one(rng, origin, destination))
            .collect()
    }

    fn generate_one<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        origin: Option<&str>,
        destination: Option<&str>,
    ) -> FlightRecord {
        let (origin, destination) = match (origin, destination) {
            (Some(o), Some(d)) => (o.to_string(), d.to_string()),
            (Some(o), None) => (o.to_string(), pick_airport_except(rng, o)),
            (None, Some(d)) => (pick_airport_except(rng, d), d.to_string()),
            (None, None) => {
                let o = pick_airport(rng);
                let d = pick_airport_except(rng, &o);
                (o, d)
            }
        };

        let (airline, code) = AIRLINES[rng.gen_range(0..AIRLINES.len())];
        let flight_number = format!("{}{}", code, rng.gen_range(1000..10000));
        let price = rng.gen_range(MIN_PRICE..MAX_PRICE);

        let departure = rng.gen_range(0..24 * 60);
        let hours = rng.gen_range(1..=6);
        let arrival = departure + hours * 60;
        let duration = format!("{}h {}m", hours, rng.gen_range(0..60));

        let status = STATUSES[rng.gen_range(0..STATUSES.len())];
        let date = self
            .today
            .checked_add_days(Days::new(rng.gen_range(0..=MAX_DATE_OFFSET_DAYS)))
            .unwrap_or(self.today);

        FlightRecord::new(
            flight_number,
            airline.to_string(),
            origin,
            destination,
            format_clock(departure),
            format_clock(arrival),
            price,
            duration,
            status.to_string(),
            date,
        )
    }
}

fn pick_airport<R: Rng + ?Sized>(rng: &mut R) -> String {
    AIRPORTS[rng.gen_range(0..AIRPORTS.len())].to_string()
}

fn pick_airport_except<R: Rng + ?Sized>(rng: &mut R, excluded: &str) -> String {
    let candidates: Vec<&str> = AIRPORTS.iter().copied().filter(|a| *a != excluded).collect();
    candidates
        .choose(rng)
        .map(|a| a.to_string())
        .unwrap_or_else(|| pick_airport(rng))
}
