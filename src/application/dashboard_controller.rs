// Dashboard controller - Filter intake, remote-or-sample loading and dashboard state
use crate::application::error::DashboardError;
use crate::application::flight_repository::{FlightRepository, SearchRequest};
use crate::domain::chart::{price_trend, ChartSeries};
use crate::domain::dashboard::{DashboardState, DashboardView, DataSource, Filters, Phase};
use crate::domain::export::{convert_to_csv, export_filename, CsvExport};
use crate::domain::flight::FlightRecord;
use crate::domain::sample::SampleDataGenerator;
use crate::domain::view::render;
use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct DashboardController {
    /// `None` runs the dashboard in sample-only mode.
    repository: Option<Arc<dyn FlightRepository>>,
    default_limit: usize,
    max_limit: usize,
    seed: Option<u64>,
    fixed_today: Option<NaiveDate>,
    rng: Mutex<StdRng>,
    state: Mutex<DashboardState>,
    next_token: AtomicU64,
    /// Loads started but not yet applied or abandoned.
    in_flight: AtomicUsize,
}

/// Counts one load as in flight until dropped, including when the load future is
/// cancelled or unwinds.
struct InFlight<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

impl DashboardController {
    pub fn new(
        repository: Option<Arc<dyn FlightRepository>>,
        default_limit: usize,
        max_limit: usize,
        seed: Option<u64>,
    ) -> Self {
        Self {
            repository,
            default_limit,
            max_limit,
            seed,
            fixed_today: None,
            rng: Mutex::new(seeded_rng(seed)),
            state: Mutex::new(DashboardState::new(default_limit)),
            next_token: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Pin the calendar date used for sample dates, the price trend and export names.
    #[cfg(test)]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Initial load: default filters and sample data.
    pub async fn initialize(&self) -> DashboardView {
        tracing::info!("Initializing dashboard with sample data");
        self.reset_to_defaults().await
    }

    /// Reset filters to their defaults and reload sample data.
    pub async fn clear_filters(&self) -> DashboardView {
        tracing::info!("Clearing dashboard filters");
        self.reset_to_defaults().await
    }

    /// Load flights for the given filters. Remote failures fall back to sample data,
    /// so only invalid filters produce an error. `limit` must not exceed the configured
    /// maximum.
    pub async fn load_filtered(
        &self,
        from_airport: Option<&str>,
        to_airport: Option<&str>,
        date: Option<NaiveDate>,
        limit: Option<usize>,
    ) -> Result<DashboardView, DashboardError> {
        let limit = limit.unwrap_or(self.default_limit);
        if limit > self.max_limit {
            return Err(DashboardError::InvalidLimit {
                limit,
                max: self.max_limit,
            });
        }

        let filters = Filters {
            origin: normalize_airport(from_airport)?,
            destination: normalize_airport(to_airport)?,
            date,
            limit,
        };

        if let (Some(origin), Some(destination)) = (&filters.origin, &filters.destination) {
            if origin == destination {
                return Err(DashboardError::SameAirport(origin.clone()));
            }
        }

        Ok(self.load(filters).await)
    }

    /// Re-run the load with the currently active filters.
    pub async fn refresh(&self) -> DashboardView {
        let filters = self.state.lock().await.filters.clone();
        tracing::debug!("Refreshing dashboard with filters {:?}", filters);
        self.load(filters).await
    }

    /// CSV of the full current collection, not only the rows shown in the table.
    pub async fn export_csv(&self) -> Result<CsvExport, DashboardError> {
        let state = self.state.lock().await;
        if state.flights.is_empty() {
            tracing::warn!("Export requested with no flight data");
            return Err(DashboardError::EmptyExport);
        }

        tracing::info!("Exporting {} flights to CSV", state.flights.len());
        let content = convert_to_csv(&state.flights).map_err(|e| {
            tracing::error!("CSV export failed: {}", e);
            DashboardError::Csv(e.to_string())
        })?;
        Ok(CsvExport {
            filename: export_filename(self.today()),
            content,
        })
    }

    pub async fn dashboard(&self) -> DashboardView {
        let state = self.state.lock().await;
        self.render(&state)
    }

    /// Reports `Loading` while any load is still in flight.
    fn render(&self, state: &DashboardState) -> DashboardView {
        let mut view = render(state, self.today());
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            view.phase = Phase::Loading;
        }
        view
    }

    async fn reset_to_defaults(&self) -> DashboardView {
        let (token, in_flight) = self.begin_load();
        let filters = Filters {
            limit: self.default_limit,
            ..Filters::default()
        };

        let mut rng = self.rng.lock().await;
        *rng = seeded_rng(self.seed);
        let today = self.today();
        let flights = SampleDataGenerator::new(today).generate(&mut *rng, filters.limit, None, None);
        let trend = price_trend(&mut *rng, today);
        drop(rng);

        self.apply(token, in_flight, filters, flights, DataSource::Sample, trend).await
    }

    async fn load(&self, filters: Filters) -> DashboardView {
        let (token, in_flight) = self.begin_load();
        let (flights, source) = self.fetch(&filters).await;

        let mut rng = self.rng.lock().await;
        let trend = price_trend(&mut *rng, self.today());
        drop(rng);

        self.apply(token, in_flight, filters, flights, source, trend).await
    }

    async fn fetch(&self, filters: &Filters) -> (Vec<FlightRecord>, DataSource) {
        if let Some(repository) = &self.repository {
            let request = SearchRequest {
                origin: filters.origin.clone(),
                destination: filters.destination.clone(),
                date: filters.date,
            };

            match repository.search(&request).await {
                Ok(mut flights) => {
                    tracing::info!(
                        "Search returned {} flights, keeping at most {}",
                        flights.len(),
                        filters.limit
                    );
                    flights.truncate(filters.limit);
                    return (flights, DataSource::Remote);
                }
                Err(e) => {
                    tracing::warn!("Flight search failed, using sample data: {}", e);
                }
            }
        }

        let mut rng = self.rng.lock().await;
        let flights = SampleDataGenerator::new(self.today()).generate(
            &mut *rng,
            filters.limit,
            filters.origin.as_deref(),
            filters.destination.as_deref(),
        );
        (flights, DataSource::Sample)
    }

    fn begin_load(&self) -> (u64, InFlight<'_>) {
        let in_flight = InFlight::enter(&self.in_flight);
        let token = self.next_token.fetch_add(1, Ordering::SeqCst) + 1;
        (token, in_flight)
    }

    /// Replace the state wholesale unless a newer load has already been applied.
    async fn apply(
        &self,
        token: u64,
        in_flight: InFlight<'_>,
        filters: Filters,
        flights: Vec<FlightRecord>,
        source: DataSource,
        trend: ChartSeries,
    ) -> DashboardView {
        let mut state = self.state.lock().await;

        if token < state.generation {
            tracing::debug!(
                "Discarding stale load {} (current generation {})",
                token,
                state.generation
            );
        } else {
            state.flights = flights;
            state.filters = filters;
            state.price_trend = Some(trend);
            state.source = Some(source);
            state.generation = token;
            state.phase = Phase::Loaded;
        }

        drop(in_flight);
        self.render(&state)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Trim and uppercase an airport code. Blank input means "any airport".
fn normalize_airport(code: Option<&str>) -> Result<Option<String>, DashboardError> {
    let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };

    let code = code.to_ascii_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DashboardError::InvalidAirport(code));
    }
    Ok(Some(code))
}
