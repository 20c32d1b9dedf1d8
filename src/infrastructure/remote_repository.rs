// Remote flight search repository over HTTP
use crate::application::flight_repository::{FlightRepository, SearchError, SearchRequest};
use crate::domain::flight::FlightRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_STATUS: &str = "On Time";

#[derive(Debug, Clone)]
pub struct RemoteFlightRepository {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    flights: Vec<RemoteFlight>,
}

/// Accepts both the dashboard's camelCase records and the backend's snake_case `FlightData`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteFlight {
    #[serde(alias = "flight_number", alias = "flight_id")]
    flight_number: String,
    airline: String,
    origin: String,
    destination: String,
    #[serde(alias = "departure_time")]
    departure_time: String,
    #[serde(alias = "arrival_time")]
    arrival_time: String,
    price: f64,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

impl RemoteFlightRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/flights/search", self.base_url)
    }
}

#[async_trait]
impl FlightRepository for RemoteFlightRepository {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<FlightRecord>, SearchError> {
        let body = SearchBody {
            origin: request.origin.as_deref(),
            destination: request.destination.as_deref(),
            date: request.date.map(|d| d.format("%Y-%m-%d").to_string()),
        };

        tracing::debug!("POST {} {:?}", self.search_url(), body);
        let response = self
            .client
            .post(self.search_url())
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Http { status, body });
        }

        let data = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        let fallback_date = request.date.unwrap_or_else(|| Local::now().date_naive());
        Ok(data
            .flights
            .into_iter()
            .map(|f| f.into_record(fallback_date))
            .collect())
    }
}

impl RemoteFlight {
    fn into_record(self, fallback_date: NaiveDate) -> FlightRecord {
        let (departure_time, departure_date) = split_timestamp(&self.departure_time);
        let (arrival_time, _) = split_timestamp(&self.arrival_time);

        let date = self
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .or(departure_date)
            .unwrap_or(fallback_date);

        FlightRecord::new(
            self.flight_number,
            self.airline,
            self.origin.to_ascii_uppercase(),
            self.destination.to_ascii_uppercase(),
            departure_time,
            arrival_time,
            self.price.round().max(0.0) as u32,
            self.duration,
            self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            date,
        )
    }
}

/// "2024-07-15T08:00:00Z" -> ("08:00", Some(2024-07-15)); "8:05" -> ("08:05", None).
/// Anything unparseable is passed through unchanged.
fn split_timestamp(value: &str) -> (String, Option<NaiveDate>) {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return (ts.format("%H:%M").to_string(), Some(ts.date_naive()));
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return (ts.format("%H:%M").to_string(), Some(ts.date()));
    }
    if let Ok(time) = NaiveTime::parse_from_str(value, "%H:%M") {
        return (time.format("%H:%M").to_string(), None);
    }
    (value.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{}", addr)
    }

    fn repository(base_url: &str) -> RemoteFlightRepository {
        RemoteFlightRepository::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_search_maps_backend_records() {
        let received = Arc::new(Mutex::new(None::<Value>));
        let router = Router::new()
            .route(
                "/api/flights/search",
                post(
                    |State(received): State<Arc<Mutex<Option<Value>>>>, Json(body): Json<Value>| async move {
                        *received.lock().unwrap() = Some(body);
                        Json(json!({
                            "flights": [{
                                "flight_id": "AA101",
                                "airline": "American Airlines",
                                "origin": "JFK",
                                "destination": "LAX",
                                "departure_time": "2024-07-15T08:00:00Z",
                                "arrival_time": "2024-07-15T11:30:00Z",
                                "duration": "5h 30m",
                                "price": 299.99,
                                "currency": "USD",
                                "class_type": "economy",
                                "stops": 0
                            }],
                            "count": 1
                        }))
                    },
                ),
            )
            .with_state(received.clone());
        let base_url = serve(router).await;

        let request = SearchRequest {
            origin: Some("JFK".to_string()),
            destination: Some("LAX".to_string()),
            date: None,
        };
        let flights = repository(&format!("{}/api/", base_url))
            .search(&request)
            .await
            .unwrap();

        assert_eq!(
            received.lock().unwrap().clone().unwrap(),
            json!({"origin": "JFK", "destination": "LAX"})
        );
        assert_eq!(flights.len(), 1);
        let flight = &flights[0];
        assert_eq!(flight.flight_number, "AA101");
        assert_eq!(flight.route, "JFK-LAX");
        assert_eq!(flight.departure_time, "08:00");
        assert_eq!(flight.arrival_time, "11:30");
        assert_eq!(flight.price, 300);
        assert_eq!(flight.status, "On Time");
        assert_eq!(flight.date, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
    }

    #[tokio::test]
    async fn test_search_accepts_dashboard_records() {
        let router = Router::new().route(
            "/flights/search",
            post(|| async {
                Json(json!({
                    "flights": [{
                        "flightNumber": "DL2041",
                        "airline": "Delta Air Lines",
                        "origin": "atl",
                        "destination": "mia",
                        "route": "ATL-MIA",
                        "departureTime": "22:15",
                        "arrivalTime": "01:15",
                        "price": 412,
                        "duration": "3h 12m",
                        "status": "Delayed",
                        "date": "2024-08-01"
                    }]
                }))
            }),
        );
        let base_url = serve(router).await;

        let request = SearchRequest {
            date: Some(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()),
            ..SearchRequest::default()
        };
        let flights = repository(&base_url).search(&request).await.unwrap();

        let flight = &flights[0];
        assert_eq!(flight.route, "ATL-MIA");
        assert_eq!(flight.arrival_time, "01:15");
        assert_eq!(flight.status, "Delayed");
        assert_eq!(flight.price, 412);
        assert_eq!(flight.date, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let router = Router::new().route(
            "/flights/search",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base_url = serve(router).await;

        match repository(&base_url).search(&SearchRequest::default()).await {
            Err(SearchError::Http { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let router = Router::new().route("/flights/search", post(|| async { "not json" }));
        let base_url = serve(router).await;

        let result = repository(&base_url).search(&SearchRequest::default()).await;
        assert!(matches!(result, Err(SearchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = repository(&format!("http://{}", addr))
            .search(&SearchRequest::default())
            .await;
        assert!(matches!(result, Err(SearchError::Network(_))));
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let router = Router::new().route(
            "/flights/search",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"flights": []}))
            }),
        );
        let base_url = serve(router).await;

        let repository = RemoteFlightRepository::new(&base_url, Duration::from_millis(100)).unwrap();
        let result = repository.search(&SearchRequest::default()).await;
        assert!(matches!(result, Err(SearchError::Network(_))));
    }

    #[test]
    fn test_split_timestamp() {
        assert_eq!(
            split_timestamp("2024-07-15T18:30:00Z"),
            ("18:30".to_string(), NaiveDate::from_ymd_opt(2024, 7, 15))
        );
        assert_eq!(
            split_timestamp("2024-07-15T06:45:00"),
            ("06:45".to_string(), NaiveDate::from_ymd_opt(2024, 7, 15))
        );
        assert_eq!(split_timestamp("9:05"), ("09:05".to_string(), None));
        assert_eq!(split_timestamp("soon"), ("soon".to_string(), None));
    }
}
