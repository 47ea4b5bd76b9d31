use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    model::{ForecastDay, Observation, WeatherRequest, round_half_up},
    source::{DateRequest, classify_date},
};

use super::ObservationSource;

pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";

/// The free forecast endpoint covers five days in 3-hour steps.
const FORECAST_DAYS: i64 = 5;

/// Forecast entries per day (24h / 3h).
const ENTRIES_PER_DAY: usize = 8;

#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherSource {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, address: &str, what: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", address),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {what} request failed with status {}: {}",
                status,
                error_detail(&body),
            ));
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse OpenWeather {what} JSON"))
    }

    async fn fetch_current(&self, address: &str) -> Result<Observation> {
        let parsed: OwCurrentResponse = self.get("/data/2.5/weather", address, "current").await?;

        Ok(Observation {
            provider: "openweather".to_string(),
            location_name: join_location(&parsed.name, parsed.sys.country.as_deref()),
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            condition: describe(&parsed.weather),
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            observation_time: DateTime::from_timestamp(parsed.dt, 0).unwrap_or_else(Utc::now),
        })
    }

    async fn fetch_forecast(&self, address: &str, when: DateTime<Utc>) -> Result<Observation> {
        let parsed: OwForecastResponse = self.get("/data/2.5/forecast", address, "forecast").await?;

        let target_ts = when.timestamp();
        let entry = parsed
            .list
            .iter()
            .min_by_key(|e| (e.dt - target_ts).abs())
            .ok_or_else(|| anyhow!("OpenWeather forecast response contained no data"))?;

        Ok(Observation {
            provider: "openweather".to_string(),
            location_name: join_location(&parsed.city.name, parsed.city.country.as_deref()),
            temperature_c: entry.main.temp,
            feels_like_c: entry.main.feels_like,
            condition: describe(&entry.weather),
            humidity_pct: entry.main.humidity,
            wind_speed_mps: entry.wind.speed,
            observation_time: DateTime::from_timestamp(entry.dt, 0).unwrap_or_else(Utc::now),
        })
    }

    async fn fetch_daily(&self, address: &str) -> Result<Vec<ForecastDay>> {
        let parsed: OwForecastResponse = self.get("/data/2.5/forecast", address, "forecast").await?;
        Ok(daily_entries(&parsed.list))
    }
}

/// Every eighth 3-hour entry, starting with the first, at most five days.
fn daily_entries(list: &[OwForecastEntry]) -> Vec<ForecastDay> {
    list.iter()
        .step_by(ENTRIES_PER_DAY)
        .take(FORECAST_DAYS as usize)
        .map(|entry| ForecastDay {
            date: DateTime::from_timestamp(entry.dt, 0).unwrap_or_else(Utc::now),
            temperature: round_half_up(entry.main.temp),
            condition: describe(&entry.weather),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize, Default)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwError {
    message: String,
}

#[async_trait]
impl ObservationSource for OpenWeatherSource {
    async fn observe(&self, request: &WeatherRequest) -> Result<Observation> {
        let now = Utc::now();

        match classify_date(now, request.when) {
            DateRequest::Current => self.fetch_current(&request.address).await,
            DateRequest::Past(dt) => Err(anyhow!(
                "Historical weather ({}) is not supported by the free OpenWeather API.\n\
                 Only current weather and up to {FORECAST_DAYS} days of forecast are available.",
                dt
            )),
            DateRequest::Future(dt) => {
                let max_forecast = now + Duration::days(FORECAST_DAYS);
                if dt > max_forecast {
                    Err(anyhow!(
                        "Requested date {} exceeds the {FORECAST_DAYS}-day forecast limit of the free OpenWeather API.\n\
                         Allowed range: now .. {}.",
                        dt,
                        max_forecast
                    ))
                } else {
                    self.fetch_forecast(&request.address, dt).await
                }
            }
        }
    }

    async fn daily_forecast(&self, address: &str) -> Result<Vec<ForecastDay>> {
        self.fetch_daily(address).await
    }
}

fn describe(weather: &[OwWeather]) -> String {
    weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn join_location(name: &str, country: Option<&str>) -> String {
    match country {
        Some(country) if !country.is_empty() => format!("{name}, {country}"),
        _ => name.to_string(),
    }
}

/// OpenWeather error bodies carry a human-readable `message`; fall back to a
/// truncated raw body otherwise.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<OwError>(body) {
        Ok(err) => err.message,
        Err(_) => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current_body() -> serde_json::Value {
        serde_json::json!({
            "name": "London",
            "dt": 1_717_243_200,
            "sys": { "country": "GB" },
            "main": { "temp": 14.7, "feels_like": 13.9, "humidity": 82 },
            "weather": [{ "description": "light rain", "icon": "10d" }],
            "wind": { "speed": 6.2 }
        })
    }

    fn request(when: Option<DateTime<Utc>>) -> WeatherRequest {
        WeatherRequest { address: "London".to_string(), when }
    }

    #[tokio::test]
    async fn fetches_current_conditions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "London"))
            .and(query_param("appid", "KEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let source = OpenWeatherSource::with_base_url("KEY".to_string(), server.uri());
        let observation = source.observe(&request(None)).await.unwrap();

        assert_eq!(observation.location_name, "London, GB");
        assert_eq!(observation.temperature_c, 14.7);
        assert_eq!(observation.humidity_pct, 82);
        assert_eq!(observation.condition, "light rain");
        assert_eq!(observation.observation_time.timestamp(), 1_717_243_200);
    }

    #[tokio::test]
    async fn picks_forecast_entry_closest_to_requested_time() {
        let when = Utc::now() + Duration::days(2);
        let ts = when.timestamp();
        let entry = |dt: i64, temp: f64| {
            serde_json::json!({
                "dt": dt,
                "main": { "temp": temp, "feels_like": temp, "humidity": 40 },
                "weather": [{ "description": "clear sky" }],
                "wind": { "speed": 2.0 }
            })
        };

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "city": { "name": "Madrid", "country": "ES" },
                "list": [
                    entry(ts - 3 * 3600, 20.0),
                    entry(ts + 600, 27.5),
                    entry(ts + 3 * 3600, 31.0),
                ]
            })))
            .mount(&server)
            .await;

        let source = OpenWeatherSource::with_base_url("KEY".to_string(), server.uri());
        let observation = source.observe(&request(Some(when))).await.unwrap();

        assert_eq!(observation.location_name, "Madrid, ES");
        assert_eq!(observation.temperature_c, 27.5);
    }

    #[tokio::test]
    async fn surfaces_upstream_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let source = OpenWeatherSource::with_base_url("KEY".to_string(), server.uri());
        let err = source.observe(&request(None)).await.unwrap_err();

        assert!(err.to_string().contains("city not found"));
    }

    #[tokio::test]
    async fn rejects_history_and_far_future() {
        let source = OpenWeatherSource::with_base_url("KEY".to_string(), "http://127.0.0.1:9");

        let past = source
            .observe(&request(Some(Utc::now() - Duration::days(3))))
            .await
            .unwrap_err();
        assert!(past.to_string().contains("Historical weather"));

        let far = source
            .observe(&request(Some(Utc::now() + Duration::days(9))))
            .await
            .unwrap_err();
        assert!(far.to_string().contains("forecast limit"));
    }

    #[tokio::test]
    async fn daily_forecast_takes_every_eighth_entry() {
        let start = 1_717_243_200;
        let list: Vec<_> = (0..40)
            .map(|i: i64| {
                serde_json::json!({
                    "dt": start + i * 3 * 3600,
                    "main": { "temp": 10.0 + i as f64 + 0.5, "feels_like": 10.0, "humidity": 60 },
                    "weather": [{ "description": format!("step {i}") }],
                    "wind": { "speed": 1.0 }
                })
            })
            .collect();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .and(query_param("q", "Lisbon"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "city": { "name": "Lisbon", "country": "PT" },
                "list": list
            })))
            .mount(&server)
            .await;

        let source = OpenWeatherSource::with_base_url("KEY".to_string(), server.uri());
        let days = source.daily_forecast("Lisbon").await.unwrap();

        assert_eq!(days.len(), 5);
        let conditions: Vec<&str> = days.iter().map(|d| d.condition.as_str()).collect();
        assert_eq!(conditions, ["step 0", "step 8", "step 16", "step 24", "step 32"]);
        assert_eq!(days[0].temperature, 11.0);
        assert_eq!(days[1].temperature, 19.0);
        assert_eq!(days[1].date.timestamp(), start + 24 * 3600);
    }

    #[tokio::test]
    async fn daily_forecast_handles_short_lists() {
        let entry = |dt: i64| {
            serde_json::json!({
                "dt": dt,
                "main": { "temp": 3.2, "feels_like": 1.0, "humidity": 90 },
                "weather": [],
                "wind": { "speed": 4.0 }
            })
        };

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "city": { "name": "Reykjavik" },
                "list": (0..10).map(|i| entry(1_717_243_200 + i * 10_800)).collect::<Vec<_>>()
            })))
            .mount(&server)
            .await;

        let source = OpenWeatherSource::with_base_url("KEY".to_string(), server.uri());
        let days = source.daily_forecast("Reykjavik").await.unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].temperature, 3.0);
        assert_eq!(days[0].condition, "Unknown");
    }

    #[test]
    fn truncates_long_bodies_on_char_boundaries() {
        let body = "é".repeat(300);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }
}
