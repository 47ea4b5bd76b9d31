use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HUMIDITY: f64 = 50.0;
pub const DEFAULT_WIND_SPEED: f64 = 0.0;

/// Temperature (°C), relative humidity (%) and wind speed (km/h) submitted
/// for classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

impl Reading {
    /// Reading with the default humidity and wind speed, which never add tips.
    pub fn new(temperature: f64) -> Self {
        Self {
            temperature,
            humidity: DEFAULT_HUMIDITY,
            wind_speed: DEFAULT_WIND_SPEED,
        }
    }

    pub fn with_humidity(mut self, humidity: f64) -> Self {
        self.humidity = humidity;
        self
    }

    pub fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    /// Derive a reading the way the app presents an observation: whole
    /// degrees, and wind converted from m/s to whole km/h.
    pub fn from_observation(observation: &Observation) -> Self {
        Self {
            temperature: round_half_up(observation.temperature_c),
            humidity: f64::from(observation.humidity_pct),
            wind_speed: round_half_up(observation.wind_speed_mps * 3.6),
        }
    }
}

pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result. Serialized with the field names existing clients
/// read (`type`, `icon`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub message: String,
    #[serde(rename = "type", alias = "severity")]
    pub severity: Severity,
    #[serde(alias = "iconHint")]
    pub icon: String,
    pub tips: Vec<String>,
}

impl Advisory {
    /// Shown by clients when the reminder service cannot be reached.
    pub fn service_unavailable() -> Self {
        Self {
            message: "📱 Weather reminder service unavailable".to_string(),
            severity: Severity::Info,
            icon: "information-circle".to_string(),
            tips: vec![
                "Check current temperature and dress accordingly".to_string(),
                "Stay hydrated and protect yourself from extreme weather".to_string(),
                "Weather reminder server may be offline".to_string(),
            ],
        }
    }
}

/// Body returned by both reminder endpoints. `location` is only present on
/// the POST variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub reminder: Advisory,
    pub timestamp: String,
}

impl ReminderResponse {
    pub fn new(reading: &Reading, reminder: Advisory, now: DateTime<Utc>) -> Self {
        Self {
            location: None,
            temperature: reading.temperature,
            humidity: reading.humidity,
            wind_speed: reading.wind_speed,
            reminder,
            timestamp: iso_timestamp(now),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// JSON body accepted by `POST /api/reminder`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ReminderRequest {
    pub fn from_reading(reading: &Reading, location: Option<&str>) -> Self {
        Self {
            temperature: reading.temperature,
            humidity: Some(reading.humidity),
            wind_speed: Some(reading.wind_speed),
            location: location.map(str::to_owned),
        }
    }
}

/// Upstream weather lookup for an address, now or at a given instant.
#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub address: String,
    pub when: Option<DateTime<Utc>>,
}

/// Normalized upstream weather observation (or forecast entry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub provider: String,
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub observation_time: DateTime<Utc>,
}

/// One day of the multi-day outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: DateTime<Utc>,
    /// Whole degrees °C.
    pub temperature: f64,
    pub condition: String,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2025-01-31T09:15:02.125Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
