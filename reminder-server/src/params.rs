//! Request parameter validation.
//!
//! `temperature` is required. `humidity` and `windSpeed` fall back to the
//! reading defaults when absent, `null` or empty; an explicit `0` is kept.

use reminder_core::{
    Reading,
    model::{DEFAULT_HUMIDITY, DEFAULT_WIND_SPEED},
};
use serde_json::{Map, Value};

use crate::error::{ApiError, ParamSource};

pub const TEMPERATURE: &str = "temperature";
pub const HUMIDITY: &str = "humidity";
pub const WIND_SPEED: &str = "windSpeed";
pub const LOCATION: &str = "location";

pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Accepts finite decimal literals and `Infinity` with an optional sign.
/// Other spellings (`inf`, `NaN`, ...) do not parse.
fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) && unsigned != "Infinity" {
        return None;
    }
    raw.parse().ok()
}

/// Optional fields never reject a request: unparseable values become NaN,
/// which adds no tip and serializes as `null`.
fn lenient_number(raw: &str) -> f64 {
    parse_number(raw).unwrap_or(f64::NAN)
}

/// Build a reading from decoded query pairs. The first occurrence of a key wins.
pub fn reading_from_query(pairs: &[(String, String)]) -> Result<Reading, ApiError> {
    let param = |name: &str| {
        pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    };

    let temperature = param(TEMPERATURE).ok_or(ApiError::MissingRequiredField {
        field: TEMPERATURE,
        origin: ParamSource::Query,
    })?;
    let temperature = parse_number(temperature).ok_or(ApiError::InvalidNumericValue {
        field: TEMPERATURE,
    })?;

    let humidity = param(HUMIDITY).map_or(DEFAULT_HUMIDITY, lenient_number);
    let wind_speed = param(WIND_SPEED).map_or(DEFAULT_WIND_SPEED, lenient_number);

    Ok(Reading::new(temperature)
        .with_humidity(humidity)
        .with_wind_speed(wind_speed))
}

/// A validated POST body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyReading {
    pub reading: Reading,
    pub location: String,
}

/// Parse a raw POST body. An empty body is an empty object; a JSON value that
/// is not an object carries no fields. Undecodable JSON is an internal error.
pub fn reading_from_body(bytes: &[u8]) -> Result<BodyReading, ApiError> {
    let value: Value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(bytes).map_err(|e| ApiError::Internal(e.to_string()))?
    };

    let empty = Map::new();
    let fields = value.as_object().unwrap_or(&empty);

    let temperature = fields.get(TEMPERATURE).ok_or(ApiError::MissingRequiredField {
        field: TEMPERATURE,
        origin: ParamSource::Body,
    })?;
    let temperature = number_field(temperature).ok_or(ApiError::InvalidNumericValue {
        field: TEMPERATURE,
    })?;

    let humidity = optional_number_field(fields.get(HUMIDITY)).unwrap_or(DEFAULT_HUMIDITY);
    let wind_speed = optional_number_field(fields.get(WIND_SPEED)).unwrap_or(DEFAULT_WIND_SPEED);

    let location = match fields.get(LOCATION) {
        None | Some(Value::Null) => UNKNOWN_LOCATION.to_string(),
        Some(Value::String(s)) if s.is_empty() => UNKNOWN_LOCATION.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Ok(BodyReading {
        reading: Reading::new(temperature)
            .with_humidity(humidity)
            .with_wind_speed(wind_speed),
        location,
    })
}

/// JSON numbers and numeric strings are accepted.
fn number_field(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// `None` means "use the default"; anything else present but unparseable is NaN.
fn optional_number_field(value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(number_field(value).unwrap_or(f64::NAN)),
    }
}
