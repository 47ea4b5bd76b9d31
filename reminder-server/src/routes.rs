use axum::{Json, body::Bytes, extract::Query};
use chrono::Utc;
use reminder_core::{ReminderResponse, classify, iso_timestamp};
use serde_json::{Value, json};

use crate::{error::ApiError, params};

pub const AVAILABLE_ENDPOINTS: [&str; 4] = [
    "GET /",
    "GET /api/reminder",
    "POST /api/reminder",
    "GET /health",
];

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Weather Reminder API Server",
        "status": "running",
        "endpoints": {
            "GET /api/reminder": "Get temperature-based reminder",
            "POST /api/reminder": "Get reminder with weather data",
            "GET /health": "Service health check"
        }
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": iso_timestamp(Utc::now())
    }))
}

/// `GET /api/reminder?temperature=..&humidity=..&windSpeed=..`
pub async fn reminder_from_query(
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ReminderResponse>, ApiError> {
    let reading = params::reading_from_query(&pairs)?;
    let reminder = classify(&reading);

    tracing::debug!(
        temperature = reading.temperature,
        severity = %reminder.severity,
        "classified query reading"
    );

    Ok(Json(ReminderResponse::new(&reading, reminder, Utc::now())))
}

/// `POST /api/reminder` with `{ temperature, humidity?, windSpeed?, location? }`.
pub async fn reminder_from_body(body: Bytes) -> Result<Json<ReminderResponse>, ApiError> {
    let params::BodyReading { reading, location } = params::reading_from_body(&body)?;
    let reminder = classify(&reading);

    tracing::debug!(
        temperature = reading.temperature,
        severity = %reminder.severity,
        %location,
        "classified posted reading"
    );

    Ok(Json(
        ReminderResponse::new(&reading, reminder, Utc::now()).with_location(location),
    ))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
