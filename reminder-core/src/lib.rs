//! Core library for the weather reminder service.
//!
//! This crate defines:
//! - The temperature classification engine and its threshold table
//! - Shared domain models (readings, advisories, response envelopes)
//! - Upstream weather lookups and the reminder-service client
//! - Client configuration & credentials handling
//!
//! It is used by `reminder-server` and `reminder-cli`.

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod source;

pub use client::ReminderClient;
pub use config::Config;
pub use engine::{TemperatureBand, classify};
pub use error::ClientError;
pub use model::{
    Advisory, ForecastDay, Observation, Reading, ReminderRequest, ReminderResponse, Severity,
    WeatherRequest, iso_timestamp,
};
pub use source::{ObservationSource, OpenWeatherSource};
