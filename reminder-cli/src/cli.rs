use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use reminder_core::{
    Config, ObservationSource, OpenWeatherSource, Reading, ReminderClient, WeatherRequest,
    classify,
    model::{DEFAULT_HUMIDITY, DEFAULT_WIND_SPEED},
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-reminder",
    version,
    about = "Weather lookups with temperature reminders"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and the reminder service URL.
    Configure,

    /// Show weather and a reminder for an address.
    Show {
        /// Address or location name, e.g. "London" or "New York".
        address: String,

        /// Optional date/time (RFC 3339 or "YYYY-MM-DD HH:MM", UTC); if absent, means "now".
        #[arg(long, value_parser = parse_date)]
        date: Option<DateTime<Utc>>,
    },

    /// Classify a reading locally, without contacting any service.
    Classify {
        /// Temperature in °C.
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,

        /// Relative humidity in percent.
        #[arg(long, default_value_t = DEFAULT_HUMIDITY)]
        humidity: f64,

        /// Wind speed in km/h.
        #[arg(long, default_value_t = DEFAULT_WIND_SPEED)]
        wind_speed: f64,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { address, date } => show(address, date).await,
            Command::Classify {
                temperature,
                humidity,
                wind_speed,
            } => {
                let reading = Reading::new(temperature)
                    .with_humidity(humidity)
                    .with_wind_speed(wind_speed);
                print!("{}", render::advisory(&classify(&reading)));
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let url = Text::new("Reminder service URL:")
        .with_default(config.reminder_url())
        .prompt()
        .context("Failed to read reminder service URL")?;
    config.set_reminder_url(url.trim().to_string());

    let api_key = Password::new("OpenWeather API key (leave empty to keep current):")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_openweather_api_key(api_key.trim().to_string());
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show(address: String, when: Option<DateTime<Utc>>) -> Result<()> {
    let mut config = Config::load()?;
    config.apply_env_overrides();

    let source = OpenWeatherSource::new(config.require_openweather_api_key()?.to_owned());
    let observation = source
        .observe(&WeatherRequest {
            address: address.clone(),
            when,
        })
        .await?;
    let days = source.daily_forecast(&address).await?;

    let reading = Reading::from_observation(&observation);
    tracing::debug!(?reading, location = %observation.location_name, "derived reading");

    let advisory = ReminderClient::new(config.reminder_url())
        .advisory_or_fallback(&reading, Some(&observation.location_name))
        .await;

    print!("{}", render::observation(&observation, &reading));
    println!();
    print!("{}", render::advisory(&advisory));
    println!();
    print!("{}", render::forecast(&days));
    Ok(())
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("invalid date '{raw}': expected RFC 3339 or \"YYYY-MM-DD HH:MM\""))
}
