use crate::{ForecastDay, Observation, WeatherRequest};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherSource;

/// Requests within this many minutes of "now" are served from current conditions.
pub const CURRENT_WINDOW_MINUTES: i64 = 60;

/// Upstream weather data for an address.
#[async_trait]
pub trait ObservationSource: Send + Sync + Debug {
    async fn observe(&self, request: &WeatherRequest) -> anyhow::Result<Observation>;

    /// One entry per day for the coming days, earliest first.
    async fn daily_forecast(&self, address: &str) -> anyhow::Result<Vec<ForecastDay>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRequest {
    Current,
    Past(DateTime<Utc>),
    Future(DateTime<Utc>),
}

/// Decide whether `when` asks for current conditions, history or a forecast.
pub fn classify_date(now: DateTime<Utc>, when: Option<DateTime<Utc>>) -> DateRequest {
    match when {
        None => DateRequest::Current,
        Some(dt) if (dt - now).abs() <= Duration::minutes(CURRENT_WINDOW_MINUTES) => {
            DateRequest::Current
        }
        Some(dt) if dt < now => DateRequest::Past(dt),
        Some(dt) => DateRequest::Future(dt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn absent_date_is_current() {
        assert_eq!(classify_date(now(), None), DateRequest::Current);
    }

    #[test]
    fn dates_near_now_are_current() {
        let soon = now() + Duration::minutes(30);
        let recent = now() - Duration::minutes(59);
        assert_eq!(classify_date(now(), Some(soon)), DateRequest::Current);
        assert_eq!(classify_date(now(), Some(recent)), DateRequest::Current);
    }

    #[test]
    fn distant_dates_are_past_or_future() {
        let past = now() - Duration::days(2);
        let future = now() + Duration::days(2);
        assert_eq!(classify_date(now(), Some(past)), DateRequest::Past(past));
        assert_eq!(classify_date(now(), Some(future)), DateRequest::Future(future));
    }
}
