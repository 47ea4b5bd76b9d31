//! Human-friendly terminal output.

use reminder_core::{Advisory, ForecastDay, Observation, Reading, Severity};

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "INFO",
        Severity::Warning => "WARNING",
        Severity::Danger => "DANGER",
    }
}

pub fn observation(observation: &Observation, reading: &Reading) -> String {
    format!(
        "{name}\n  {temp}°C (feels like {feels}°C), {condition}\n  Humidity: {humidity}%\n  Wind: {wind} km/h\n  Observed: {at}\n",
        name = observation.location_name,
        temp = reading.temperature,
        feels = observation.feels_like_c.round(),
        condition = observation.condition,
        humidity = reading.humidity,
        wind = reading.wind_speed,
        at = observation.observation_time.format("%Y-%m-%d %H:%M UTC"),
    )
}

pub fn advisory(advisory: &Advisory) -> String {
    let mut out = format!("[{}] {}\n", severity_label(advisory.severity), advisory.message);
    for tip in &advisory.tips {
        out.push_str(&format!("  - {tip}\n"));
    }
    out
}

pub fn forecast(days: &[ForecastDay]) -> String {
    let mut out = String::from("5-Day Forecast\n");
    for day in days {
        out.push_str(&format!(
            "  {:<12}{:>5}°C  {}\n",
            day.date.format("%a, %b %-d").to_string(),
            day.temperature,
            title_case(&day.condition)
        ));
    }
    out
}

/// "light rain" -> "Light Rain"
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use reminder_core::classify;

    #[test]
    fn advisory_lists_tips_in_order() {
        let text = advisory(&classify(&Reading::new(-15.0).with_wind_speed(25.0)));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "[DANGER] 🥶 Extremely Cold Weather Alert!");
        assert_eq!(lines[1], "  - Dress in multiple layers");
        assert_eq!(lines.last(), Some(&"  - Strong winds - secure loose items outdoors"));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn observation_shows_rounded_reading() {
        let obs = Observation {
            provider: "openweather".to_string(),
            location_name: "London, GB".to_string(),
            temperature_c: 14.7,
            feels_like_c: 13.2,
            condition: "light rain".to_string(),
            humidity_pct: 82,
            wind_speed_mps: 6.2,
            observation_time: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        };
        let text = observation(&obs, &Reading::from_observation(&obs));

        assert!(text.starts_with("London, GB\n"));
        assert!(text.contains("15°C (feels like 13°C), light rain"));
        assert!(text.contains("Humidity: 82%"));
        assert!(text.contains("Wind: 22 km/h"));
        assert!(text.contains("Observed: 2025-06-01 12:00 UTC"));
    }

    #[test]
    fn forecast_lists_one_line_per_day() {
        let days = [
            ForecastDay {
                date: Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap(),
                temperature: 18.0,
                condition: "scattered clouds".to_string(),
            },
            ForecastDay {
                date: Utc.with_ymd_and_hms(2025, 6, 3, 12, 0, 0).unwrap(),
                temperature: -2.0,
                condition: "snow".to_string(),
            },
        ];
        let text = forecast(&days);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "5-Day Forecast");
        assert!(lines[1].starts_with("  Mon, Jun 2"));
        assert!(lines[1].ends_with("18°C  Scattered Clouds"));
        assert!(lines[2].ends_with("-2°C  Snow"));
    }
}
