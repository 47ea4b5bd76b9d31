//! Weather-condition classification.
//!
//! A [`Reading`] is mapped onto one of seven temperature bands using a fixed,
//! ascending threshold table. Each band owns a static advisory template; the
//! humidity and wind values only ever append extra tips to it.

use crate::model::{Advisory, Reading, Severity};

/// Temperature bands, coldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureBand {
    VeryCold,
    Cold,
    Cool,
    Warm,
    Hot,
    VeryHot,
    ExtremeHeat,
}

/// Inclusive upper bounds (°C), evaluated in order. Anything above the last
/// entry is [`TemperatureBand::ExtremeHeat`].
pub const THRESHOLDS: [(TemperatureBand, f64); 6] = [
    (TemperatureBand::VeryCold, -10.0),
    (TemperatureBand::Cold, 5.0),
    (TemperatureBand::Cool, 15.0),
    (TemperatureBand::Warm, 25.0),
    (TemperatureBand::Hot, 30.0),
    (TemperatureBand::VeryHot, 35.0),
];

pub const HIGH_HUMIDITY_PCT: f64 = 80.0;
pub const LOW_HUMIDITY_PCT: f64 = 30.0;
pub const STRONG_WIND: f64 = 20.0;

pub const HIGH_HUMIDITY_TIP: &str =
    "High humidity - expect it to feel hotter than actual temperature";
pub const LOW_HUMIDITY_TIP: &str = "Low humidity - use moisturizer and stay hydrated";
pub const STRONG_WIND_TIP: &str = "Strong winds - secure loose items outdoors";

/// Static advisory text bound to a band.
#[derive(Debug)]
pub struct Template {
    pub message: &'static str,
    pub severity: Severity,
    pub icon: &'static str,
    pub tips: &'static [&'static str],
}

static VERY_COLD: Template = Template {
    message: "🥶 Extremely Cold Weather Alert!",
    severity: Severity::Danger,
    icon: "snow",
    tips: &[
        "Dress in multiple layers",
        "Wear warm gloves and a hat",
        "Limit time outdoors",
        "Stay hydrated with warm drinks",
        "Check on elderly neighbors",
    ],
};

static COLD: Template = Template {
    message: "❄️ Cold Weather - Bundle Up!",
    severity: Severity::Warning,
    icon: "snow",
    tips: &[
        "Wear a warm jacket",
        "Don't forget gloves and scarf",
        "Warm up your car before driving",
        "Drink hot beverages",
    ],
};

static COOL: Template = Template {
    message: "🧥 Cool Weather - Light Jacket Recommended",
    severity: Severity::Info,
    icon: "cloud",
    tips: &[
        "Wear a light jacket or sweater",
        "Perfect weather for outdoor activities",
        "Great time for a walk",
    ],
};

static WARM: Template = Template {
    message: "🌤️ Pleasant Weather - Perfect Day!",
    severity: Severity::Info,
    icon: "partly-sunny",
    tips: &[
        "Comfortable temperature for all activities",
        "Great day to spend time outdoors",
        "Light clothing recommended",
    ],
};

static HOT: Template = Template {
    message: "☀️ Hot Weather - Stay Cool!",
    severity: Severity::Warning,
    icon: "sunny",
    tips: &[
        "Wear light, breathable clothing",
        "Stay hydrated - drink plenty of water",
        "Seek shade during peak hours",
        "Use sunscreen SPF 30+",
    ],
};

static VERY_HOT: Template = Template {
    message: "🔥 Very Hot Weather - Take Precautions!",
    severity: Severity::Warning,
    icon: "sunny",
    tips: &[
        "Avoid outdoor activities during 10AM-4PM",
        "Drink water frequently",
        "Wear light-colored, loose clothing",
        "Stay in air-conditioned areas",
        "Watch for heat exhaustion symptoms",
    ],
};

static EXTREME_HEAT: Template = Template {
    message: "🌡️ Extreme Heat Warning!",
    severity: Severity::Danger,
    icon: "sunny",
    tips: &[
        "Stay indoors during peak hours",
        "Drink water every 15-20 minutes",
        "Never leave anyone in a parked car",
        "Seek immediate medical attention for heat illness",
        "Check on vulnerable family members",
    ],
};

impl TemperatureBand {
    /// First band whose upper bound is `>= temperature`. Ties go to the
    /// colder band. NaN compares false everywhere and lands in `ExtremeHeat`.
    pub fn for_temperature(temperature: f64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(_, upper)| temperature <= *upper)
            .map(|(band, _)| *band)
            .unwrap_or(TemperatureBand::ExtremeHeat)
    }

    pub fn template(self) -> &'static Template {
        match self {
            TemperatureBand::VeryCold => &VERY_COLD,
            TemperatureBand::Cold => &COLD,
            TemperatureBand::Cool => &COOL,
            TemperatureBand::Warm => &WARM,
            TemperatureBand::Hot => &HOT,
            TemperatureBand::VeryHot => &VERY_HOT,
            TemperatureBand::ExtremeHeat => &EXTREME_HEAT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureBand::VeryCold => "very-cold",
            TemperatureBand::Cold => "cold",
            TemperatureBand::Cool => "cool",
            TemperatureBand::Warm => "warm",
            TemperatureBand::Hot => "hot",
            TemperatureBand::VeryHot => "very-hot",
            TemperatureBand::ExtremeHeat => "extreme-heat",
        }
    }
}

impl std::fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn humidity_tip(humidity: f64) -> Option<&'static str> {
    if humidity > HIGH_HUMIDITY_PCT {
        Some(HIGH_HUMIDITY_TIP)
    } else if humidity < LOW_HUMIDITY_PCT {
        Some(LOW_HUMIDITY_TIP)
    } else {
        None
    }
}

pub fn wind_tip(wind_speed: f64) -> Option<&'static str> {
    (wind_speed > STRONG_WIND).then_some(STRONG_WIND_TIP)
}

/// Classify a reading. Tips are the band's base tips, then the humidity tip,
/// then the wind tip.
pub fn classify(reading: &Reading) -> Advisory {
    let template = TemperatureBand::for_temperature(reading.temperature).template();

    let tips = template
        .tips
        .iter()
        .copied()
        .chain(humidity_tip(reading.humidity))
        .chain(wind_tip(reading.wind_speed))
        .map(str::to_owned)
        .collect();

    Advisory {
        message: template.message.to_owned(),
        severity: template.severity,
        icon: template.icon.to_owned(),
        tips,
    }
}
