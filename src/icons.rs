//! Resolution of a forecast's icon reference into a display icon, and the
//! day/night flag that picks between icon variants.
//!
//! Sources name their icons loosely ("partly_cloudy.png", "chance_of_storm");
//! a small ordered rule table of regexes maps them onto the fixed icon set a
//! host can actually draw. The first matching rule wins.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use time::OffsetDateTime;

/// The display icons a host is expected to provide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastIcon {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Rain,
    Storm,
    Snow,
    Fog,
    #[default]
    Unknown,
}

impl ForecastIcon {
    /// The host-side asset name for this icon.
    pub fn key(&self) -> &'static str {
        match self {
            ForecastIcon::ClearDay => "clear_day",
            ForecastIcon::ClearNight => "clear_night",
            ForecastIcon::PartlyCloudyDay => "partly_cloudy_day",
            ForecastIcon::PartlyCloudyNight => "partly_cloudy_night",
            ForecastIcon::Cloudy => "cloudy",
            ForecastIcon::Rain => "rain",
            ForecastIcon::Storm => "storm",
            ForecastIcon::Snow => "snow",
            ForecastIcon::Fog => "fog",
            ForecastIcon::Unknown => "unknown",
        }
    }
}

/// One resolution rule: a pattern over the source icon reference, and the
/// icon to use for each half of the day.
#[derive(Clone, Debug)]
pub struct IconRule {
    pub pattern: Regex,
    pub day: ForecastIcon,
    pub night: ForecastIcon,
}

/// An ordered rule table; earlier rules shadow later ones.
#[derive(Clone, Debug)]
pub struct IconSet {
    rules: Vec<IconRule>,
}

lazy_static! {
    static ref DEFAULT_RULES: Vec<IconRule> = {
        fn rule(pattern: &str, day: ForecastIcon, night: ForecastIcon) -> IconRule {
            IconRule {
                // Patterns here are fixed strings, so compilation cannot fail.
                pattern: Regex::new(pattern).unwrap(),
                day,
                night,
            }
        }

        use ForecastIcon::*;

        // Order matters: "chance_of_storm" must hit the storm rule, not the
        // cloud rule a vaguer source name might also match.
        vec![
            rule("(?i)storm|thunder", Storm, Storm),
            rule("(?i)snow|sleet|flurr|ice|frost", Snow, Snow),
            rule("(?i)rain|shower|drizzle|mist", Rain, Rain),
            rule("(?i)fog|haze|smoke", Fog, Fog),
            rule("(?i)partly|mostly_sunny", PartlyCloudyDay, PartlyCloudyNight),
            rule("(?i)cloud|overcast", Cloudy, Cloudy),
            rule("(?i)clear|sunny|fair", ClearDay, ClearNight),
        ]
    };
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }
}

impl IconSet {
    pub fn new(rules: Vec<IconRule>) -> Self {
        Self { rules }
    }

    pub fn into_rules(self) -> Vec<IconRule> {
        self.rules
    }

    /// Maps a source icon reference and the day/night flag to a display
    /// icon. An unmatched reference resolves to [`ForecastIcon::Unknown`].
    pub fn resolve(&self, icon_url: &str, daytime: bool) -> ForecastIcon {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(icon_url))
            .map(|rule| if daytime { rule.day } else { rule.night })
            .unwrap_or_default()
    }
}

/// Whether `now` falls in the daytime half of the day (06:00 to 18:00 in
/// the offset `now` itself carries).
pub fn is_daytime(now: OffsetDateTime) -> bool {
    (6..18).contains(&now.hour())
}
