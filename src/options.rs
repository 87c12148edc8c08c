//! Configuration. Everything is optional in the file; a missing table or
//! field falls back to the defaults in [`crate::constants`].

pub mod error;

use std::{borrow::Cow, path::Path, time::Duration};

use hashbrown::HashMap;
use regex::Regex;
use serde::Deserialize;

pub use self::error::{OptionError, OptionResult};
use crate::{
    constants::{
        DEFAULT_FALLBACK_LAYOUT, DEFAULT_FORECAST_LAYOUT, DEFAULT_UPDATE_RATE,
        DEFAULT_WIDGET_ERROR, MIN_UPDATE_RATE,
    },
    icons::{ForecastIcon, IconRule, IconSet},
    provider::RenderSettings,
    view::{Slot, ViewKind},
};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    pub strings: Option<StringsConfig>,
    pub refresh: Option<RefreshConfig>,
    pub layout: Option<LayoutConfig>,
    pub icons: Option<IconsConfig>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StringsConfig {
    /// The localized fallback message.
    pub widget_error: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RefreshConfig {
    /// A humantime-style cadence for the host update loop, e.g. `"30m"`.
    pub rate: Option<String>,
}

/// Host-side names for the two layouts and each view slot.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LayoutConfig {
    pub forecast: Option<String>,
    pub fallback: Option<String>,

    pub root: Option<String>,
    pub location: Option<String>,
    pub conditions: Option<String>,
    pub icon: Option<String>,
    pub current_temp: Option<String>,
    pub high_and_low: Option<String>,
    pub update_marker: Option<String>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct IconsConfig {
    pub rules: Option<Vec<IconRuleConfig>>,
}

/// One configured icon rule; compiled into an [`IconRule`] on use.
#[derive(Clone, Debug, Deserialize)]
pub struct IconRuleConfig {
    pub pattern: String,
    pub day: ForecastIcon,
    pub night: ForecastIcon,
}

impl std::str::FromStr for Config {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml_edit::de::from_str(s)?)
    }
}

impl Config {
    pub fn load(path: &Path) -> OptionResult<Self> {
        std::fs::read_to_string(path)?.parse()
    }

    /// The refresh cadence for the host loop, validated against the
    /// minimum.
    pub fn update_rate(&self) -> OptionResult<Duration> {
        match self.refresh.as_ref().and_then(|refresh| refresh.rate.as_deref()) {
            Some(value) => parse_rate(value).map_err(OptionError::config),
            None => Ok(DEFAULT_UPDATE_RATE),
        }
    }

    /// Resolves the renderer settings, compiling any configured icon
    /// rules. Configured rules are tried before the built-in table.
    pub fn render_settings(&self) -> OptionResult<RenderSettings> {
        let error_message = self
            .strings
            .as_ref()
            .and_then(|strings| strings.widget_error.clone())
            .unwrap_or_else(|| DEFAULT_WIDGET_ERROR.to_string());

        let icons = match self.icons.as_ref().and_then(|icons| icons.rules.as_ref()) {
            Some(rules) => {
                let mut compiled = Vec::with_capacity(rules.len());
                for rule in rules {
                    let pattern = Regex::new(&rule.pattern).map_err(|_| {
                        OptionError::config(format!(
                            "'{}' is not a valid icon pattern, please update it in your config file.",
                            rule.pattern
                        ))
                    })?;
                    compiled.push(IconRule {
                        pattern,
                        day: rule.day,
                        night: rule.night,
                    });
                }
                compiled.extend(IconSet::default().into_rules());
                IconSet::new(compiled)
            }
            None => IconSet::default(),
        };

        Ok(RenderSettings {
            error_message,
            icons,
        })
    }

    /// The resolved layout/slot naming table.
    pub fn layout(&self) -> Layout {
        let config = self.layout.clone().unwrap_or_default();

        let mut slots = HashMap::new();
        let overrides = [
            (Slot::Root, config.root),
            (Slot::Location, config.location),
            (Slot::Conditions, config.conditions),
            (Slot::Icon, config.icon),
            (Slot::CurrentTemp, config.current_temp),
            (Slot::HighAndLow, config.high_and_low),
            (Slot::UpdateMarker, config.update_marker),
            (Slot::Message, config.message),
        ];
        for (slot, name) in overrides {
            if let Some(name) = name {
                slots.insert(slot, name);
            }
        }

        Layout {
            forecast: config
                .forecast
                .unwrap_or_else(|| DEFAULT_FORECAST_LAYOUT.to_string()),
            fallback: config
                .fallback
                .unwrap_or_else(|| DEFAULT_FALLBACK_LAYOUT.to_string()),
            slots,
        }
    }
}

/// Parses a refresh rate override from the command line.
pub fn rate_from_arg(value: &str) -> OptionResult<Duration> {
    parse_rate(value).map_err(OptionError::arg)
}

fn parse_rate(value: &str) -> Result<Duration, Cow<'static, str>> {
    let rate = humantime::parse_duration(value)
        .map_err(|_| Cow::Owned(format!("'{value}' is not a valid refresh rate.")))?;

    if rate < MIN_UPDATE_RATE {
        Err("Please set your update rate to be at least 60 seconds.".into())
    } else {
        Ok(rate)
    }
}

/// The host-side naming of layouts and slots, as the host harness prints
/// them.
#[derive(Clone, Debug)]
pub struct Layout {
    forecast: String,
    fallback: String,
    slots: HashMap<Slot, String>,
}

impl Layout {
    pub fn layout_name(&self, kind: ViewKind) -> &str {
        match kind {
            ViewKind::Forecast => &self.forecast,
            ViewKind::Fallback => &self.fallback,
        }
    }

    pub fn slot_name(&self, slot: Slot) -> &str {
        self.slots
            .get(&slot)
            .map(String::as_str)
            .unwrap_or_else(|| slot.key())
    }
}
