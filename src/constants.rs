use std::time::Duration;

use indoc::indoc;

/// The localized message the fallback layout shows when no forecast row
/// could be found.
pub const DEFAULT_WIDGET_ERROR: &str = "Problem loading widget";

/// Default host-side layout names.
pub const DEFAULT_FORECAST_LAYOUT: &str = "widget_forecast";
pub const DEFAULT_FALLBACK_LAYOUT: &str = "widget_loading";

/// Refresh cadence bounds for the demo host loop.
pub const DEFAULT_UPDATE_RATE: Duration = Duration::from_secs(30 * 60);
pub const MIN_UPDATE_RATE: Duration = Duration::from_secs(60);

/// Where the default config file lives, relative to the user config dir.
pub const DEFAULT_CONFIG_FILE_LOCATION: &str = "skyview/skyview.toml";

/// Written out when no config file exists yet. Everything is commented
/// out; the defaults apply until a line is uncommented.
pub const DEFAULT_CONFIG_CONTENT: &str = indoc! {r##"
    # This is a default config file for skyview. All of the settings are
    # commented out; uncomment and change them to take effect.

    #[strings]
    # Shown by the fallback layout when a widget has no forecast data.
    #widget_error = "Problem loading widget"

    #[refresh]
    # How often the host loop asks for widget updates. At least "60s".
    #rate = "30m"

    # Host-side names for the two layouts and each view slot.
    #[layout]
    #forecast = "widget_forecast"
    #fallback = "widget_loading"
    #location = "location"
    #conditions = "conditions"
    #icon = "icon"
    #current_temp = "current_temp"
    #high_and_low = "high_and_low"
    #update_marker = "update_marker"
    #message = "message"

    # Icon resolution rules, tried in order before the built-in table.
    # `pattern` is a regex over the source icon reference.
    #[[icons.rules]]
    #pattern = "(?i)hail"
    #day = "snow"
    #night = "snow"
"##};
