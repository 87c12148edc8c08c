//! The widget provider: the lifecycle hooks a host runtime invokes, and
//! the renderer that turns store rows into a [`RenderedView`].

use std::sync::Arc;

use log::{debug, warn};
use time::OffsetDateTime;

use crate::{
    constants::DEFAULT_WIDGET_ERROR,
    convert::{current_temp_text, high_low_text, status_marker},
    dispatch::{HostRuntime, UpdateDispatcher},
    icons::{is_daytime, IconSet},
    store::{ForecastStore, UnixMillis, UpdateStatus, WidgetId, WidgetStore},
    view::{RenderedView, Slot},
};

/// The capability interface the host runtime drives. Callbacks arrive on
/// the host's dispatch thread and must return promptly; anything that
/// touches the store beyond a point delete is deferred to the dispatcher.
pub trait WidgetHooks {
    /// The host requests fresh content for `ids`; an empty slice means
    /// every id currently registered for this widget kind.
    fn on_update(&self, ids: &[WidgetId]);

    /// The host has deregistered `ids`; their stored rows are dropped.
    fn on_removed(&self, ids: &[WidgetId]);
}

/// Knobs for rendering, resolved from configuration.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// The localized message shown by the fallback layout.
    pub error_message: String,
    pub icons: IconSet,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            error_message: DEFAULT_WIDGET_ERROR.to_string(),
            icons: IconSet::default(),
        }
    }
}

/// Builds view updates for medium forecast widgets.
///
/// Rendering never fails observably: a missing widget row degrades to
/// defaults, and a missing forecast row (or any store error) degrades to
/// the fallback layout. The host always receives a complete view.
pub struct WidgetRenderer {
    widgets: Arc<dyn WidgetStore>,
    forecasts: Arc<dyn ForecastStore>,
    settings: RenderSettings,
}

impl WidgetRenderer {
    pub fn new(
        widgets: Arc<dyn WidgetStore>, forecasts: Arc<dyn ForecastStore>,
        settings: RenderSettings,
    ) -> Self {
        Self {
            widgets,
            forecasts,
            settings,
        }
    }

    /// Builds the update for one widget against the current clock.
    ///
    /// Blocks on store queries; call it from a worker, not from the host's
    /// dispatch thread. The dispatcher upholds this for hook-driven
    /// updates.
    pub fn build_update(&self, id: WidgetId) -> RenderedView {
        self.build_update_at(id, local_now())
    }

    /// Builds the update for one widget as of `now`. The timestamp feeds
    /// both the nearest-forecast lookup and the day/night icon choice.
    pub fn build_update_at(&self, id: WidgetId, now: OffsetDateTime) -> RenderedView {
        debug!("building widget update for id={id}");

        // Widget row first; absence (or a store error) just leaves the
        // defaults in place.
        let mut title = String::new();
        let mut temp_unit = String::new();
        let mut current_temp = 0;
        let mut update_status = UpdateStatus::Failure;

        match self.widgets.widget(id) {
            Ok(Some(record)) => {
                title = record.title;
                temp_unit = record.temp_unit;
                current_temp = record.current_temp;
                update_status = record.update_status;
            }
            Ok(None) => {}
            Err(e) => warn!("widget row query failed for id={id}: {e}"),
        }

        // Forecast nearest now decides which layout we end up with.
        let at: UnixMillis = (now.unix_timestamp_nanos() / 1_000_000) as UnixMillis;
        let forecast = match self.forecasts.forecast_nearest(id, at) {
            Ok(row) => row,
            Err(e) => {
                warn!("forecast query failed for id={id}: {e}");
                None
            }
        };

        let Some(forecast) = forecast else {
            return RenderedView::fallback(id, &self.settings.error_message);
        };

        let mut view = RenderedView::forecast(id);
        view.set_text(Slot::Location, title);
        view.set_text(Slot::Conditions, forecast.conditions);
        view.set_image(
            Slot::Icon,
            self.settings.icons.resolve(&forecast.icon_url, is_daytime(now)),
        );
        view.set_text(Slot::CurrentTemp, current_temp_text(current_temp, &temp_unit));

        match high_low_text(forecast.temp_high, forecast.temp_low, &temp_unit) {
            Some(text) => {
                view.set_visibility(Slot::HighAndLow, true);
                view.set_text(Slot::HighAndLow, text);
            }
            None => view.set_visibility(Slot::HighAndLow, false),
        }

        view.set_text(Slot::UpdateMarker, status_marker(update_status));

        view
    }
}

/// The provider the host runtime registers its callbacks against.
pub struct ForecastWidgetProvider {
    widgets: Arc<dyn WidgetStore>,
    dispatcher: Arc<UpdateDispatcher>,
    host: Arc<dyn HostRuntime>,
}

impl ForecastWidgetProvider {
    pub fn new(
        widgets: Arc<dyn WidgetStore>, dispatcher: Arc<UpdateDispatcher>,
        host: Arc<dyn HostRuntime>,
    ) -> Self {
        Self {
            widgets,
            dispatcher,
            host,
        }
    }
}

impl WidgetHooks for ForecastWidgetProvider {
    fn on_update(&self, ids: &[WidgetId]) {
        // If no specific widgets were requested, refresh every registered one.
        let ids = if ids.is_empty() {
            self.host.registered_ids()
        } else {
            ids.to_vec()
        };

        self.dispatcher.request_update(&ids);
        self.dispatcher.start();
    }

    fn on_removed(&self, ids: &[WidgetId]) {
        for &id in ids {
            match self.widgets.delete_widget(id) {
                Ok(removed) => debug!("deleted widget id={id} (row existed: {removed})"),
                Err(e) => warn!("failed to delete widget id={id}: {e}"),
            }
        }
    }
}

/// The current wall-clock time in the local offset, or UTC when the local
/// offset cannot be determined (e.g. multi-threaded Unix processes).
pub(crate) fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
