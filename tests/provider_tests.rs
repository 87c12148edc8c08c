//! Renderer and provider behavior over the in-memory store.

use std::sync::{Arc, Mutex};

use skyview::{
    dispatch::{HostRuntime, UpdateDispatcher},
    icons::ForecastIcon,
    provider::{ForecastWidgetProvider, RenderSettings, WidgetHooks, WidgetRenderer},
    store::{
        memory::MemoryStore, ForecastRecord, ForecastStore, StoreError, StoreResult, UnixMillis,
        UpdateStatus, WidgetId, WidgetRecord, WidgetStore,
    },
    view::{ClickAction, RenderedView, Slot, ViewKind},
};
use time::macros::datetime;

const NOON: time::OffsetDateTime = datetime!(2024-06-01 12:00 UTC);
const NOON_MS: UnixMillis = 1_717_243_200_000;

fn home_widget() -> WidgetRecord {
    WidgetRecord {
        id: 1,
        title: "Home".to_string(),
        temp_unit: "°F".to_string(),
        current_temp: 72,
        update_status: UpdateStatus::Success,
    }
}

fn clear_forecast() -> ForecastRecord {
    ForecastRecord {
        widget_id: 1,
        valid_at: NOON_MS,
        conditions: "Clear".to_string(),
        temp_high: Some(80),
        temp_low: Some(60),
        icon_url: "clear.png".to_string(),
    }
}

fn renderer_over(store: Arc<MemoryStore>) -> WidgetRenderer {
    WidgetRenderer::new(store.clone(), store, RenderSettings::default())
}

#[test]
fn filled_layout_scenario() {
    let store = Arc::new(MemoryStore::new());
    store.upsert_widget(home_widget());
    store.insert_forecast(clear_forecast());

    let view = renderer_over(store).build_update_at(1, NOON);

    assert_eq!(view.kind(), ViewKind::Forecast);
    assert_eq!(view.text_of(Slot::Location), Some("Home"));
    assert_eq!(view.text_of(Slot::Conditions), Some("Clear"));
    assert_eq!(view.text_of(Slot::CurrentTemp), Some("72°F"));
    assert_eq!(view.text_of(Slot::HighAndLow), Some("80/60°F"));
    assert_eq!(view.visibility_of(Slot::HighAndLow), Some(true));
    assert_eq!(view.text_of(Slot::UpdateMarker), Some(""));
    assert_eq!(view.image_of(Slot::Icon), Some(ForecastIcon::ClearDay));
    assert_eq!(view.click(), ClickAction::OpenDetails(1));
}

#[test]
fn night_renders_the_night_icon() {
    let store = Arc::new(MemoryStore::new());
    store.upsert_widget(home_widget());
    store.insert_forecast(clear_forecast());

    let view = renderer_over(store).build_update_at(1, datetime!(2024-06-01 23:00 UTC));

    assert_eq!(view.image_of(Slot::Icon), Some(ForecastIcon::ClearNight));
}

#[test]
fn missing_widget_row_falls_back_to_defaults() {
    let store = Arc::new(MemoryStore::new());
    store.insert_forecast(clear_forecast());

    let view = renderer_over(store).build_update_at(1, NOON);

    // The forecast row is what decides the layout; the widget fields just
    // default out.
    assert_eq!(view.kind(), ViewKind::Forecast);
    assert_eq!(view.text_of(Slot::Location), Some(""));
    assert_eq!(view.text_of(Slot::CurrentTemp), Some("0"));
    assert_eq!(view.text_of(Slot::UpdateMarker), Some("*"));
}

#[test]
fn missing_forecast_dominates() {
    let store = Arc::new(MemoryStore::new());
    store.upsert_widget(home_widget());

    let view = renderer_over(store).build_update_at(1, NOON);

    assert_eq!(view.kind(), ViewKind::Fallback);
    assert_eq!(view.text_of(Slot::Message), Some("Problem loading widget"));
    assert_eq!(view.ops().len(), 1);
    assert_eq!(view.click(), ClickAction::OpenDetails(1));
}

#[test]
fn nothing_stored_renders_the_fallback() {
    let store = Arc::new(MemoryStore::new());

    let view = renderer_over(store).build_update_at(9, NOON);

    assert_eq!(view.kind(), ViewKind::Fallback);
    assert_eq!(view.click(), ClickAction::OpenDetails(9));
}

#[test]
fn partial_high_low_hides_the_slot() {
    let store = Arc::new(MemoryStore::new());
    store.upsert_widget(home_widget());
    store.insert_forecast(ForecastRecord {
        temp_high: None,
        ..clear_forecast()
    });

    let view = renderer_over(store).build_update_at(1, NOON);

    assert_eq!(view.kind(), ViewKind::Forecast);
    assert_eq!(view.visibility_of(Slot::HighAndLow), Some(false));
    assert_eq!(view.text_of(Slot::HighAndLow), None);
}

#[test]
fn failed_refresh_shows_the_marker() {
    let store = Arc::new(MemoryStore::new());
    store.upsert_widget(WidgetRecord {
        update_status: UpdateStatus::Failure,
        ..home_widget()
    });
    store.insert_forecast(clear_forecast());

    let view = renderer_over(store).build_update_at(1, NOON);

    assert_eq!(view.kind(), ViewKind::Forecast);
    assert_eq!(view.text_of(Slot::UpdateMarker), Some("*"));
}

#[test]
fn configured_error_message_is_used() {
    let store = Arc::new(MemoryStore::new());
    let renderer = WidgetRenderer::new(
        store.clone(),
        store,
        RenderSettings {
            error_message: "Geen weerbericht".to_string(),
            ..RenderSettings::default()
        },
    );

    let view = renderer.build_update_at(1, NOON);

    assert_eq!(view.text_of(Slot::Message), Some("Geen weerbericht"));
}

/// A store whose queries always fail, to exercise the degradation paths.
struct BrokenStore;

impl WidgetStore for BrokenStore {
    fn widget(&self, _id: WidgetId) -> StoreResult<Option<WidgetRecord>> {
        Err(StoreError::backend("no connection"))
    }

    fn delete_widget(&self, _id: WidgetId) -> StoreResult<bool> {
        Err(StoreError::backend("no connection"))
    }
}

impl ForecastStore for BrokenStore {
    fn forecast_nearest(
        &self, _id: WidgetId, _at: UnixMillis,
    ) -> StoreResult<Option<ForecastRecord>> {
        Err(StoreError::backend("no connection"))
    }
}

#[test]
fn store_errors_degrade_like_missing_rows() {
    let broken = Arc::new(BrokenStore);
    let renderer = WidgetRenderer::new(broken.clone(), broken, RenderSettings::default());

    // Both queries fail: same fallback as "nothing stored".
    let view = renderer.build_update_at(1, NOON);
    assert_eq!(view.kind(), ViewKind::Fallback);

    // Only the widget query fails: still a filled layout, default fields.
    let forecasts = Arc::new(MemoryStore::new());
    forecasts.insert_forecast(clear_forecast());
    let renderer =
        WidgetRenderer::new(Arc::new(BrokenStore), forecasts, RenderSettings::default());

    let view = renderer.build_update_at(1, NOON);
    assert_eq!(view.kind(), ViewKind::Forecast);
    assert_eq!(view.text_of(Slot::CurrentTemp), Some("0"));
    assert_eq!(view.text_of(Slot::UpdateMarker), Some("*"));
}

struct StaticHost {
    ids: Vec<WidgetId>,
    pushed: Mutex<Vec<(WidgetId, ViewKind)>>,
}

impl HostRuntime for StaticHost {
    fn registered_ids(&self) -> Vec<WidgetId> {
        self.ids.clone()
    }

    fn push_update(&self, id: WidgetId, view: RenderedView) {
        self.pushed.lock().unwrap().push((id, view.kind()));
    }
}

#[test]
fn empty_update_request_refreshes_every_registered_widget() {
    let store = Arc::new(MemoryStore::new());
    store.upsert_widget(home_widget());
    store.insert_forecast(clear_forecast());

    let host = Arc::new(StaticHost {
        ids: vec![1, 2],
        pushed: Mutex::new(Vec::new()),
    });
    let renderer = Arc::new(renderer_over(store.clone()));
    let dispatcher = Arc::new(UpdateDispatcher::new(renderer, host.clone()));
    let provider = ForecastWidgetProvider::new(store, dispatcher.clone(), host.clone());

    provider.on_update(&[]);
    dispatcher.shutdown();

    let pushed = host.pushed.lock().unwrap();
    assert_eq!(pushed.as_slice(), &[(1, ViewKind::Forecast), (2, ViewKind::Fallback)]);
}

#[test]
fn on_removed_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    store.upsert_widget(home_widget());
    store.insert_forecast(clear_forecast());

    let host = Arc::new(StaticHost {
        ids: vec![1],
        pushed: Mutex::new(Vec::new()),
    });
    let renderer = Arc::new(renderer_over(store.clone()));
    let dispatcher = Arc::new(UpdateDispatcher::new(renderer, host.clone()));
    let provider = ForecastWidgetProvider::new(store.clone(), dispatcher, host);

    provider.on_removed(&[1, 2]);
    assert!(store.widget(1).unwrap().is_none());

    // The second pass deletes nothing and must not raise.
    provider.on_removed(&[1, 2]);
    assert!(store.widget(1).unwrap().is_none());
}
