//! An in-process store over hash maps. Backs the demo host and tests;
//! anything that can satisfy the two query traits works in its place.

use std::sync::RwLock;

use hashbrown::HashMap;

use super::{
    ForecastRecord, ForecastStore, StoreError, StoreResult, UnixMillis, WidgetId, WidgetRecord,
    WidgetStore,
};

#[derive(Default)]
struct Tables {
    widgets: HashMap<WidgetId, WidgetRecord>,
    /// Forecast rows per widget, in insertion order. Rows are few per
    /// widget, so nearest-lookup is a linear scan.
    forecasts: HashMap<WidgetId, Vec<ForecastRecord>>,
}

/// A thread-safe in-memory implementation of both store traits.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the widget row for `record.id`.
    pub fn upsert_widget(&self, record: WidgetRecord) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.widgets.insert(record.id, record);
    }

    /// Adds a forecast row for its widget.
    pub fn insert_forecast(&self, record: ForecastRecord) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.forecasts.entry(record.widget_id).or_default().push(record);
    }

    pub fn widget_ids(&self) -> Vec<WidgetId> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        let mut ids: Vec<WidgetId> = tables.widgets.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl WidgetStore for MemoryStore {
    fn widget(&self, id: WidgetId) -> StoreResult<Option<WidgetRecord>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.widgets.get(&id).cloned())
    }

    fn delete_widget(&self, id: WidgetId) -> StoreResult<bool> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        let removed = tables.widgets.remove(&id).is_some();
        // A deregistered widget's forecast rows are unreachable; drop them too.
        tables.forecasts.remove(&id);
        Ok(removed)
    }
}

impl ForecastStore for MemoryStore {
    fn forecast_nearest(&self, id: WidgetId, at: UnixMillis) -> StoreResult<Option<ForecastRecord>> {
        let tables = self.tables.read().map_err(poisoned)?;
        let Some(rows) = tables.forecasts.get(&id) else {
            return Ok(None);
        };

        Ok(rows
            .iter()
            .min_by_key(|row| (row.valid_at.abs_diff(at), row.valid_at))
            .cloned())
    }
}

fn poisoned<G>(_: std::sync::PoisonError<G>) -> StoreError {
    StoreError::backend("store lock poisoned")
}
