//! Widget and forecast records, and the query traits the renderer reads
//! them through.
//!
//! The records themselves are owned by whatever store backs the traits;
//! this crate only ever reads them (and deletes widget rows when the host
//! deregisters a widget).

pub mod memory;

use std::borrow::Cow;

use thiserror::Error;

/// Identifies one installed widget instance and its backing store row.
pub type WidgetId = u64;

/// A unix timestamp in milliseconds.
pub type UnixMillis = i64;

/// A type alias for handling store-related errors.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The errors that can happen when talking to a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error when there is an IO exception.
    #[error(transparent)]
    InvalidIo(#[from] std::io::Error),
    /// An error from the backend itself.
    #[error("backend error, {0}")]
    Backend(Cow<'static, str>),
    /// A row that could not be decoded into a record.
    #[error("corrupt record, {0}")]
    Corrupt(Cow<'static, str>),
}

impl StoreError {
    /// A generic backend error.
    pub fn backend<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        Self::Backend(reason.into())
    }
}

/// Whether the last background refresh for a widget succeeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateStatus {
    Success,
    /// The last refresh did not complete; rendered as a terse marker.
    #[default]
    Failure,
}

/// One widget row: identity plus the fields the medium layout displays.
#[derive(Clone, Debug)]
pub struct WidgetRecord {
    pub id: WidgetId,
    /// User-visible location title, e.g. `"Home"`.
    pub title: String,
    /// Display suffix for temperatures, e.g. `"°F"`.
    pub temp_unit: String,
    pub current_temp: i32,
    pub update_status: UpdateStatus,
}

/// One forecast row associated to a widget at a point in time.
///
/// `temp_high`/`temp_low` are `None` when the source did not report a
/// bound; the high/low slot is hidden unless both are present.
#[derive(Clone, Debug)]
pub struct ForecastRecord {
    pub widget_id: WidgetId,
    /// When this forecast applies, as a unix millisecond timestamp.
    pub valid_at: UnixMillis,
    pub conditions: String,
    pub temp_high: Option<i32>,
    pub temp_low: Option<i32>,
    /// Source icon reference; resolved to a display icon via [`crate::icons`].
    pub icon_url: String,
}

/// Point lookup and removal of widget rows.
pub trait WidgetStore: Send + Sync {
    /// Returns the widget row for `id`, or `None` if no such row exists.
    fn widget(&self, id: WidgetId) -> StoreResult<Option<WidgetRecord>>;

    /// Deletes the widget row for `id`. Returns whether a row was removed;
    /// deleting an id with no row is `Ok(false)`, not an error.
    fn delete_widget(&self, id: WidgetId) -> StoreResult<bool>;
}

/// Nearest-in-time forecast lookup.
pub trait ForecastStore: Send + Sync {
    /// Returns the forecast row for `id` whose `valid_at` is closest to
    /// `at`, or `None` if the widget has no forecast rows. Ties resolve to
    /// the earlier row.
    fn forecast_nearest(&self, id: WidgetId, at: UnixMillis) -> StoreResult<Option<ForecastRecord>>;
}
