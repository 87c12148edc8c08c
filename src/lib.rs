//! A home-screen weather widget provider.
//!
//! A host runtime delivers lifecycle callbacks through [`WidgetHooks`];
//! update requests are queued on the [`UpdateDispatcher`] so store queries
//! never run on the host's dispatch thread. The worker asks the
//! [`WidgetRenderer`] to turn a widget's stored row and its
//! nearest-in-time forecast into a [`RenderedView`] — a flat tree of slot
//! assignments plus a click binding — which the host draws. Missing data
//! never surfaces as an error: it degrades to defaults or to the fallback
//! layout.
//!
//! ```
//! use std::sync::Arc;
//!
//! use skyview::{
//!     provider::{RenderSettings, WidgetRenderer},
//!     store::memory::MemoryStore,
//!     view::ViewKind,
//! };
//!
//! let store = Arc::new(MemoryStore::new());
//! let renderer = WidgetRenderer::new(store.clone(), store, RenderSettings::default());
//!
//! // No rows for this widget yet, so the renderer degrades.
//! assert_eq!(renderer.build_update(42).kind(), ViewKind::Fallback);
//! ```

#![warn(rust_2018_idioms)]

pub mod constants;
pub mod convert;
pub mod dispatch;
pub mod icons;
pub mod options;
pub mod provider;
pub mod store;
pub mod view;

pub mod utils {
    pub mod logging;
}

pub use dispatch::{HostRuntime, UpdateDispatcher};
pub use provider::{ForecastWidgetProvider, RenderSettings, WidgetHooks, WidgetRenderer};
pub use store::{ForecastRecord, ForecastStore, UpdateStatus, WidgetId, WidgetRecord, WidgetStore};
pub use view::{ClickAction, RenderedView, Slot, ViewKind, ViewOp};
