//! The rendered output: a flat tree of slot assignments plus one click
//! binding, handed to the host to draw. Views are built fresh per render
//! and carry no identity of their own.

use crate::{icons::ForecastIcon, store::WidgetId};

/// The named view slots a layout exposes. Hosts map these to their own
/// resource identifiers through the `[layout]` configuration table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Root,
    Location,
    Conditions,
    Icon,
    CurrentTemp,
    HighAndLow,
    UpdateMarker,
    Message,
}

impl Slot {
    /// The default host-side name for this slot, used when the layout
    /// configuration does not override it.
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Root => "root",
            Slot::Location => "location",
            Slot::Conditions => "conditions",
            Slot::Icon => "icon",
            Slot::CurrentTemp => "current_temp",
            Slot::HighAndLow => "high_and_low",
            Slot::UpdateMarker => "update_marker",
            Slot::Message => "message",
        }
    }
}

/// Which of the two layouts a view populates. A view is wholly one or the
/// other; the constructors on [`RenderedView`] are the only way to pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    /// The filled forecast layout.
    Forecast,
    /// The degraded loading/error layout.
    Fallback,
}

/// What activating the root view should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    /// Open the details screen for this widget.
    OpenDetails(WidgetId),
}

/// One field assignment in the view tree.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewOp {
    SetText { slot: Slot, text: String },
    SetImage { slot: Slot, icon: ForecastIcon },
    SetVisibility { slot: Slot, visible: bool },
}

/// A renderable description of one widget, ready for the host.
#[derive(Clone, Debug)]
pub struct RenderedView {
    kind: ViewKind,
    ops: Vec<ViewOp>,
    click: ClickAction,
}

impl RenderedView {
    /// Starts an empty forecast-layout view for `id`, with the click
    /// binding already attached.
    pub fn forecast(id: WidgetId) -> Self {
        Self {
            kind: ViewKind::Forecast,
            ops: Vec::new(),
            click: ClickAction::OpenDetails(id),
        }
    }

    /// The fallback layout: a single message, everything else absent.
    pub fn fallback(id: WidgetId, message: &str) -> Self {
        Self {
            kind: ViewKind::Fallback,
            ops: vec![ViewOp::SetText {
                slot: Slot::Message,
                text: message.to_string(),
            }],
            click: ClickAction::OpenDetails(id),
        }
    }

    pub fn set_text<T: Into<String>>(&mut self, slot: Slot, text: T) {
        self.ops.push(ViewOp::SetText {
            slot,
            text: text.into(),
        });
    }

    pub fn set_image(&mut self, slot: Slot, icon: ForecastIcon) {
        self.ops.push(ViewOp::SetImage { slot, icon });
    }

    pub fn set_visibility(&mut self, slot: Slot, visible: bool) {
        self.ops.push(ViewOp::SetVisibility { slot, visible });
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn click(&self) -> ClickAction {
        self.click
    }

    pub fn ops(&self) -> &[ViewOp] {
        &self.ops
    }

    /// The last text assigned to `slot`, if any.
    pub fn text_of(&self, slot: Slot) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            ViewOp::SetText { slot: s, text } if *s == slot => Some(text.as_str()),
            _ => None,
        })
    }

    /// The last image assigned to `slot`, if any.
    pub fn image_of(&self, slot: Slot) -> Option<ForecastIcon> {
        self.ops.iter().rev().find_map(|op| match op {
            ViewOp::SetImage { slot: s, icon } if *s == slot => Some(*icon),
            _ => None,
        })
    }

    /// The last visibility assigned to `slot`; `None` means untouched.
    pub fn visibility_of(&self, slot: Slot) -> Option<bool> {
        self.ops.iter().rev().find_map(|op| match op {
            ViewOp::SetVisibility { slot: s, visible } if *s == slot => Some(*visible),
            _ => None,
        })
    }
}
