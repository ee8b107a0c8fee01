//! Typed message contract with the presentation layer.
//!
//! Inbound [`UiEvent`]s are raw overlay callbacks mapped to data; outbound
//! [`Action`]s are one-shot commands consumed at most once. Neither side
//! carries logic.

use serde::{Deserialize, Serialize};

use crate::config::{CycleMode, MacroConfig};
use crate::drag::{DragDown, DragMove};
use crate::state::ClickPointDraft;

/// Inbound events, delivered in order by a single presentation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiEvent {
    /// Screen dimensions, fired once when the overlay attaches.
    ScreenSizeInitialized { width: i32, height: i32 },
    PlayClicked,
    PauseClicked,
    AddPointClicked,
    RemovePointClicked,
    CloseClicked,
    ConfigDialogOpened,
    ConfigCyclesTextChanged { text: String },
    ConfigModeChanged { mode: CycleMode },
    ConfigSaved,
    ConfigCancelled,
    /// Tap (not drag) on a click point marker.
    PointTapped { index: u32 },
    PointDelayTextChanged { text: String },
    PointConfigSaved,
    PointConfigCancelled,
    BarDragDown { down: DragDown },
    BarDragMove { mv: DragMove },
    PointDragDown { index: u32, down: DragDown },
    PointDragMove { index: u32, mv: DragMove },
}

/// Outbound one-shot commands. Delivery is lossless and ordered; the core
/// never learns whether the host call behind a command succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// Ask the host service to terminate itself.
    DisableSelf,
    /// Dispatch a synthetic tap at absolute screen coordinates.
    PerformClick { x: i32, y: i32 },
    ShowMacroConfigDialog { config: MacroConfig },
    UpdateMacroConfigDialog { config: MacroConfig },
    DismissMacroConfigDialog,
    ShowPointConfigDialog { draft: ClickPointDraft },
    UpdatePointConfigDialog { draft: ClickPointDraft },
    DismissPointConfigDialog,
}
