//! Overlay state containers: action bar, click points, macro, dialogs.
//!
//! Every container is an immutable snapshot; mutation replaces the
//! container wholesale through its `watch` channel, never a field in
//! place. That keeps the broadcast model torn-read free with no locking.

use serde::{Deserialize, Serialize};

use crate::config::{parse_delay_ms, ConfigError, MacroConfig};
use crate::drag::{DragState, Draggable};

/// Tap delay for a freshly added click point, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// One user-placed tap marker. Identity is `index`; no two points in a
/// list share one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickPoint {
    pub index: u32,
    pub drag: DragState,
    pub delay_ms: u64,
}

impl ClickPoint {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            drag: DragState::default(),
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl Draggable for ClickPoint {
    fn drag_state(&self) -> &DragState {
        &self.drag
    }
}

/// Ordered click point list; list order is playback order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickPointsState {
    pub points: Vec<ClickPoint>,
}

impl ClickPointsState {
    /// Index for the next added point: highest existing index + 1, or 1
    /// when the list is empty.
    pub fn next_index(&self) -> u32 {
        self.points.iter().map(|p| p.index).max().unwrap_or(0) + 1
    }

    pub fn find(&self, index: u32) -> Option<&ClickPoint> {
        self.points.iter().find(|p| p.index == index)
    }
}

/// Playback flag plus the committed cycle configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroState {
    pub is_playing: bool,
    pub config: MacroConfig,
}

/// Floating control bar state. `is_playing` mirrors [`MacroState`] so the
/// bar can bind its play/pause toggle without a second subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionBarState {
    pub drag: DragState,
    pub is_playing: bool,
}

impl Draggable for ActionBarState {
    fn drag_state(&self) -> &DragState {
        &self.drag
    }
}

/// Macro config dialog: holds the uncommitted draft while the dialog is
/// open, `None` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroConfigDialogState {
    pub draft: Option<MacroConfig>,
}

/// Draft of one click point's delay dialog. The target point is identified
/// by index so it can vanish independently of the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickPointDraft {
    pub index: u32,
    pub delay_text: String,
}

impl ClickPointDraft {
    /// Parse the raw delay text, in milliseconds.
    pub fn delay_ms(&self) -> Result<u64, ConfigError> {
        parse_delay_ms(&self.delay_text)
    }

    pub fn is_valid(&self) -> bool {
        self.delay_ms().is_ok()
    }
}

/// Click point delay dialog: `Some` while open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickPointConfigDialogState {
    pub draft: Option<ClickPointDraft>,
}
