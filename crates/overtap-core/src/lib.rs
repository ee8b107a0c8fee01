//! overtap-core: overlay automation state core + macro playback.
//!
//! Design goal: keep this crate UI-agnostic and platform-agnostic. The
//! overlay windows, accessibility plumbing and gesture dispatch live in
//! the host layer; this crate consumes typed [`UiEvent`]s, publishes state
//! snapshots through `watch` streams and emits one-shot [`Action`]s.

mod config;
mod coordinator;
mod drag;
mod event;
mod player;
mod state;

pub use config::{parse_delay_ms, ConfigError, CycleMode, MacroConfig};
pub use coordinator::Coordinator;
pub use drag::{clamp_axis, DragDown, DragMove, DragState, Draggable, ViewSizes};
pub use event::{Action, UiEvent};
pub use state::{
    ActionBarState, ClickPoint, ClickPointConfigDialogState, ClickPointDraft, ClickPointsState,
    MacroConfigDialogState, MacroState, DEFAULT_DELAY_MS,
};
