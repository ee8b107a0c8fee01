//! Core event loop: consumes UI events, owns every state stream, emits
//! one-shot actions, drives the macro player.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::config::MacroConfig;
use crate::drag::{Draggable, ViewSizes};
use crate::event::{Action, UiEvent};
use crate::player::{MacroPlayer, PlaybackRun};
use crate::state::{
    ActionBarState, ClickPoint, ClickPointConfigDialogState, ClickPointDraft, ClickPointsState,
    MacroConfigDialogState, MacroState,
};

/// Stateful reactive core behind the overlay windows.
///
/// [`Coordinator::on_event`] must be called from a single logical thread
/// (the presentation event thread). State containers are single-writer and
/// published wholesale through `watch` channels; any number of observers
/// may subscribe. One-shot [`Action`]s go through the channel handed out
/// by [`Coordinator::new`] and are consumed at most once.
pub struct Coordinator {
    rt: Handle,
    view_sizes: ViewSizes,
    player: MacroPlayer,
    action_bar: Arc<watch::Sender<ActionBarState>>,
    click_points: watch::Sender<ClickPointsState>,
    macro_state: Arc<watch::Sender<MacroState>>,
    macro_config_dialog: watch::Sender<MacroConfigDialogState>,
    point_config_dialog: watch::Sender<ClickPointConfigDialogState>,
    actions: mpsc::UnboundedSender<Action>,
}

impl Coordinator {
    /// Create the coordinator plus the receiving end of the action stream.
    ///
    /// `rt` is the runtime the player task is spawned on; its lifetime is
    /// owned by the hosting process. `marker_size` is the pixel size of a
    /// click point marker, used for drag bounds.
    pub fn new(rt: Handle, marker_size: i32) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (actions, actions_rx) = mpsc::unbounded_channel();
        let (action_bar, _) = watch::channel(ActionBarState::default());
        let (click_points, _) = watch::channel(ClickPointsState::default());
        let (macro_state, _) = watch::channel(MacroState::default());
        let (macro_config_dialog, _) = watch::channel(MacroConfigDialogState::default());
        let (point_config_dialog, _) = watch::channel(ClickPointConfigDialogState::default());

        let coordinator = Self {
            rt,
            view_sizes: ViewSizes {
                marker_size,
                ..ViewSizes::default()
            },
            player: MacroPlayer::default(),
            action_bar: Arc::new(action_bar),
            click_points,
            macro_state: Arc::new(macro_state),
            macro_config_dialog,
            point_config_dialog,
            actions,
        };

        (coordinator, actions_rx)
    }

    /// Latest-value stream of the action bar state.
    pub fn action_bar_state(&self) -> watch::Receiver<ActionBarState> {
        self.action_bar.subscribe()
    }

    /// Latest-value stream of the click point list.
    pub fn click_points_state(&self) -> watch::Receiver<ClickPointsState> {
        self.click_points.subscribe()
    }

    /// Latest-value stream of the macro state.
    pub fn macro_state(&self) -> watch::Receiver<MacroState> {
        self.macro_state.subscribe()
    }

    /// Latest-value stream of the macro config dialog.
    pub fn macro_config_dialog_state(&self) -> watch::Receiver<MacroConfigDialogState> {
        self.macro_config_dialog.subscribe()
    }

    /// Latest-value stream of the click point delay dialog.
    pub fn point_config_dialog_state(&self) -> watch::Receiver<ClickPointConfigDialogState> {
        self.point_config_dialog.subscribe()
    }

    /// Single entry point for the presentation layer.
    ///
    /// Synchronous: state is mutated before this returns, in delivery
    /// order. Actions emitted for one event preserve their emission order
    /// relative to each other.
    pub fn on_event(&mut self, event: UiEvent) {
        debug!(?event, "ui event");

        match event {
            UiEvent::ScreenSizeInitialized { width, height } => {
                self.view_sizes.screen_width = width;
                self.view_sizes.screen_height = height;
            }
            UiEvent::PlayClicked => {
                self.start_playback();
            }
            UiEvent::PauseClicked => {
                self.stop_playback();
            }
            UiEvent::AddPointClicked => {
                self.click_points.send_modify(|state| {
                    let point = ClickPoint::new(state.next_index());
                    state.points.push(point);
                });
            }
            UiEvent::RemovePointClicked => {
                self.click_points.send_modify(|state| {
                    state.points.pop();
                });
            }
            UiEvent::CloseClicked => {
                self.stop_playback();
                self.emit(Action::DisableSelf);
            }
            UiEvent::BarDragDown { down } => {
                self.action_bar.send_modify(|bar| bar.drag = bar.on_drag_down(&down));
            }
            UiEvent::BarDragMove { mv } => {
                let sizes = self.view_sizes;
                self.action_bar
                    .send_modify(|bar| bar.drag = bar.on_drag_move(&mv, &sizes));
            }
            UiEvent::PointDragDown { index, down } => {
                self.with_point(index, |point| point.drag = point.on_drag_down(&down));
            }
            UiEvent::PointDragMove { index, mv } => {
                let sizes = self.view_sizes;
                self.with_point(index, |point| point.drag = point.on_drag_move(&mv, &sizes));
            }
            UiEvent::ConfigDialogOpened => {
                let draft = self.macro_state.borrow().config.clone();
                self.macro_config_dialog
                    .send_modify(|dialog| dialog.draft = Some(draft.clone()));
                self.emit(Action::ShowMacroConfigDialog { config: draft });
            }
            UiEvent::ConfigCyclesTextChanged { text } => {
                self.update_config_draft(|config| config.cycles_text = text);
            }
            UiEvent::ConfigModeChanged { mode } => {
                self.update_config_draft(|config| config.cycle_mode = mode);
            }
            UiEvent::ConfigSaved => {
                let Some(config) = self.macro_config_dialog.borrow().draft.clone() else {
                    warn!("config save without an open dialog");
                    return;
                };
                if !config.is_valid() {
                    debug!(?config, "rejected invalid macro config");
                    return;
                }

                self.macro_state.send_modify(|state| state.config = config);
                self.macro_config_dialog.send_modify(|dialog| dialog.draft = None);
                self.emit(Action::DismissMacroConfigDialog);
            }
            UiEvent::ConfigCancelled => {
                self.macro_config_dialog.send_modify(|dialog| dialog.draft = None);
                self.emit(Action::DismissMacroConfigDialog);
            }
            UiEvent::PointTapped { index } => {
                let Some(point) = self.click_points.borrow().find(index).cloned() else {
                    warn!(index, "tap on unknown click point");
                    return;
                };

                let draft = ClickPointDraft {
                    index,
                    delay_text: point.delay_ms.to_string(),
                };
                self.point_config_dialog
                    .send_modify(|dialog| dialog.draft = Some(draft.clone()));
                self.emit(Action::ShowPointConfigDialog { draft });
            }
            UiEvent::PointDelayTextChanged { text } => {
                let mut updated = None;
                self.point_config_dialog.send_modify(|dialog| {
                    if let Some(draft) = dialog.draft.as_mut() {
                        draft.delay_text = text.clone();
                        updated = Some(draft.clone());
                    }
                });

                match updated {
                    Some(draft) => self.emit(Action::UpdatePointConfigDialog { draft }),
                    None => warn!("delay edit without an open dialog"),
                }
            }
            UiEvent::PointConfigSaved => {
                let Some(draft) = self.point_config_dialog.borrow().draft.clone() else {
                    warn!("point config save without an open dialog");
                    return;
                };
                let Ok(delay_ms) = draft.delay_ms() else {
                    debug!(?draft, "rejected invalid click point delay");
                    return;
                };

                // The target may have been removed while the dialog was
                // open; the dialog still closes.
                self.with_point(draft.index, |point| point.delay_ms = delay_ms);
                self.point_config_dialog.send_modify(|dialog| dialog.draft = None);
                self.emit(Action::DismissPointConfigDialog);
            }
            UiEvent::PointConfigCancelled => {
                self.point_config_dialog.send_modify(|dialog| dialog.draft = None);
                self.emit(Action::DismissPointConfigDialog);
            }
        }
    }

    /// Start (or restart) macro playback. A run already in flight is
    /// superseded: it is cancelled before the new one is spawned so two
    /// loops never race on the same click point snapshot.
    fn start_playback(&mut self) {
        self.set_playing(true);

        let run = PlaybackRun {
            points: self.click_points.borrow().points.clone(),
            cycles: self.macro_state.borrow().config.cycles(),
            sizes: self.view_sizes,
            actions: self.actions.clone(),
            macro_state: self.macro_state.clone(),
            action_bar: self.action_bar.clone(),
        };
        self.player.play(&self.rt, run);
    }

    /// Stop playback. Observably idempotent: pausing twice is a no-op.
    fn stop_playback(&mut self) {
        self.set_playing(false);
        self.player.pause();
    }

    /// Flip the playing flag on the macro state and its action bar mirror.
    fn set_playing(&self, playing: bool) {
        self.macro_state.send_if_modified(|state| {
            let changed = state.is_playing != playing;
            state.is_playing = playing;
            changed
        });
        self.action_bar.send_if_modified(|bar| {
            let changed = bar.is_playing != playing;
            bar.is_playing = playing;
            changed
        });
    }

    /// Apply `f` to the click point with `index`. The presentation layer
    /// and this state can transiently disagree during add/remove, so an
    /// unknown index is logged and ignored.
    fn with_point(&self, index: u32, f: impl FnOnce(&mut ClickPoint)) {
        let mut found = false;
        self.click_points.send_modify(|state| {
            if let Some(point) = state.points.iter_mut().find(|p| p.index == index) {
                f(point);
                found = true;
            }
        });

        if !found {
            warn!(index, "event for unknown click point");
        }
    }

    /// Mutate the open macro config draft and broadcast the update. An
    /// edit with no open dialog is logged and ignored.
    fn update_config_draft(&self, f: impl FnOnce(&mut MacroConfig)) {
        let mut updated = None;
        self.macro_config_dialog.send_modify(|dialog| {
            if let Some(draft) = dialog.draft.as_mut() {
                f(draft);
                updated = Some(draft.clone());
            }
        });

        match updated {
            Some(config) => self.emit(Action::UpdateMacroConfigDialog { config }),
            None => warn!("config edit without an open dialog"),
        }
    }

    /// Queue a one-shot action for the presentation layer. Never blocks.
    fn emit(&self, action: Action) {
        if self.actions.send(action).is_err() {
            warn!("action receiver dropped");
        }
    }
}
