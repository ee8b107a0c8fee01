//! Macro playback: a cancellable task replaying the click point sequence.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::drag::ViewSizes;
use crate::event::Action;
use crate::state::{ActionBarState, ClickPoint, MacroState};

/// Cancellable playback loop owned by the coordinator.
///
/// At most one run exists at a time; `play` supersedes the previous run.
#[derive(Default)]
pub(crate) struct MacroPlayer {
    job: Option<JoinHandle<()>>,
}

impl MacroPlayer {
    /// Cancel any in-flight run and spawn a new one on `rt`.
    pub(crate) fn play(&mut self, rt: &Handle, run: PlaybackRun) {
        self.pause();
        self.job = Some(rt.spawn(run.run()));
    }

    /// Cancel the in-flight run, if any. Cancellation takes effect at the
    /// run's next suspension point; clicks already emitted are not
    /// retracted.
    pub(crate) fn pause(&mut self) {
        if let Some(job) = self.job.take() {
            job.abort();
        }
    }
}

/// Immutable snapshot a single run replays. Click point edits made while
/// the run is in flight apply to the next run, not this one.
pub(crate) struct PlaybackRun {
    pub points: Vec<ClickPoint>,
    /// `None` plays until cancelled.
    pub cycles: Option<u64>,
    pub sizes: ViewSizes,
    pub actions: mpsc::UnboundedSender<Action>,
    pub macro_state: Arc<watch::Sender<MacroState>>,
    pub action_bar: Arc<watch::Sender<ActionBarState>>,
}

impl PlaybackRun {
    pub(crate) async fn run(self) {
        info!(points = self.points.len(), cycles = ?self.cycles, "macro playback started");

        // A cycle over nothing is a zero-length no-op; finish immediately
        // instead of spinning when the policy is unbounded.
        if !self.points.is_empty() {
            match self.cycles {
                Some(n) => {
                    for _ in 0..n {
                        if !self.cycle().await {
                            break;
                        }
                    }
                }
                None => while self.cycle().await {},
            }
        }

        self.finish();
    }

    /// Replay every click point once, in list order. Returns `false` when
    /// the action channel is gone and the run should stop.
    async fn cycle(&self) -> bool {
        for point in &self.points {
            // Overlay positions are center-relative; clicks are dispatched
            // in absolute screen coordinates.
            let x = point.drag.x + self.sizes.screen_width / 2;
            let y = point.drag.y + self.sizes.screen_height / 2;

            debug!(index = point.index, x, y, "perform click");
            if self.actions.send(Action::PerformClick { x, y }).is_err() {
                return false;
            }

            sleep(Duration::from_millis(point.delay_ms)).await;
        }

        true
    }

    /// Natural completion: flip the playing flag back directly on the
    /// state streams. This write does not route through the coordinator,
    /// so completion cannot re-trigger a start.
    fn finish(&self) {
        info!("macro playback finished");

        self.macro_state.send_if_modified(|state| {
            let changed = state.is_playing;
            state.is_playing = false;
            changed
        });
        self.action_bar.send_if_modified(|bar| {
            let changed = bar.is_playing;
            bar.is_playing = false;
            changed
        });
    }
}
