use common::games::snake::{DeathReason, Frame, SessionHandle, SubmissionOutcome};
use eframe::egui;
use std::sync::{Arc, Mutex};

pub const BOOTSTRAP_FAILED_MESSAGE: &str = "Failed to load game. Please restart the application.";

#[derive(Debug, Clone, PartialEq)]
pub enum GamePhase {
    Loading,
    Playing,
    GameOver {
        final_score: u32,
        reason: DeathReason,
        /// `None` while the score is still being sent.
        submission: Option<SubmissionOutcome>,
    },
    BootstrapFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub phase: GamePhase,
    pub frame: Option<Frame>,
    pub score: u32,
    pub paused: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Loading,
            frame: None,
            score: 0,
            paused: false,
        }
    }
}

/// Shared between the session task and the egui thread.
pub struct SharedState {
    view: Arc<Mutex<ViewState>>,
    session: Arc<Mutex<Option<SessionHandle>>>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            view: Arc::new(Mutex::new(ViewState::default())),
            session: Arc::new(Mutex::new(None)),
            context: Arc::new(Mutex::new(None)),
        }
    }

    pub fn snapshot(&self) -> ViewState {
        self.view.lock().unwrap().clone()
    }

    pub fn set_frame(&self, frame: Frame) {
        self.update(|view| {
            view.score = frame.score;
            view.frame = Some(frame);
            view.phase = GamePhase::Playing;
        });
    }

    pub fn set_score(&self, score: u32) {
        self.update(|view| view.score = score);
    }

    pub fn set_paused(&self, paused: bool) {
        self.update(|view| view.paused = paused);
    }

    pub fn set_game_over(&self, final_score: u32, reason: DeathReason) {
        self.update(|view| {
            view.score = final_score;
            view.paused = false;
            view.phase = GamePhase::GameOver {
                final_score,
                reason,
                submission: None,
            };
        });
    }

    pub fn set_submission_outcome(&self, outcome: SubmissionOutcome) {
        self.update(|view| {
            if let GamePhase::GameOver { submission, .. } = &mut view.phase {
                *submission = Some(outcome);
            }
        });
    }

    pub fn set_bootstrap_failed(&self) {
        self.update(|view| view.phase = GamePhase::BootstrapFailed);
    }

    pub fn set_session(&self, handle: SessionHandle) {
        *self.session.lock().unwrap() = Some(handle);
    }

    pub fn session(&self) -> Option<SessionHandle> {
        self.session.lock().unwrap().clone()
    }

    pub fn has_context(&self) -> bool {
        self.context.lock().unwrap().is_some()
    }

    pub fn set_context(&self, ctx: egui::Context) {
        *self.context.lock().unwrap() = Some(ctx);
    }

    fn update(&self, change: impl FnOnce(&mut ViewState)) {
        change(&mut self.view.lock().unwrap());
        if let Some(ctx) = self.context.lock().unwrap().as_ref() {
            ctx.request_repaint();
        }
    }
}

impl Clone for SharedState {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            session: Arc::clone(&self.session),
            context: Arc::clone(&self.context),
        }
    }
}
