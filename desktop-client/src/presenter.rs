use common::games::Presenter;
use common::games::snake::{DeathReason, Frame, SubmissionOutcome};
use crate::state::SharedState;

/// Writes session events into the shared view state for the egui thread to draw.
#[derive(Clone)]
pub struct LocalPresenter {
    shared_state: SharedState,
}

impl LocalPresenter {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl Presenter for LocalPresenter {
    async fn render(&self, frame: Frame) {
        self.shared_state.set_frame(frame);
    }

    async fn score_changed(&self, score: u32) {
        self.shared_state.set_score(score);
    }

    async fn paused(&self, paused: bool) {
        self.shared_state.set_paused(paused);
    }

    async fn game_over(&self, final_score: u32, reason: DeathReason) {
        self.shared_state.set_game_over(final_score, reason);
    }

    async fn terminated(&self, _final_score: u32, outcome: SubmissionOutcome) {
        self.shared_state.set_submission_outcome(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::snake::Cell;
    use crate::state::GamePhase;

    fn frame(score: u32) -> Frame {
        Frame {
            snake: vec![Cell::new(340, 240), Cell::new(320, 240), Cell::new(300, 240)],
            food: Cell::new(0, 0),
            score,
            board_width: 640,
            board_height: 480,
            block: 20,
        }
    }

    #[tokio::test]
    async fn test_first_frame_starts_playing() {
        let state = SharedState::new();
        let presenter = LocalPresenter::new(state.clone());
        assert_eq!(state.snapshot().phase, GamePhase::Loading);

        presenter.render(frame(2)).await;
        let view = state.snapshot();
        assert_eq!(view.phase, GamePhase::Playing);
        assert_eq!(view.score, 2);
        assert_eq!(view.frame, Some(frame(2)));
    }

    #[tokio::test]
    async fn test_game_over_then_failed_submission() {
        let state = SharedState::new();
        let presenter = LocalPresenter::new(state.clone());
        presenter.render(frame(4)).await;
        presenter.game_over(4, DeathReason::SelfCollision).await;
        assert_eq!(
            state.snapshot().phase,
            GamePhase::GameOver {
                final_score: 4,
                reason: DeathReason::SelfCollision,
                submission: None
            }
        );

        presenter.terminated(4, SubmissionOutcome::Failed).await;
        assert_eq!(
            state.snapshot().phase,
            GamePhase::GameOver {
                final_score: 4,
                reason: DeathReason::SelfCollision,
                submission: Some(SubmissionOutcome::Failed)
            }
        );
        assert_eq!(state.snapshot().frame, Some(frame(4)));
    }

    #[tokio::test]
    async fn test_restart_events_return_to_playing() {
        let state = SharedState::new();
        let presenter = LocalPresenter::new(state.clone());
        presenter.game_over(3, DeathReason::WallCollision).await;
        presenter.terminated(3, SubmissionOutcome::Ok).await;

        presenter.paused(false).await;
        presenter.score_changed(0).await;
        presenter.render(frame(0)).await;
        let view = state.snapshot();
        assert_eq!(view.phase, GamePhase::Playing);
        assert_eq!(view.score, 0);
        assert!(!view.paused);
    }

    #[tokio::test]
    async fn test_outcome_outside_game_over_is_ignored() {
        let state = SharedState::new();
        let presenter = LocalPresenter::new(state.clone());
        presenter.render(frame(0)).await;
        presenter.terminated(0, SubmissionOutcome::Ok).await;
        assert_eq!(state.snapshot().phase, GamePhase::Playing);
    }

    #[tokio::test]
    async fn test_pause_flag() {
        let state = SharedState::new();
        let presenter = LocalPresenter::new(state.clone());
        presenter.paused(true).await;
        assert!(state.snapshot().paused);
        presenter.paused(false).await;
        assert!(!state.snapshot().paused);
    }
}
