use std::future::Future;

use super::snake::{DeathReason, Frame, SubmissionOutcome};

/// Receives everything the player should see. The session never draws anything itself.
pub trait Presenter: Send + Sync + Clone + 'static {
    fn render(&self, frame: Frame) -> impl Future<Output = ()> + Send;

    fn score_changed(&self, score: u32) -> impl Future<Output = ()> + Send;

    fn paused(&self, paused: bool) -> impl Future<Output = ()> + Send;

    /// Fired on the tick that ends the game, before the score is submitted.
    fn game_over(&self, final_score: u32, reason: DeathReason) -> impl Future<Output = ()> + Send;

    /// Fired once the submission for the finished game has succeeded or given up.
    fn terminated(&self, final_score: u32, outcome: SubmissionOutcome) -> impl Future<Output = ()> + Send;
}
