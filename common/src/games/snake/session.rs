use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::{log, log_error};
use crate::config::ClientConfig;
use crate::games::{Presenter, RandomSource, SessionRng};
use crate::scores::{HttpScoreTransport, ScoreReporter, ScoreTransport};
use super::engine::{Engine, TickOutcome};
use super::settings::{BootstrapError, SnakeSessionSettings};
use super::types::{Direction, SubmissionOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    Pause,
    Resume,
    Restart,
    Stop,
}

/// Cloneable control surface for a running session. Every method is fire-and-forget
/// and harmless once the session has ended.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    pub fn request(&self, direction: Direction) {
        self.send(SessionCommand::Turn(direction));
    }

    pub fn pause(&self) {
        self.send(SessionCommand::Pause);
    }

    pub fn resume(&self) {
        self.send(SessionCommand::Resume);
    }

    pub fn restart(&self) {
        self.send(SessionCommand::Restart);
    }

    pub fn stop(&self) {
        self.send(SessionCommand::Stop);
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn send(&self, command: SessionCommand) {
        // A closed channel only means the session is already gone.
        let _ = self.tx.send(command);
    }
}

enum SessionFlow {
    Continue,
    Restart,
    Stop,
}

/// Drives an [`Engine`] from a periodic clock and forwards its events to a presenter.
pub struct SnakeSession<R, P, T>
where
    R: RandomSource + 'static,
    P: Presenter,
    T: ScoreTransport,
{
    engine: Engine<R>,
    presenter: P,
    reporter: ScoreReporter<T>,
    player_name: String,
    tick_interval: Duration,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    reported_score: u32,
}

impl<P: Presenter> SnakeSession<SessionRng, P, HttpScoreTransport> {
    /// Builds everything from config and spawns the session on the current runtime.
    /// Nothing is spawned when bootstrap fails.
    pub fn launch(
        config: &ClientConfig,
        player_name: String,
        presenter: P,
    ) -> Result<(SessionHandle, JoinHandle<()>), BootstrapError> {
        let settings = SnakeSessionSettings::from_config(config, player_name)?;
        let transport = HttpScoreTransport::new(&config.score.endpoint, config.score.request_timeout())?;
        let reporter = ScoreReporter::new(transport, config.score.retry_policy());
        let rng = SessionRng::from_random();
        log!("Starting session for {} with seed {}", settings.player_name, rng.seed());
        let (session, handle) = Self::new(settings, rng, presenter, reporter);
        Ok((handle, tokio::spawn(session.run())))
    }
}

impl<R, P, T> SnakeSession<R, P, T>
where
    R: RandomSource + 'static,
    P: Presenter,
    T: ScoreTransport,
{
    pub fn new(
        settings: SnakeSessionSettings,
        rng: R,
        presenter: P,
        reporter: ScoreReporter<T>,
    ) -> (Self, SessionHandle) {
        let (tx, commands) = mpsc::unbounded_channel();
        let engine = Engine::start(settings.board, rng, settings.food_placement);
        let session = Self {
            engine,
            presenter,
            reporter,
            player_name: settings.player_name,
            tick_interval: settings.tick_interval,
            commands,
            reported_score: 0,
        };
        (session, SessionHandle { tx })
    }

    pub async fn run(mut self) {
        let mut ticker = interval(self.tick_interval);
        // Late ticks fire as soon as possible; missed ones are never replayed.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let score = self.engine.score();
        self.report_score(score).await;

        loop {
            tokio::select! {
                _ = ticker.tick(), if self.engine.is_running() => {
                    if let SessionFlow::Stop = self.on_tick(&mut ticker).await {
                        break;
                    }
                }
                command = self.commands.recv() => {
                    match command {
                        None | Some(SessionCommand::Stop) => break,
                        Some(SessionCommand::Turn(direction)) => {
                            self.engine.request(direction);
                        }
                        Some(SessionCommand::Pause) => {
                            if self.engine.pause() {
                                self.presenter.paused(true).await;
                            }
                        }
                        Some(SessionCommand::Resume) => {
                            if self.engine.resume() {
                                ticker.reset_immediately();
                                self.presenter.paused(false).await;
                            }
                        }
                        Some(SessionCommand::Restart) => self.restart(&mut ticker).await,
                    }
                }
            }
        }

        log!("Session stopped with score {}", self.engine.score());
    }

    async fn on_tick(&mut self, ticker: &mut Interval) -> SessionFlow {
        match self.engine.tick() {
            TickOutcome::Advanced { frame, ate } => {
                if ate {
                    self.report_score(frame.score).await;
                }
                self.presenter.render(frame).await;
                SessionFlow::Continue
            }
            TickOutcome::Terminated { final_score, reason } => {
                // Food eaten on the fatal tick has not been reported yet.
                if final_score != self.reported_score {
                    self.report_score(final_score).await;
                }
                self.presenter.game_over(final_score, reason).await;
                match self.finish_game(final_score).await {
                    SessionFlow::Restart => {
                        self.restart(ticker).await;
                        SessionFlow::Continue
                    }
                    flow => flow,
                }
            }
            TickOutcome::Idle => SessionFlow::Continue,
        }
    }

    /// Submits the final score and reports the outcome. A stop received meanwhile
    /// detaches the submission, which still runs to completion.
    async fn finish_game(&mut self, final_score: u32) -> SessionFlow {
        let reporter = self.reporter.clone();
        let player_name = self.player_name.clone();
        let mut submission = tokio::spawn(async move { reporter.submit(&player_name, final_score).await });
        let mut restart_requested = false;

        loop {
            tokio::select! {
                result = &mut submission => {
                    let outcome = match result {
                        Ok(Ok(_)) => SubmissionOutcome::Ok,
                        Ok(Err(_)) => SubmissionOutcome::Failed,
                        Err(e) => {
                            log_error!("Score submission task failed: {}", e);
                            SubmissionOutcome::Failed
                        }
                    };
                    self.presenter.terminated(final_score, outcome).await;
                    return if restart_requested {
                        SessionFlow::Restart
                    } else {
                        SessionFlow::Continue
                    };
                }
                command = self.commands.recv() => {
                    match command {
                        None | Some(SessionCommand::Stop) => {
                            log!("Stopped while score {} is still being submitted", final_score);
                            return SessionFlow::Stop;
                        }
                        Some(SessionCommand::Restart) => restart_requested = true,
                        Some(_) => {}
                    }
                }
            }
        }
    }

    async fn restart(&mut self, ticker: &mut Interval) {
        self.engine.restart();
        ticker.reset_immediately();
        self.presenter.paused(false).await;
        self.report_score(0).await;
    }

    async fn report_score(&mut self, score: u32) {
        self.reported_score = score;
        self.presenter.score_changed(score).await;
    }
}
