use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::{log, log_error, log_warn};
use super::SubmitError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_name: String,
    pub score: u32,
}

/// One attempt at delivering a score. Retrying is the reporter's job.
pub trait ScoreTransport: Send + Sync + 'static {
    fn post_score(&self, record: &ScoreRecord) -> impl Future<Output = Result<Value, SubmitError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Wait between attempt `attempt` and the next one: grows linearly, `step * attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }
}

pub struct ScoreReporter<T: ScoreTransport> {
    transport: Arc<T>,
    policy: RetryPolicy,
}

impl<T: ScoreTransport> Clone for ScoreReporter<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            policy: self.policy,
        }
    }
}

impl<T: ScoreTransport> ScoreReporter<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport: Arc::new(transport),
            policy,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Sends the score, retrying with backoff. The first attempt is immediate.
    pub async fn submit(&self, player_name: &str, score: u32) -> Result<Value, SubmitError> {
        let record = ScoreRecord {
            player_name: player_name.to_string(),
            score,
        };
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.transport.post_score(&record).await {
                Ok(response) => {
                    log!("Score {} for {} saved on attempt {}", score, player_name, attempt);
                    return Ok(response);
                }
                Err(e) => {
                    log_warn!("Attempt {} failed: {}", attempt, e);
                    if attempt >= max_attempts {
                        log_error!("Error saving score: {}", e);
                        return Err(SubmitError::Exhausted {
                            attempts: attempt,
                            last: Box::new(e),
                        });
                    }
                    tokio::time::sleep(self.policy.delay_after(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Replays scripted results and records when each attempt happened.
    pub(crate) struct ScriptedTransport {
        results: Mutex<VecDeque<Result<Value, SubmitError>>>,
        pub(crate) attempts: Mutex<Vec<(Instant, ScoreRecord)>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new(results: Vec<Result<Value, SubmitError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                attempts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing_then_ok(failures: usize) -> Self {
            let mut results: Vec<Result<Value, SubmitError>> =
                (0..failures).map(|_| Err(SubmitError::Status(503))).collect();
            results.push(Ok(json!({ "success": true })));
            Self::new(results)
        }
    }

    impl ScoreTransport for ScriptedTransport {
        async fn post_score(&self, record: &ScoreRecord) -> Result<Value, SubmitError> {
            self.attempts.lock().unwrap().push((Instant::now(), record.clone()));
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(SubmitError::Transport("script exhausted".to_string())))
        }
    }

    fn attempt_offsets(reporter: &ScoreReporter<ScriptedTransport>, start: Instant) -> Vec<Duration> {
        reporter
            .transport
            .attempts
            .lock()
            .unwrap()
            .iter()
            .map(|(at, _)| at.duration_since(start))
            .collect()
    }

    #[test]
    fn test_delay_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(2), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_success_does_not_wait() {
        let reporter = ScoreReporter::new(ScriptedTransport::failing_then_ok(0), RetryPolicy::default());
        let start = Instant::now();
        let response = reporter.submit("Anonymous", 0).await.unwrap();
        assert_eq!(response, json!({ "success": true }));
        assert_eq!(attempt_offsets(&reporter, start), vec![Duration::ZERO]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_failures_then_success() {
        let reporter = ScoreReporter::new(ScriptedTransport::failing_then_ok(2), RetryPolicy::default());
        let start = Instant::now();
        assert!(reporter.submit("alice", 12).await.is_ok());
        assert_eq!(
            attempt_offsets(&reporter, start),
            vec![Duration::ZERO, Duration::from_millis(1000), Duration::from_millis(3000)]
        );

        let attempts = reporter.transport.attempts.lock().unwrap();
        assert!(attempts.iter().all(|(_, record)| record.player_name == "alice" && record.score == 12));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_surfaces_failure() {
        let reporter = ScoreReporter::new(ScriptedTransport::failing_then_ok(3), RetryPolicy::default());
        let start = Instant::now();
        let result = reporter.submit("bob", 4).await;
        match result {
            Err(SubmitError::Exhausted { attempts, last }) => {
                assert_eq!(attempts, 3);
                assert_eq!(*last, SubmitError::Status(503));
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(attempt_offsets(&reporter, start).len(), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            backoff_step: Duration::from_millis(10),
        };
        let reporter = ScoreReporter::new(ScriptedTransport::failing_then_ok(1), policy);
        assert!(reporter.submit("carol", 1).await.is_err());
        assert_eq!(reporter.transport.attempts.lock().unwrap().len(), 1);
    }
}
