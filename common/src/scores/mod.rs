mod error;
mod reporter;
mod transport;

pub use error::SubmitError;
pub use reporter::{RetryPolicy, ScoreRecord, ScoreReporter, ScoreTransport};
pub use transport::{HttpScoreTransport, SAVE_SCORE_PATH};

#[cfg(test)]
pub(crate) use reporter::tests::ScriptedTransport;
