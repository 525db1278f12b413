mod presenter;
mod session_rng;

pub mod snake;

pub use presenter::Presenter;
pub use session_rng::{RandomSource, SessionRng};

#[cfg(test)]
pub(crate) use session_rng::SequenceRng;
