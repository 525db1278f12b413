mod board;
mod engine;
mod entity;
mod input;
mod session;
mod settings;
mod types;

pub use board::{Board, BoardError, MIN_COLUMNS};
pub use engine::{Engine, TickOutcome, INITIAL_DIRECTION};
pub use entity::{Snake, INITIAL_LENGTH};
pub use input::InputArbiter;
pub use session::{SessionCommand, SessionHandle, SnakeSession};
pub use settings::{BootstrapError, SnakeSessionSettings};
pub use types::{
    Cell, DeathReason, Direction, EngineState, FoodPlacement, Frame, SubmissionOutcome, DEFAULT_BLOCK,
};
