use std::fmt;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::scores::SubmitError;
use super::board::{Board, BoardError};
use super::types::FoodPlacement;

#[derive(Debug)]
pub enum BootstrapError {
    Board(BoardError),
    Endpoint(SubmitError),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::Board(e) => write!(f, "Failed to initialize board: {}", e),
            BootstrapError::Endpoint(e) => write!(f, "Failed to initialize score reporter: {}", e),
        }
    }
}

impl std::error::Error for BootstrapError {}

impl From<BoardError> for BootstrapError {
    fn from(e: BoardError) -> Self {
        BootstrapError::Board(e)
    }
}

impl From<SubmitError> for BootstrapError {
    fn from(e: SubmitError) -> Self {
        BootstrapError::Endpoint(e)
    }
}

#[derive(Clone, Debug)]
pub struct SnakeSessionSettings {
    pub board: Board,
    pub tick_interval: Duration,
    pub food_placement: FoodPlacement,
    pub player_name: String,
}

impl SnakeSessionSettings {
    pub fn from_config(config: &ClientConfig, player_name: String) -> Result<Self, BootstrapError> {
        let board = Board::new(config.board.width, config.board.height, config.board.block)?;
        Ok(Self {
            board,
            tick_interval: config.tick_interval(),
            food_placement: config.food_placement,
            player_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let settings = SnakeSessionSettings::from_config(&ClientConfig::default(), "Anonymous".to_string()).unwrap();
        assert_eq!(settings.board.columns(), 32);
        assert_eq!(settings.tick_interval, Duration::from_millis(100));
        assert_eq!(settings.food_placement, FoodPlacement::Rejection);
    }

    #[test]
    fn test_zero_sized_board_fails_bootstrap() {
        let mut config = ClientConfig::default();
        config.board.height = 0;
        let result = SnakeSessionSettings::from_config(&config, "Anonymous".to_string());
        assert!(matches!(result, Err(BootstrapError::Board(BoardError::ZeroSized { .. }))));
    }
}
