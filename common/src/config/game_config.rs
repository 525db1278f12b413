use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::games::snake::{Board, FoodPlacement, DEFAULT_BLOCK};
use crate::scores::RetryPolicy;
use super::Validate;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
pub const DEFAULT_SCORE_ENDPOINT: &str = "http://127.0.0.1:5000";
pub const DEFAULT_PROFILE_PATH: &str = "snake_profile.yaml";

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    pub board: BoardConfig,
    pub tick_interval_ms: u64,
    pub food_placement: FoodPlacement,
    pub score: ScoreEndpointConfig,
    pub profile_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            food_placement: FoodPlacement::Rejection,
            score: ScoreEndpointConfig::default(),
            profile_path: DEFAULT_PROFILE_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        self.board.validate()?;
        self.score.validate()?;
        if !(10..=5000).contains(&self.tick_interval_ms) {
            return Err("tick_interval_ms must be between 10 and 5000".to_string());
        }
        if self.profile_path.trim().is_empty() {
            return Err("profile_path must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    pub block: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            block: DEFAULT_BLOCK,
        }
    }
}

impl BoardConfig {
    pub fn build(&self) -> Result<Board, String> {
        Board::new(self.width, self.height, self.block).map_err(|e| e.to_string())
    }
}

impl Validate for BoardConfig {
    fn validate(&self) -> Result<(), String> {
        self.build().map(|_| ())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ScoreEndpointConfig {
    /// Base URL of the score server; `/save_score` is appended.
    pub endpoint: String,
    pub max_attempts: u32,
    pub backoff_step_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for ScoreEndpointConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            endpoint: DEFAULT_SCORE_ENDPOINT.to_string(),
            max_attempts: policy.max_attempts,
            backoff_step_ms: policy.backoff_step.as_millis() as u64,
            request_timeout_ms: 5000,
        }
    }
}

impl ScoreEndpointConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff_step: Duration::from_millis(self.backoff_step_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Validate for ScoreEndpointConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.endpoint.starts_with("http://") {
            return Err("score endpoint must be an http:// URL".to_string());
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("request_timeout_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}
