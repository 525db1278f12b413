use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use common::config::Validate;

pub const DEFAULT_CONFIG_PATH: &str = "snake_server_config.yaml";
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_TOP_SCORES_LIMIT: usize = 20;
pub const DEFAULT_MAX_PLAYER_NAME_LEN: usize = 50;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub top_scores_limit: usize,
    pub max_player_name_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            top_scores_limit: DEFAULT_TOP_SCORES_LIMIT,
            max_player_name_len: DEFAULT_MAX_PLAYER_NAME_LEN,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.address
            .parse()
            .map_err(|e| format!("Invalid address '{}': {}", self.address, e))
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;
        if self.top_scores_limit == 0 {
            return Err("top_scores_limit must be greater than 0".to_string());
        }
        if self.max_player_name_len == 0 {
            return Err("max_player_name_len must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigManager, MemoryContentProvider, YamlConfigSerializer};

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().port(), 5000);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let manager: ConfigManager<_, ServerConfig> = ConfigManager::new(
            MemoryContentProvider::new(Some("top_scores_limit: 5\n".to_string())),
            YamlConfigSerializer,
        );
        let config = manager.get_config().unwrap();
        assert_eq!(config.top_scores_limit, 5);
        assert_eq!(config.address, DEFAULT_ADDRESS);
        assert_eq!(config.max_player_name_len, DEFAULT_MAX_PLAYER_NAME_LEN);
    }

    #[test]
    fn test_rejects_bad_address() {
        let config = ServerConfig {
            address: "localhost".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_limit() {
        let config = ServerConfig {
            top_scores_limit: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
