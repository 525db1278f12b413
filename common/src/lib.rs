pub mod config;
pub mod games;
pub mod logger;
pub mod profile;
pub mod scores;
