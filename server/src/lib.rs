pub mod config;
pub mod rate_limit;
pub mod routes;
pub mod scores;
