pub mod agent;
pub mod config;
pub mod error;
pub mod game_repr;
