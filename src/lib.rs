// Library exports for the territory bot
// The server binary and the replay tool share the decision engine through this crate

pub mod agent;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod direction;
pub mod dominance;
pub mod history;
pub mod replay;
pub mod rings;
pub mod scoring;
pub mod types;
