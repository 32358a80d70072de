pub mod checkpoints;
pub mod cli;
pub mod config;
pub mod error;
pub mod node;
