//! CLI command handlers

pub mod commands;

pub use commands::{inspect, run, DEFAULT_FILE, ENV_FILE, EXIT_FAILURE, EXIT_SUCCESS};
