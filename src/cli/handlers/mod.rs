//! Command handlers for CLI operations
//!
//! This module contains handlers for different CLI commands,
//! separating command execution logic from parsing and validation.

pub mod env_key;
pub mod read;

pub use env_key::EnvKeyCommandHandler;
pub use read::ReadCommandHandler;
