//! gerifit-cli library root.
//!
//! Re-exports internal modules so that integration tests can drive the
//! commands directly without going through argument parsing.

pub mod args;
pub mod commands;
pub mod config;
pub mod intake;
