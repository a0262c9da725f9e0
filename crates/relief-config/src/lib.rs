//! Configuration system for the relief heightmap generator.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, parse_control_point};
pub use config::{CONFIG_FILE, Config, DebugConfig, GeneratorConfig, ViewConfig};
pub use error::ConfigError;
