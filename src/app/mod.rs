//! Application glue module
//!
//! Configuration for the filter binary.

mod config;

pub use config::{Config, ConfigError};
