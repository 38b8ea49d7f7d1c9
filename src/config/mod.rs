//! Configuration module
//!
//! Connection settings for the Ambari server and defaults for the
//! command-line tool, stored as TOML.

pub mod config;

pub use config::{CliConfig, ClientConfig, Config};
