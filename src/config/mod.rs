//! Configuration module for Robots-Scope
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file used by the command-line tool.
//!
//! # Example
//!
//! ```no_run
//! use robots_scope::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("robots-scope.toml")).unwrap();
//! println!("Checking as: {}", config.user_agent.crawler_name);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CheckConfig, Config, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
