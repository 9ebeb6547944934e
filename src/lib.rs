//! Robots-Scope: robots.txt parsing and crawl-permission queries
//!
//! This crate parses robots exclusion files following Google's robots.txt
//! specification and answers whether a crawler may fetch a given path.
//! Parsing is permissive: valid lines are used and everything else is
//! silently dropped, even when the document turns out to be HTML.
//!
//! For both user-agent and path matching the longest specifier wins, and
//! crawling is allowed by default when nothing applies.
//!
//! # Example
//!
//! ```
//! use robots_scope::Robots;
//!
//! let robots = Robots::parse("User-agent: *\nDisallow: /private\n");
//! assert!(robots.test("ExampleBot", "/public/page.html"));
//! assert!(!robots.test("ExampleBot", "https://example.com/private/x"));
//! ```

pub mod config;
pub mod fetch;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for Robots-Scope operations
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("Failed to read robots.txt: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while resolving the robots.txt scope of a URL
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Expected absolute URL, got: {0}")]
    NotAbsolute(String),

    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// Result type alias for Robots-Scope operations
pub type Result<T> = std::result::Result<T, RobotsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::robots::Robots;
pub use crate::url::{locate, robots_path};
