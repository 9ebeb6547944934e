//! URL handling module for Robots-Scope
//!
//! This module resolves which robots.txt file governs a URL and extracts
//! the part of a URL that robots.txt rules are matched against.

mod locate;
mod target;

pub use locate::locate;
pub use target::robots_path;
