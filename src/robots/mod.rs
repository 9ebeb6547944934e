//! Robots.txt parsing and matching module
//!
//! Data flows strictly forward: raw text is tokenized by the [`lexer`],
//! the [`parser`] groups tokens into agent groups whose specifiers are
//! compiled by [`pattern`], and the resulting [`Robots`] answers queries.

mod lexer;
mod parser;
mod pattern;
mod types;

pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parser::{parse, parse_tokens};
pub use pattern::{AgentPattern, PathPattern};
pub use types::{Group, Robots, Rule};

use crate::RobotsError;
use std::io::Read;

impl Robots {
    /// Parses the text of a robots.txt file
    ///
    /// Parsing never fails: any line that cannot be interpreted is dropped.
    pub fn parse(input: &str) -> Self {
        parse(input)
    }

    /// Reads a robots.txt file to the end and parses it
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so the only possible
    /// failure is being unable to read the input at all.
    ///
    /// # Returns
    ///
    /// * `Ok(Robots)` - The parsed rule set
    /// * `Err(RobotsError::Io)` - Reading from `reader` failed
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, RobotsError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(parse(&String::from_utf8_lossy(&buf)))
    }
}

impl std::str::FromStr for Robots {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

/// Checks if a URL is allowed for the given user agent
///
/// # Arguments
///
/// * `robots` - The parsed robots.txt data
/// * `url` - The URL or path to check
/// * `user_agent` - The user agent string
///
/// # Returns
///
/// * `true` - If the URL is allowed
/// * `false` - If the URL is disallowed
pub fn is_allowed(robots: &Robots, url: &str, user_agent: &str) -> bool {
    robots.test(user_agent, url)
}
