//! Robots.txt rule parser
//!
//! Groups the token stream into agent groups. Consecutive `User-agent`
//! lines form one batch that shares the rules following them; a
//! `User-agent` line that appears after a rule line starts a new batch.

use crate::robots::lexer::{Lexer, Token, TokenKind};
use crate::robots::types::{Agent, Group, Robots, Rule};
use tracing::{debug, trace};

/// Parser state carried between tokens
#[derive(Debug, Default)]
struct Parser {
    /// Agent names of the batch being built
    batch: Vec<String>,
    /// Rules of the batch being built
    group: Group,
    /// Whether a rule line has been seen since the batch started
    within_group: bool,
    robots: Robots,
}

impl Parser {
    fn handle(&mut self, token: Token) {
        match token.kind {
            TokenKind::UserAgent => {
                if self.within_group {
                    self.flush();
                    self.within_group = false;
                }
                self.batch.push(token.value);
            }
            TokenKind::Allow => self.add_rule(true, token),
            TokenKind::Disallow => self.add_rule(false, token),
            TokenKind::Sitemap => self.robots.sitemaps.push(token.value),
        }
    }

    fn add_rule(&mut self, allow: bool, token: Token) {
        self.within_group = true;
        if self.batch.is_empty() {
            trace!(line = token.line, "Ignoring rule before any user-agent");
            return;
        }
        self.group.add_rule(Rule::new(allow, token.value));
    }

    /// Commits the pending batch: its agents become queryable
    fn flush(&mut self) {
        if self.batch.is_empty() {
            return;
        }
        let names = std::mem::take(&mut self.batch);
        let mut group = std::mem::take(&mut self.group);
        let index = self.robots.groups.len();

        for name in &names {
            self.robots.add_agent(Agent::new(name.clone(), index));
        }
        group.agents = names;
        self.robots.groups.push(group);
    }

    fn finish(mut self) -> Robots {
        self.flush();
        self.robots
    }
}

/// Parses a token sequence into a rule set
pub fn parse_tokens(tokens: impl IntoIterator<Item = Token>) -> Robots {
    let mut parser = Parser::default();
    for token in tokens {
        parser.handle(token);
    }
    parser.finish()
}

/// Parses the text of a robots.txt file
///
/// Never fails: lines that cannot be interpreted are dropped.
pub fn parse(input: &str) -> Robots {
    let robots = parse_tokens(Lexer::new(input));
    debug!(
        agents = robots.agents.len(),
        groups = robots.groups.len(),
        sitemaps = robots.sitemaps.len(),
        "Parsed robots.txt"
    );
    robots
}
