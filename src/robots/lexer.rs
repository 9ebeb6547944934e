//! Robots.txt tokenizer
//!
//! Turns the raw text of a robots.txt file into a sequence of [`Token`]s.
//! Following Google's robots.txt specification, every line that cannot be
//! interpreted is dropped without failing: unknown fields, missing
//! separators, and content that is not a robots.txt file at all (an HTML
//! error page, for instance) simply produce no tokens.
//!
//! Whitespace around the `:` separator may run onto the next line when that
//! line starts with a space or tab, so `Disallow:` followed by an indented
//! `/private` is read as one directive.

use tracing::trace;

/// Field kinds recognised in a robots.txt file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    UserAgent,
    Disallow,
    Allow,
    Sitemap,
}

/// Field names and the token kind each one produces. Matched
/// case-insensitively against the start of a line.
const FIELDS: &[(&str, TokenKind)] = &[
    ("user-agent", TokenKind::UserAgent),
    ("disallow", TokenKind::Disallow),
    ("allow", TokenKind::Allow),
    ("sitemap", TokenKind::Sitemap),
];

/// One recognised directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of field this token came from
    pub kind: TokenKind,

    /// The field value, trailing whitespace removed, case preserved
    pub value: String,

    /// 1-based line number of the directive
    pub line: usize,
}

/// Lexer states. Each call to [`Lexer::next`] runs transitions until a
/// token is emitted or the input is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between lines: skip whitespace and decide what the next line is
    Start,
    /// Inside a comment, which runs to the end of the line
    Comment,
    /// Expecting a field name
    Field,
    /// After a field name, expecting `:`
    Separator(TokenKind),
    /// After the separator, reading the value
    Value(TokenKind),
    /// After a value: only whitespace or a comment may follow
    Trailing,
    /// The current line is invalid; skip the rest of it
    Discard(&'static str),
    Done,
}

/// Streaming tokenizer over a robots.txt document
///
/// Tokens are produced lazily in file order. A lexer cannot be resumed
/// once exhausted; build a new one to tokenize the same input again.
///
/// # Examples
///
/// ```
/// use robots_scope::robots::{Lexer, TokenKind};
///
/// let tokens: Vec<_> = Lexer::new("User-agent: *\nDisallow: /tmp # scratch\n").collect();
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[1].kind, TokenKind::Disallow);
/// assert_eq!(tokens[1].value, "/tmp");
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    state: State,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            state: State::Start,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    /// Skips linear whitespace: spaces and tabs, plus any line break that
    /// is immediately followed by a space or tab (a folded line)
    fn skip_lws(&mut self) {
        loop {
            self.skip_while(is_inline_space);
            let rest = self.rest();
            let folded = rest
                .strip_prefix("\r\n")
                .or_else(|| rest.strip_prefix(is_line_end))
                .filter(|next| next.starts_with([' ', '\t']));
            match folded {
                // Line breaks are single bytes, so each bump consumes one
                Some(next) => {
                    for _ in next.len()..rest.len() {
                        self.bump();
                    }
                }
                None => break,
            }
        }
    }

    /// Runs a single state transition, returning a token if one was emitted
    fn step(&mut self) -> Option<Token> {
        match self.state {
            State::Start => {
                self.skip_while(char::is_whitespace);
                self.state = match self.peek() {
                    None => State::Done,
                    Some('#') => State::Comment,
                    Some(_) => State::Field,
                };
            }
            State::Comment => {
                self.skip_while(|c| !is_line_end(c));
                self.state = State::Start;
            }
            State::Field => self.state = self.lex_field(),
            State::Separator(kind) => {
                self.skip_lws();
                if self.peek() == Some(':') {
                    self.bump();
                    self.skip_lws();
                    self.state = State::Value(kind);
                } else {
                    self.state = State::Discard("expected ':' between field and value");
                }
            }
            State::Value(kind) => {
                let start = self.pos;
                self.skip_while(|c| !c.is_ascii_control() && c != '#');
                let value = self.input[start..self.pos].trim_end();
                self.state = State::Trailing;
                return Some(Token {
                    kind,
                    value: value.to_string(),
                    line: self.line,
                });
            }
            State::Trailing => {
                self.skip_while(is_inline_space);
                self.state = match self.peek() {
                    None => State::Done,
                    Some('#') => State::Comment,
                    Some(c) if is_line_end(c) => State::Start,
                    Some(_) => State::Discard("unexpected text after value"),
                };
            }
            State::Discard(reason) => {
                trace!(line = self.line, reason, "Discarding robots.txt line");
                self.skip_while(|c| !is_line_end(c));
                self.state = State::Start;
            }
            State::Done => {}
        }
        None
    }

    fn lex_field(&mut self) -> State {
        let rest = self.rest().as_bytes();
        for &(name, kind) in FIELDS {
            if rest.len() >= name.len() && rest[..name.len()].eq_ignore_ascii_case(name.as_bytes())
            {
                // Field names are ASCII, so this stays on a char boundary
                self.pos += name.len();
                return State::Separator(kind);
            }
        }
        State::Discard("unrecognized field")
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.state != State::Done {
            if let Some(token) = self.step() {
                return Some(token);
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Tokenizes a whole document eagerly
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

fn is_line_end(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn is_inline_space(c: char) -> bool {
    c.is_whitespace() && !is_line_end(c)
}
