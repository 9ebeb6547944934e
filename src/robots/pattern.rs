//! Compiled matchers for path and user-agent specifiers
//!
//! Path specifiers support two metacharacters: `*` matches any sequence of
//! characters and a trailing `$` anchors the match at the end of the path.
//! Path matching is case-sensitive.
//!
//! User-agent specifiers support no metacharacters. They match any agent
//! name they are a case-insensitive prefix of, and the bare specifier `*`
//! matches every agent.

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Upper bound on the compiled size of a single path pattern
const PATTERN_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Matcher compiled from an `Allow`/`Disallow` path specifier
#[derive(Debug, Clone)]
pub struct PathPattern {
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    /// Used when the specifier is too large to compile as a regex
    Wildcard(Wildcard),
}

impl PathPattern {
    /// Compiles a path specifier
    ///
    /// # Examples
    ///
    /// ```
    /// use robots_scope::robots::PathPattern;
    ///
    /// let pattern = PathPattern::new("/*.php$");
    /// assert!(pattern.matches("/folder/filename.php"));
    /// assert!(!pattern.matches("/filename.php5"));
    /// ```
    pub fn new(specifier: &str) -> Self {
        Self::with_size_limit(specifier, PATTERN_SIZE_LIMIT)
    }

    fn with_size_limit(specifier: &str, size_limit: usize) -> Self {
        let source = path_regex_source(specifier);
        let matcher = match RegexBuilder::new(&source)
            .dot_matches_new_line(true)
            .size_limit(size_limit)
            .build()
        {
            Ok(regex) => Matcher::Regex(regex),
            Err(e) => {
                warn!(
                    len = specifier.len(),
                    error = %e,
                    "Path pattern too large for regex, matching it directly"
                );
                Matcher::Wildcard(Wildcard::new(specifier))
            }
        };
        Self { matcher }
    }

    /// Checks whether `path` is matched by this pattern
    pub fn matches(&self, path: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(path),
            Matcher::Wildcard(wildcard) => wildcard.matches(path),
        }
    }
}

/// Direct matcher over the literal pieces between `*`s
#[derive(Debug, Clone)]
struct Wildcard {
    /// Never empty: a specifier without `*` is a single piece
    pieces: Vec<String>,
    anchored: bool,
}

impl Wildcard {
    fn new(specifier: &str) -> Self {
        let (body, anchored) = match specifier.strip_suffix('$') {
            Some(body) => (body, true),
            None => (specifier, false),
        };
        Self {
            pieces: body.split('*').map(str::to_string).collect(),
            anchored,
        }
    }

    fn matches(&self, path: &str) -> bool {
        let Some((first, rest)) = self.pieces.split_first() else {
            return true;
        };
        let Some(mut tail) = path.strip_prefix(first.as_str()) else {
            return false;
        };
        let Some((last, middle)) = rest.split_last() else {
            return !self.anchored || tail.is_empty();
        };
        // Taking the leftmost occurrence of each piece leaves the most room
        // for the pieces after it
        for piece in middle {
            match tail.find(piece.as_str()) {
                Some(at) => tail = &tail[at + piece.len()..],
                None => return false,
            }
        }
        if self.anchored {
            tail.ends_with(last.as_str())
        } else {
            tail.contains(last.as_str())
        }
    }
}

/// Builds the regex source for a path specifier: literal text is escaped,
/// `*` becomes `.*`, and only a final `$` is treated as an end anchor.
fn path_regex_source(specifier: &str) -> String {
    let (body, anchored) = match specifier.strip_suffix('$') {
        Some(body) => (body, true),
        None => (specifier, false),
    };

    let mut source = String::with_capacity(body.len() * 2 + 2);
    source.push('^');
    for (i, literal) in body.split('*').enumerate() {
        if i > 0 {
            source.push_str(".*");
        }
        source.push_str(&regex::escape(literal));
    }
    if anchored {
        source.push('$');
    }
    source
}

/// Matcher compiled from a `User-agent` specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentPattern {
    /// The `*` specifier: matches every agent
    Any,
    /// Lower-cased specifier that must prefix the lower-cased agent name
    Prefix(String),
}

impl AgentPattern {
    /// Compiles an agent specifier
    ///
    /// # Examples
    ///
    /// ```
    /// use robots_scope::robots::AgentPattern;
    ///
    /// let pattern = AgentPattern::new("Googlebot");
    /// assert!(pattern.matches("googlebot-image"));
    /// assert!(!pattern.matches("Bingbot"));
    /// assert!(AgentPattern::new("*").matches("Bingbot"));
    /// ```
    pub fn new(specifier: &str) -> Self {
        if specifier == "*" {
            Self::Any
        } else {
            Self::Prefix(specifier.to_lowercase())
        }
    }

    /// Checks whether the agent name is matched by this pattern
    pub fn matches(&self, agent: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Prefix(prefix) => agent.to_lowercase().starts_with(prefix.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(specifier: &str, cases: &[(&str, bool)]) {
        let pattern = PathPattern::new(specifier);
        for &(path, want) in cases {
            assert_eq!(
                pattern.matches(path),
                want,
                "pattern {specifier:?} against {path:?}"
            );
        }
    }

    #[test]
    fn test_root_matches_everything() {
        check("/", &[("/", true), ("/lower/level", true)]);
        check("/*", &[("/", true), ("/lower/level", true)]);
    }

    #[test]
    fn test_plain_prefix() {
        check(
            "/fish",
            &[
                ("/fish", true),
                ("/fish.html", true),
                ("/fish/salmon.html", true),
                ("/fishheads", true),
                ("/fishheads/yummy.html", true),
                ("/fish.php?id=anything", true),
                ("/Fish.asp", false),
                ("/catfish", false),
                ("/?id=fish", false),
            ],
        );
    }

    #[test]
    fn test_trailing_wildcard_is_redundant() {
        let cases = [
            "/fish",
            "/fish.html",
            "/fish/salmon.html",
            "/fishheads",
            "/fish.php?id=anything",
            "/Fish.asp",
            "/catfish",
            "/?id=fish",
        ];
        let plain = PathPattern::new("/fish");
        let starred = PathPattern::new("/fish*");
        for path in cases {
            assert_eq!(plain.matches(path), starred.matches(path), "{path}");
        }
    }

    #[test]
    fn test_trailing_slash() {
        check(
            "/fish/",
            &[
                ("/fish/", true),
                ("/fish/?id=anything", true),
                ("/fish/salmon.htm", true),
                ("/fish", false),
                ("/fish.html", false),
                ("/Fish/Salmon.asp", false),
            ],
        );
    }

    #[test]
    fn test_inner_wildcard() {
        check(
            "/*.php",
            &[
                ("/filename.php", true),
                ("/folder/filename.php", true),
                ("/folder/filename.php?parameters", true),
                ("/folder/any.php.file.html", true),
                ("/filename.php/", true),
                ("/", false),
                ("/windows.PHP", false),
            ],
        );
        check(
            "/fish*.php",
            &[
                ("/fish.php", true),
                ("/fishheads/catfish.php?parameters", true),
                ("/Fish.PHP", false),
            ],
        );
    }

    #[test]
    fn test_end_anchor() {
        check(
            "/*.php$",
            &[
                ("/filename.php", true),
                ("/folder/filename.php", true),
                ("/folder/filename.php?parameters", false),
                ("/filename.php/", false),
                ("/filename.php5", false),
                ("/windows.PHP", false),
            ],
        );
    }

    #[test]
    fn test_inner_dollar_is_literal() {
        check(
            "/price$list",
            &[("/price$list", true), ("/price$list/more", true), ("/price", false)],
        );
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        check(
            "/a.b?c=(d)[e]+",
            &[("/a.b?c=(d)[e]+", true), ("/axb?c=(d)[e]+", false), ("/a.", false)],
        );
    }

    #[test]
    fn test_empty_specifier_matches_everything() {
        check("", &[("/", true), ("/anything", true)]);
    }

    #[test]
    fn test_non_ascii_specifier() {
        check("/müller/*", &[("/müller/x", true), ("/muller/x", false)]);
    }

    #[test]
    fn test_regex_source() {
        assert_eq!(path_regex_source("/a*b$"), r"^/a.*b$");
        assert_eq!(path_regex_source("/a.b"), r"^/a\.b");
    }

    #[test]
    fn test_oversized_pattern_falls_back_to_direct_matching() {
        let specifier = "/a*b*c$";
        let pattern = PathPattern::with_size_limit(specifier, 0);
        assert!(matches!(pattern.matcher, Matcher::Wildcard(_)));

        let compiled = PathPattern::new(specifier);
        assert!(matches!(compiled.matcher, Matcher::Regex(_)));
        for path in ["/abc", "/a-b-c", "/axbyc", "/acb", "/abcd", "/bac", "/ab", "/abc/c"] {
            assert_eq!(pattern.matches(path), compiled.matches(path), "{path}");
        }
    }

    #[test]
    fn test_wildcard_matches_like_regex() {
        let specifiers = [
            "", "/", "/*", "/fish", "/fish*", "/fish/", "/*.php", "/fish*.php", "/*.php$",
            "/price$list", "/a*a$", "/a**b", "$", "*$",
        ];
        let paths = [
            "/",
            "/fish",
            "/fish/",
            "/fish.html",
            "/fishheads/catfish.php?parameters",
            "/folder/filename.php",
            "/filename.php5",
            "/price$list/more",
            "/aa",
            "/a",
            "/ab",
            "/xab",
            "",
        ];
        for specifier in specifiers {
            let regex = PathPattern::new(specifier);
            let wildcard = Wildcard::new(specifier);
            for path in paths {
                assert_eq!(
                    wildcard.matches(path),
                    regex.matches(path),
                    "pattern {specifier:?} against {path:?}"
                );
            }
        }
    }

    #[test]
    fn test_agent_prefix_case_insensitive() {
        let pattern = AgentPattern::new("GoogleBot");
        assert!(pattern.matches("googlebot"));
        assert!(pattern.matches("Googlebot-News"));
        assert!(pattern.matches("GOOGLEBOT/2.1"));
        assert!(!pattern.matches("google"));
        assert!(!pattern.matches("Bingbot"));
    }

    #[test]
    fn test_agent_star_is_wildcard_only_alone() {
        assert_eq!(AgentPattern::new("*"), AgentPattern::Any);
        assert!(AgentPattern::new("*").matches("anything at all"));

        let starred = AgentPattern::new("Google*");
        assert!(starred.matches("google*"));
        assert!(!starred.matches("Googlebot"));
    }

    #[test]
    fn test_agent_metacharacters_literal() {
        let pattern = AgentPattern::new("bot.v1");
        assert!(pattern.matches("BOT.V1"));
        assert!(!pattern.matches("botxv1"));
    }
}
