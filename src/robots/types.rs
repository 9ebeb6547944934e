//! Parsed robots.txt rule set and the query engine over it

use crate::robots::pattern::{AgentPattern, PathPattern};
use crate::url::robots_path;

/// A group-member record: one `Allow` or `Disallow` line.
///
/// The pattern is compiled when the rule is created, so a rule is always
/// ready to match.
#[derive(Debug, Clone)]
pub struct Rule {
    allow: bool,
    path: String,
    pattern: PathPattern,
}

impl Rule {
    /// Creates a rule, compiling its path specifier
    pub fn new(allow: bool, path: impl Into<String>) -> Self {
        let path = path.into();
        let pattern = PathPattern::new(&path);
        Self {
            allow,
            path,
            pattern,
        }
    }

    /// Whether a match on this rule permits crawling
    pub fn allow(&self) -> bool {
        self.allow
    }

    /// The raw path specifier
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Checks whether the given path is matched by this rule
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.matches(path)
    }
}

/// The rules shared by one batch of consecutive `User-agent` lines.
///
/// Rules are kept ordered from longest path specifier to shortest, ties in
/// insertion order, so the first match found by a sequential scan is also
/// the most specific one.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub(crate) agents: Vec<String>,
    rules: Vec<Rule>,
}

impl Group {
    /// Inserts a rule after every rule whose specifier is at least as long
    pub(crate) fn add_rule(&mut self, rule: Rule) {
        let len = rule.path.len();
        let at = self.rules.partition_point(|r| r.path.len() >= len);
        self.rules.insert(at, rule);
    }

    /// The agent specifiers this group was declared for
    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    /// The rules of this group, most specific first
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the permission of the most specific rule matching `path`,
    /// or `true` if no rule matches
    pub fn allows(&self, path: &str) -> bool {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map_or(true, Rule::allow)
    }
}

/// One agent specifier and the group it selects
#[derive(Debug, Clone)]
pub(crate) struct Agent {
    pub(crate) name: String,
    pub(crate) pattern: AgentPattern,
    pub(crate) group: usize,
}

impl Agent {
    pub(crate) fn new(name: String, group: usize) -> Self {
        let pattern = AgentPattern::new(&name);
        Self {
            name,
            pattern,
            group,
        }
    }
}

/// The result of parsing a robots.txt file
///
/// `Robots` is immutable once built and can be queried from many threads at
/// once. Use [`Robots::test`] for one-off checks, or [`Robots::tester`] to
/// resolve the agent once and check many paths.
///
/// A default `Robots` has no rules and allows everything.
#[derive(Debug, Clone, Default)]
pub struct Robots {
    /// Agent specifiers in descending order of length, ties in file order,
    /// so the first matching agent is the longest match
    pub(crate) agents: Vec<Agent>,
    pub(crate) groups: Vec<Group>,
    pub(crate) sitemaps: Vec<String>,
}

impl Robots {
    /// Checks whether `agent` may crawl `target`
    ///
    /// See [`Robots::tester`] for how `target` is interpreted.
    pub fn test(&self, agent: &str, target: &str) -> bool {
        self.tester(agent)(target)
    }

    /// Resolves `agent` to its rule group and returns a predicate over
    /// targets.
    ///
    /// A target may be an absolute URL or a path. Only its path and query
    /// are matched, so scheme and host are discarded without warning: it is
    /// the caller's responsibility to use the `Robots` that governs the URL
    /// (see [`crate::url::locate`]). Targets that cannot be parsed are
    /// allowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use robots_scope::Robots;
    ///
    /// let robots = Robots::parse("User-agent: ExampleBot\nDisallow: /tmp/\n");
    /// let allowed = robots.tester("ExampleBot/2.0");
    /// assert!(allowed("/index.html"));
    /// assert!(!allowed("/tmp/scratch"));
    /// ```
    pub fn tester(&self, agent: &str) -> impl Fn(&str) -> bool + '_ {
        let group = self.best_group(agent);
        move |target: &str| match group {
            // An agent that isn't matched crawls everything
            None => true,
            Some(group) => match robots_path(target) {
                Some(path) => group.allows(&path),
                None => true,
            },
        }
    }

    /// Returns the specifier of the agent group that applies to `agent`
    pub fn matched_agent(&self, agent: &str) -> Option<&str> {
        self.best_agent(agent).map(|a| a.name.as_str())
    }

    /// Sitemap URLs in the order they appeared, duplicates included
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// Rule groups in the order they were declared
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Whether the file declared no agent groups at all
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Inserts an agent after every agent whose specifier is at least as long
    pub(crate) fn add_agent(&mut self, agent: Agent) {
        let len = agent.name.len();
        let at = self.agents.partition_point(|a| a.name.len() >= len);
        self.agents.insert(at, agent);
    }

    fn best_agent(&self, agent: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.pattern.matches(agent))
    }

    fn best_group(&self, agent: &str) -> Option<&Group> {
        self.best_agent(agent).map(|a| &self.groups[a.group])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_with(rules: &[(bool, &str)]) -> Group {
        let mut group = Group::default();
        for &(allow, path) in rules {
            group.add_rule(Rule::new(allow, path));
        }
        group
    }

    #[test]
    fn test_rules_sorted_by_descending_length() {
        let group = group_with(&[(false, "/"), (true, "/public/page"), (false, "/public")]);
        let paths: Vec<_> = group.rules().iter().map(Rule::path).collect();
        assert_eq!(paths, vec!["/public/page", "/public", "/"]);
    }

    #[test]
    fn test_rule_ties_keep_insertion_order() {
        let group = group_with(&[(true, "/a"), (false, "/b"), (false, "/a")]);
        let rules: Vec<_> = group.rules().iter().map(|r| (r.allow(), r.path())).collect();
        assert_eq!(rules, vec![(true, "/a"), (false, "/b"), (false, "/a")]);
        assert!(group.allows("/a"));
    }

    #[test]
    fn test_longest_rule_wins_regardless_of_order() {
        let first = group_with(&[(true, "/folder"), (false, "/folder/page")]);
        let second = group_with(&[(false, "/folder/page"), (true, "/folder")]);
        for group in [&first, &second] {
            assert!(!group.allows("/folder/page"));
            assert!(group.allows("/folder/other"));
        }
    }

    #[test]
    fn test_no_matching_rule_allows() {
        let group = group_with(&[(false, "/private")]);
        assert!(group.allows("/public"));
        assert!(group_with(&[]).allows("/anything"));
    }

    #[test]
    fn test_agents_sorted_by_descending_length() {
        let mut robots = Robots::default();
        robots.groups.push(Group::default());
        for name in ["*", "googlebot-news", "googlebot"] {
            robots.add_agent(Agent::new(name.to_string(), 0));
        }
        let names: Vec<_> = robots.agents.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["googlebot-news", "googlebot", "*"]);
    }

    #[test]
    fn test_default_robots_allows_everything() {
        let robots = Robots::default();
        assert!(robots.is_empty());
        assert!(robots.test("AnyBot", "/"));
        assert!(robots.test("AnyBot", "https://example.com/private"));
        assert_eq!(robots.matched_agent("AnyBot"), None);
        assert!(robots.sitemaps().is_empty());
    }

    #[test]
    fn test_unparseable_target_is_allowed() {
        let mut robots = Robots::default();
        let mut group = Group::default();
        group.add_rule(Rule::new(false, "/"));
        robots.groups.push(group);
        robots.add_agent(Agent::new("*".to_string(), 0));

        assert!(!robots.test("bot", "/page"));
        assert!(robots.test("bot", "http://[::1/page"));
    }

    #[test]
    fn test_robots_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Robots>();
    }
}
