use url::{ParseError, Url};

/// Extracts the part of a target that robots.txt rules are matched against
///
/// Absolute URLs yield their path plus query string; scheme, host and
/// fragment are discarded. Anything else is treated as a path: its
/// fragment is dropped, an empty path becomes `/`, and a bare query gains
/// a leading `/`. Paths are not validated, so a malformed escape such as
/// `/%zz` is matched exactly as written.
///
/// # Returns
///
/// * `Some(String)` - The path and query to match
/// * `None` - The target looks like an absolute URL but cannot be parsed
///
/// # Examples
///
/// ```
/// use robots_scope::robots_path;
///
/// assert_eq!(robots_path("http://www.example.com/page.html?q=1#top").unwrap(), "/page.html?q=1");
/// assert_eq!(robots_path("/page.html#top").unwrap(), "/page.html");
/// assert_eq!(robots_path("").unwrap(), "/");
/// ```
pub fn robots_path(target: &str) -> Option<String> {
    match Url::parse(target) {
        Ok(url) => {
            let mut path = url.path().to_string();
            if path.is_empty() {
                path.push('/');
            }
            if let Some(query) = url.query() {
                path.push('?');
                path.push_str(query);
            }
            Some(path)
        }
        Err(ParseError::RelativeUrlWithoutBase) => {
            let path = target.split_once('#').map_or(target, |(path, _)| path);
            if path.is_empty() || path.starts_with('?') {
                Some(format!("/{path}"))
            } else {
                Some(path.to_string())
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_path() {
        let cases = [
            ("", "/"),
            ("?q=123", "/?q=123"),
            ("/page.html", "/page.html"),
            ("/page.html#fragment", "/page.html"),
            ("/page.html?q=123", "/page.html?q=123"),
            ("/page.html?q=123#fragment", "/page.html?q=123"),
            ("http://www.example.com/page.html", "/page.html"),
            ("http://www.example.com/page.html#fragment", "/page.html"),
            ("http://www.example.com/page.html?q=123", "/page.html?q=123"),
            ("http://www.example.com/page.html?q=123#fragment", "/page.html?q=123"),
        ];
        for (input, want) in cases {
            assert_eq!(robots_path(input).as_deref(), Some(want), "input {input:?}");
        }
    }

    #[test]
    fn test_host_only_url_is_root() {
        assert_eq!(robots_path("https://example.com").as_deref(), Some("/"));
        assert_eq!(robots_path("https://example.com?x=1").as_deref(), Some("/?x=1"));
    }

    #[test]
    fn test_bare_path_kept_verbatim() {
        assert_eq!(robots_path("/a b/ü").as_deref(), Some("/a b/ü"));
        assert_eq!(robots_path("/Fish.asp").as_deref(), Some("/Fish.asp"));
        assert_eq!(robots_path("/%zz").as_deref(), Some("/%zz"));
        assert_eq!(robots_path("/100%").as_deref(), Some("/100%"));
    }

    #[test]
    fn test_unparseable_url() {
        assert_eq!(robots_path("http://[::1/page"), None);
        assert_eq!(robots_path("http://exa mple.com/"), None);
    }
}
