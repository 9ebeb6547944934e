use crate::{UrlError, UrlResult};
use url::{Host, ParseError, Url};

/// Returns the URL of the robots.txt file that governs `url`
///
/// Two URLs are governed by the same robots.txt file exactly when this
/// function returns the same string for both, so the result can be used as
/// a scope key.
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject relative or malformed URLs
/// 2. Lowercase the scheme and host
/// 3. Drop the port when it is the default for the scheme
///    (`http` 80, `https` 443, `ftp` 21); other ports stay, since a
///    non-default port is its own scope
/// 4. Convert punycode host labels to their Unicode form
///
/// # Returns
///
/// * `Ok(String)` - `scheme://host[:port]/robots.txt`
/// * `Err(UrlError)` - The URL is not absolute, cannot be parsed, or has no host
///
/// # Examples
///
/// ```
/// use robots_scope::locate;
///
/// let robots = locate("HTTP://Example.COM:80/page.html?q=1").unwrap();
/// assert_eq!(robots, "http://example.com/robots.txt");
///
/// let other = locate("http://example.com:8080/page.html").unwrap();
/// assert_eq!(other, "http://example.com:8080/robots.txt");
/// ```
pub fn locate(url_str: &str) -> UrlResult<String> {
    let url = Url::parse(url_str).map_err(|e| match e {
        ParseError::RelativeUrlWithoutBase => UrlError::NotAbsolute(url_str.to_string()),
        other => UrlError::Parse(format!("{url_str}: {other}")),
    })?;

    let host = match url.host() {
        Some(Host::Domain(domain)) => url::quirks::domain_to_unicode(domain).to_lowercase(),
        Some(ip) => ip.to_string(),
        None => return Err(UrlError::MissingHost(url_str.to_string())),
    };
    if host.is_empty() {
        return Err(UrlError::MissingHost(url_str.to_string()));
    }

    // The url crate already omits ports that are the scheme's default
    let mut robots = format!("{}://{}", url.scheme().to_lowercase(), host);
    if let Some(port) = url.port() {
        robots.push_str(&format!(":{port}"));
    }
    robots.push_str("/robots.txt");
    Ok(robots)
}
