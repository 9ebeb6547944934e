//! HTTP transport for robots.txt files
//!
//! This module fetches the robots.txt file that governs a URL. It applies
//! no retry or caching policy; callers that need either wrap these
//! functions.

use crate::config::UserAgentConfig;
use crate::url::locate;
use crate::{Robots, RobotsError};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use robots_scope::config::UserAgentConfig;
/// use robots_scope::fetch::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::named("ExampleBot")).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches and parses the robots.txt file governing `url`
///
/// `url` may be any absolute URL in the scope of the robots.txt file,
/// including the robots.txt URL itself.
///
/// # Status Handling
///
/// - 2xx: the body is parsed
/// - 4xx: there is no usable robots.txt, so everything is allowed
/// - anything else: [`RobotsError::Status`]
///
/// # Returns
///
/// * `Ok(Robots)` - The rule set governing `url`
/// * `Err(RobotsError)` - `url` has no scope, the request failed, or the
///   server answered with an error status
pub async fn fetch_robots(client: &Client, url: &str) -> Result<Robots, RobotsError> {
    let robots_url = locate(url)?;
    debug!("Fetching {}", robots_url);

    let response = client
        .get(&robots_url)
        .send()
        .await
        .map_err(|source| RobotsError::Http {
            url: robots_url.clone(),
            source,
        })?;

    let status = response.status();
    if status.is_success() {
        let body = response.bytes().await.map_err(|source| RobotsError::Http {
            url: robots_url.clone(),
            source,
        })?;
        let robots = Robots::from_reader(&body[..])?;
        debug!(
            "Parsed {} ({} groups, {} sitemaps)",
            robots_url,
            robots.groups().len(),
            robots.sitemaps().len()
        );
        Ok(robots)
    } else if status.is_client_error() {
        warn!(
            "{} returned {}, treating as allow-all",
            robots_url,
            status.as_u16()
        );
        Ok(Robots::default())
    } else {
        Err(RobotsError::Status {
            url: robots_url,
            status: status.as_u16(),
        })
    }
}
