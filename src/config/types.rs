use serde::Deserialize;

/// Main configuration structure for Robots-Scope
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Product token matched against `User-agent` lines
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version sent in the HTTP `User-Agent` header
    #[serde(rename = "crawler-version", default)]
    pub crawler_version: Option<String>,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Creates a configuration with only a crawler name
    pub fn named(crawler_name: impl Into<String>) -> Self {
        Self {
            crawler_name: crawler_name.into(),
            crawler_version: None,
            contact_url: None,
        }
    }

    /// Formats the HTTP `User-Agent` header value
    ///
    /// Format: `CrawlerName[/Version][ (+ContactURL)]`
    pub fn header_value(&self) -> String {
        let mut value = self.crawler_name.clone();
        if let Some(version) = &self.crawler_version {
            value.push('/');
            value.push_str(version);
        }
        if let Some(url) = &self.contact_url {
            value.push_str(" (+");
            value.push_str(url);
            value.push(')');
        }
        value
    }
}

/// Defaults for the `check` command
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckConfig {
    /// Paths or absolute URLs checked when none are given on the command line
    #[serde(default)]
    pub paths: Vec<String>,
}
