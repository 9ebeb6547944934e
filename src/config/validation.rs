use crate::config::types::{CheckConfig, Config, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_user_agent_config(&config.user_agent)?;
    validate_check_config(&config.check)?;
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    validate_crawler_name(&config.crawler_name)?;

    if let Some(version) = &config.crawler_version {
        if version.is_empty() || version.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ConfigError::Validation(format!(
                "crawler_version must be a non-empty token without whitespace, got '{}'",
                version
            )));
        }
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url).map_err(|e| {
            ConfigError::Validation(format!("Invalid contact_url '{}': {}", contact_url, e))
        })?;
    }

    Ok(())
}

/// Validates the crawler name
///
/// The name is what robots.txt `User-agent` lines are matched against, so
/// it may not contain characters that cannot appear in such a line's value.
fn validate_crawler_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if name
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == ':' || c == '#')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name cannot contain whitespace, ':' or '#', got '{}'",
            name
        )));
    }

    Ok(())
}

/// Validates the default check targets
fn validate_check_config(config: &CheckConfig) -> Result<(), ConfigError> {
    for path in &config.paths {
        validate_check_target(path)?;
    }
    Ok(())
}

/// A target must be an absolute path or an absolute HTTP(S) URL
fn validate_check_target(target: &str) -> Result<(), ConfigError> {
    if target.starts_with('/') {
        return Ok(());
    }

    let url = Url::parse(target).map_err(|e| {
        ConfigError::Validation(format!(
            "Check target '{}' must be a path starting with '/' or an absolute URL: {}",
            target, e
        ))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Check target '{}' must use HTTP or HTTPS",
            target
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_crawler_name() {
        assert!(validate_crawler_name("ExampleBot").is_ok());
        assert!(validate_crawler_name("Example-Bot_2.0").is_ok());

        assert!(validate_crawler_name("").is_err());
        assert!(validate_crawler_name("Example Bot").is_err());
        assert!(validate_crawler_name("bot:1").is_err());
        assert!(validate_crawler_name("bot#1").is_err());
        assert!(validate_crawler_name("bot\t").is_err());
    }

    #[test]
    fn test_validate_check_target() {
        assert!(validate_check_target("/").is_ok());
        assert!(validate_check_target("/private/page.html?x=1").is_ok());
        assert!(validate_check_target("https://example.com/page").is_ok());
        assert!(validate_check_target("http://example.com:8080/").is_ok());

        assert!(validate_check_target("").is_err());
        assert!(validate_check_target("page.html").is_err());
        assert!(validate_check_target("ftp://example.com/file").is_err());
    }

    #[test]
    fn test_validate_user_agent_config() {
        let mut config = UserAgentConfig::named("ExampleBot");
        assert!(validate_user_agent_config(&config).is_ok());

        config.contact_url = Some("not a url".to_string());
        assert!(validate_user_agent_config(&config).is_err());

        config.contact_url = Some("https://example.com/bot".to_string());
        config.crawler_version = Some("1 0".to_string());
        assert!(validate_user_agent_config(&config).is_err());
    }
}
