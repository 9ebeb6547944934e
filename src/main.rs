//! Robots-Scope main entry point
//!
//! This is the command-line interface for checking crawl permissions
//! against robots.txt files.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use robots_scope::config::{load_config, Config, UserAgentConfig};
use robots_scope::fetch::{build_http_client, fetch_robots};
use robots_scope::{locate, Robots};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Robots-Scope: robots.txt permission checker
///
/// Parses robots.txt files the way Google's crawler does and reports
/// whether a user agent may crawl the given paths.
#[derive(Parser, Debug)]
#[command(name = "robots-scope")]
#[command(version)]
#[command(about = "Check crawl permissions against robots.txt files", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether a user agent may crawl the given paths or URLs
    Check {
        /// robots.txt source: a file path, `-` for stdin, or an http(s) URL
        #[arg(value_name = "ROBOTS")]
        robots: String,

        /// Paths or URLs to check (defaults to the configured paths)
        #[arg(value_name = "TARGET")]
        targets: Vec<String>,

        /// User agent to check as (defaults to the configured crawler name)
        #[arg(short, long)]
        agent: Option<String>,
    },

    /// List the sitemap URLs declared in a robots.txt file
    Sitemaps {
        /// robots.txt source: a file path, `-` for stdin, or an http(s) URL
        #[arg(value_name = "ROBOTS")]
        robots: String,
    },

    /// Print the robots.txt URL that governs each URL
    Locate {
        /// Absolute URLs
        #[arg(value_name = "URL", required = true)]
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let config = load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            Some(config)
        }
        None => None,
    };

    match cli.command {
        Command::Check {
            robots,
            targets,
            agent,
        } => handle_check(config.as_ref(), &robots, targets, agent).await,
        Command::Sitemaps { robots } => handle_sitemaps(config.as_ref(), &robots).await,
        Command::Locate { urls } => handle_locate(&urls),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("robots_scope=info,warn"),
            1 => EnvFilter::new("robots_scope=debug,info"),
            2 => EnvFilter::new("robots_scope=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Returns the user agent identity for HTTP requests
fn user_agent_config(config: Option<&Config>, agent: Option<&str>) -> Option<UserAgentConfig> {
    match (config, agent) {
        (Some(config), None) => Some(config.user_agent.clone()),
        (Some(config), Some(agent)) => Some(UserAgentConfig {
            crawler_name: agent.to_string(),
            ..config.user_agent.clone()
        }),
        (None, Some(agent)) => Some(UserAgentConfig::named(agent)),
        (None, None) => None,
    }
}

/// Loads a robots.txt file from a path, stdin, or over HTTP
async fn load_robots(source: &str, user_agent: Option<&UserAgentConfig>) -> anyhow::Result<Robots> {
    if source == "-" {
        tracing::debug!("Reading robots.txt from stdin");
        return Robots::from_reader(std::io::stdin().lock()).context("Failed to read stdin");
    }

    if source.starts_with("http://") || source.starts_with("https://") {
        let default_agent = UserAgentConfig::named(env!("CARGO_PKG_NAME"));
        let client = build_http_client(user_agent.unwrap_or(&default_agent))?;
        return Ok(fetch_robots(&client, source).await?);
    }

    tracing::debug!("Reading robots.txt from {}", source);
    let file = File::open(source).with_context(|| format!("Failed to open {}", source))?;
    Robots::from_reader(BufReader::new(file)).with_context(|| format!("Failed to read {}", source))
}

/// Handles the check command: prints a verdict per target
async fn handle_check(
    config: Option<&Config>,
    source: &str,
    targets: Vec<String>,
    agent: Option<String>,
) -> anyhow::Result<ExitCode> {
    let Some(user_agent) = user_agent_config(config, agent.as_deref()) else {
        bail!("No user agent given: pass --agent or set [user-agent] crawler-name in the config");
    };

    let targets = if targets.is_empty() {
        config.map(|c| c.check.paths.clone()).unwrap_or_default()
    } else {
        targets
    };
    if targets.is_empty() {
        bail!("No targets given: pass paths or URLs, or set [check] paths in the config");
    }

    let robots = load_robots(source, Some(&user_agent)).await?;
    match robots.matched_agent(&user_agent.crawler_name) {
        Some(group) => tracing::info!(
            "{} matched user-agent group '{}'",
            user_agent.crawler_name,
            group
        ),
        None => tracing::info!(
            "No group applies to {}; everything is allowed",
            user_agent.crawler_name
        ),
    }

    let allowed = robots.tester(&user_agent.crawler_name);
    let mut all_allowed = true;
    for target in &targets {
        let verdict = if allowed(target) {
            "allow"
        } else {
            all_allowed = false;
            "disallow"
        };
        println!("{}\t{}", verdict, target);
    }

    Ok(if all_allowed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Handles the sitemaps command: prints declared sitemap URLs
async fn handle_sitemaps(config: Option<&Config>, source: &str) -> anyhow::Result<ExitCode> {
    let user_agent = user_agent_config(config, None);
    let robots = load_robots(source, user_agent.as_ref()).await?;
    for sitemap in robots.sitemaps() {
        println!("{}", sitemap);
    }
    Ok(ExitCode::SUCCESS)
}

/// Handles the locate command: prints the governing robots.txt URL per URL
fn handle_locate(urls: &[String]) -> anyhow::Result<ExitCode> {
    let mut status = ExitCode::SUCCESS;
    for url in urls {
        match locate(url) {
            Ok(robots_url) => println!("{}", robots_url),
            Err(e) => {
                tracing::error!("{}", e);
                status = ExitCode::FAILURE;
            }
        }
    }
    Ok(status)
}
