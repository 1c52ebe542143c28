// src/config.rs
// =============================================================================
// Runtime configuration, built once from the parsed command line.
//
// Every value has a flag, an environment variable fallback (handled by clap)
// and a default, so `dev-finder search` works with no setup at all.
// =============================================================================

use anyhow::{bail, Context, Result};
use std::time::Duration;
use url::Url;

use crate::cli::Cli;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the GitHub REST API
    pub api_url: Url,
    /// Quiet period before a typed term is searched
    pub debounce: Duration,
    pub user_agent: String,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let api_url = Url::parse(&cli.api_url)
            .with_context(|| format!("Invalid API URL '{}'", cli.api_url))?;

        if !matches!(api_url.scheme(), "http" | "https") {
            bail!("API URL must use http or https: {}", api_url);
        }

        Ok(Self {
            api_url,
            debounce: Duration::from_millis(cli.debounce_ms),
            user_agent: format!("dev-finder/{}", env!("CARGO_PKG_VERSION")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["dev-finder", "search"]).unwrap();
        let config = Config::from_cli(&cli).unwrap();

        assert_eq!(config.api_url.as_str(), "https://api.github.com/");
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert!(config.user_agent.starts_with("dev-finder/"));
    }

    #[test]
    fn test_custom_values() {
        let cli = Cli::try_parse_from([
            "dev-finder",
            "--api-url",
            "http://localhost:8080/api/v3",
            "--debounce-ms",
            "50",
            "search",
        ])
        .unwrap();
        let config = Config::from_cli(&cli).unwrap();

        assert_eq!(config.api_url.host_str(), Some("localhost"));
        assert_eq!(config.debounce, Duration::from_millis(50));
    }

    #[test]
    fn test_rejects_bad_urls() {
        for url in ["not a url", "ftp://example.com"] {
            let cli = Cli::try_parse_from(["dev-finder", "--api-url", url, "search"]).unwrap();
            assert!(Config::from_cli(&cli).is_err(), "{url} should be rejected");
        }
    }
}
