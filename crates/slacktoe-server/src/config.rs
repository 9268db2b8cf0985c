use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Placeholder tokens that MUST NOT be used.
const PLACEHOLDER_TOKENS: &[&str] = &["change-me", "your-slack-verification-token"];

#[derive(Debug, Clone)]
pub struct Config {
    pub slack_token: String,
    pub db_path: PathBuf,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let slack_token = get("SLACK_TOKEN").unwrap_or_default();
        if slack_token.is_empty() || PLACEHOLDER_TOKENS.contains(&slack_token.as_str()) {
            bail!("SLACK_TOKEN is unset or still a placeholder; copy it from the Slack app settings");
        }

        let db_path: PathBuf = get("SLACKTOE_DB_PATH")
            .unwrap_or_else(|| "slacktoe.db".into())
            .into();
        let host = get("SLACKTOE_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = get("SLACKTOE_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()?;
        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

        Ok(Self {
            slack_token,
            db_path,
            addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[("SLACK_TOKEN", "abc123")]).unwrap();
        assert_eq!(config.slack_token, "abc123");
        assert_eq!(config.db_path, PathBuf::from("slacktoe.db"));
        assert_eq!(config.addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn refuses_missing_or_placeholder_token() {
        assert!(load(&[]).is_err());
        assert!(load(&[("SLACK_TOKEN", "change-me")]).is_err());
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("SLACK_TOKEN", "abc123"),
            ("SLACKTOE_HOST", "127.0.0.1"),
            ("SLACKTOE_PORT", "8080"),
            ("SLACKTOE_DB_PATH", "/var/lib/slacktoe/games.db"),
        ])
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.db_path, PathBuf::from("/var/lib/slacktoe/games.db"));
        assert!(load(&[("SLACK_TOKEN", "abc123"), ("SLACKTOE_PORT", "http")]).is_err());
    }
}
