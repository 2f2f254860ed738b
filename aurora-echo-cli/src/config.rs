use anyhow::{Context, Result};
use std::path::PathBuf;

/// Ambient settings read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `echo.log`
    pub home: PathBuf,
    pub aws_profile: Option<String>,
    pub endpoint_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let home = match var("AURORA_ECHO_HOME") {
            Some(home) => PathBuf::from(home),
            None => var("HOME")
                .map(|home| PathBuf::from(home).join(".aurora-echo"))
                .context("AURORA_ECHO_HOME or HOME must be set")?,
        };

        Ok(Self {
            home,
            aws_profile: var("AURORA_ECHO_AWS_PROFILE"),
            endpoint_url: var("AURORA_ECHO_ENDPOINT_URL"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_under_home() {
        let config = load(&[("HOME", "/home/ops")]).unwrap();
        assert_eq!(config.home, PathBuf::from("/home/ops/.aurora-echo"));
        assert_eq!(config.aws_profile, None);
        assert_eq!(config.endpoint_url, None);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HOME", "/home/ops"),
            ("AURORA_ECHO_HOME", "/var/log/aurora-echo"),
            ("AURORA_ECHO_AWS_PROFILE", "prod"),
            ("AURORA_ECHO_ENDPOINT_URL", "http://localhost:4566"),
        ])
        .unwrap();
        assert_eq!(config.home, PathBuf::from("/var/log/aurora-echo"));
        assert_eq!(config.aws_profile.as_deref(), Some("prod"));
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = load(&[("HOME", "/home/ops"), ("AURORA_ECHO_AWS_PROFILE", " ")]).unwrap();
        assert_eq!(config.aws_profile, None);
        assert!(load(&[]).is_err());
    }
}
