use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Runtime configuration loaded from environment variables.
/// Command-line flags override these per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Delay between lines when replaying a recording.
    pub replay_interval: Duration,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let replay_interval_ms: u64 = match lookup("KQSTATS_REPLAY_INTERVAL_MS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("KQSTATS_REPLAY_INTERVAL_MS must be a number, got {raw:?}"))?,
            None => 1000,
        };

        let log_format = match lookup("KQSTATS_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | None => LogFormat::Pretty,
            Some(other) => bail!("KQSTATS_LOG_FORMAT must be \"pretty\" or \"json\", got {other:?}"),
        };

        Ok(Self {
            replay_interval: Duration::from_millis(replay_interval_ms),
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.replay_interval, Duration::from_secs(1));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("KQSTATS_REPLAY_INTERVAL_MS", "250"),
            ("KQSTATS_LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.replay_interval, Duration::from_millis(250));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(Config::from_lookup(lookup(&[("KQSTATS_REPLAY_INTERVAL_MS", "soon")])).is_err());
        assert!(Config::from_lookup(lookup(&[("KQSTATS_LOG_FORMAT", "xml")])).is_err());
    }
}
