//! Runtime configuration read from the environment.

use crate::{errors::AppError, models::TargetDistance, streams::StreamPolicy};

const DEFAULT_DATABASE_URL: &str = "postgres://docker:pg@0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    /// Target distances evaluated per activity, sorted and deduplicated.
    pub targets: Vec<TargetDistance>,
    pub stream_policy: StreamPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            targets: TargetDistance::defaults(),
            stream_policy: StreamPolicy::Validate,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Recognised keys: `DATABASE_URL`, `PORT`, `DATABASE_MAX_CONNECTIONS`,
    /// `EFFORT_TARGETS` (comma-separated meters) and `EFFORTS_TRUST_STREAMS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("PORT is not a valid port: {port}")))?;
        }

        if let Some(max) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = match max.trim().parse() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AppError::Config(format!(
                        "DATABASE_MAX_CONNECTIONS must be a positive integer: {max}"
                    )));
                }
            };
        }

        if let Some(targets) = lookup("EFFORT_TARGETS") {
            config.targets = parse_targets(&targets)?;
        }

        if let Some(trust) = lookup("EFFORTS_TRUST_STREAMS") {
            config.stream_policy = if parse_bool("EFFORTS_TRUST_STREAMS", &trust)? {
                StreamPolicy::Trust
            } else {
                StreamPolicy::Validate
            };
        }

        Ok(config)
    }
}

/// Parse a comma-separated list of target distances in meters.
pub fn parse_targets(value: &str) -> Result<Vec<TargetDistance>, AppError> {
    let mut targets = value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.parse::<TargetDistance>()
                .map_err(|_| AppError::Config(format!("Invalid target distance: {s:?}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if targets.is_empty() {
        return Err(AppError::Config("EFFORT_TARGETS is empty".to_string()));
    }

    targets.sort_unstable();
    targets.dedup();
    Ok(targets)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(AppError::Config(format!("{key} must be a boolean: {value}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.targets.len(), 14);
        assert_eq!(config.stream_policy, StreamPolicy::Validate);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/efforts"),
            ("PORT", "8080"),
            ("EFFORT_TARGETS", "5000, 100,1000,100"),
            ("EFFORTS_TRUST_STREAMS", "true"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://localhost/efforts");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.targets,
            vec![TargetDistance(100), TargetDistance(1000), TargetDistance(5000)]
        );
        assert_eq!(config.stream_policy, StreamPolicy::Trust);
    }

    #[test]
    fn test_invalid_values() {
        assert!(AppConfig::from_lookup(lookup_from(&[("PORT", "http")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("EFFORT_TARGETS", "100,far")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("EFFORT_TARGETS", " , ")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("EFFORTS_TRUST_STREAMS", "maybe")])).is_err());
    }
}
