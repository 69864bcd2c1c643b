use crate::{env_parse, env_required, ConfigError, FromEnv};
use std::time::Duration;

/// Connection settings for the inventory catalog REST API
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL, e.g. `http://localhost:1323/tumblebug`
    pub url: String,
    /// Deadline for one catalog read
    pub timeout_secs: u64,
    /// Upper bound on catalog reads in flight at once, across all resource kinds
    pub max_concurrency: usize,
    /// Deadline for a whole report generation
    pub report_timeout_secs: Option<u64>,
}

impl CatalogConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn report_timeout(&self) -> Option<Duration> {
        self.report_timeout_secs.map(Duration::from_secs)
    }
}

impl FromEnv for CatalogConfig {
    /// Reads from environment variables:
    /// - CATALOG_URL: required
    /// - CATALOG_TIMEOUT_SECS: defaults to 30
    /// - CATALOG_MAX_CONCURRENCY: defaults to 8, must be at least 1
    /// - REPORT_TIMEOUT_SECS: unset means no overall deadline
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("CATALOG_URL")?;
        let timeout_secs = env_parse("CATALOG_TIMEOUT_SECS", "30")?;
        let max_concurrency: usize = env_parse("CATALOG_MAX_CONCURRENCY", "8")?;
        if max_concurrency == 0 {
            return Err(ConfigError::ParseError {
                key: "CATALOG_MAX_CONCURRENCY".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        let report_timeout_secs = match std::env::var("REPORT_TIMEOUT_SECS") {
            Ok(value) => Some(value.parse().map_err(|e| ConfigError::ParseError {
                key: "REPORT_TIMEOUT_SECS".to_string(),
                details: format!("{}", e),
            })?),
            Err(_) => None,
        };

        Ok(Self {
            url,
            timeout_secs,
            max_concurrency,
            report_timeout_secs,
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:1323/tumblebug".to_string(),
            timeout_secs: 30,
            max_concurrency: 8,
            report_timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 4] = [
        "CATALOG_URL",
        "CATALOG_TIMEOUT_SECS",
        "CATALOG_MAX_CONCURRENCY",
        "REPORT_TIMEOUT_SECS",
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        KEYS.iter().map(|key| (*key, None)).collect()
    }

    #[test]
    fn test_catalog_config_from_env_with_defaults() {
        let mut vars = unset_all();
        vars[0].1 = Some("http://catalog:1323/tumblebug");

        temp_env::with_vars(vars, || {
            let config = CatalogConfig::from_env().unwrap();
            assert_eq!(config.url, "http://catalog:1323/tumblebug");
            assert_eq!(config.timeout(), Duration::from_secs(30));
            assert_eq!(config.max_concurrency, 8);
            assert_eq!(config.report_timeout(), None);
        });
    }

    #[test]
    fn test_catalog_config_from_env_with_overrides() {
        temp_env::with_vars(
            [
                ("CATALOG_URL", Some("http://10.0.0.5:1323/tumblebug")),
                ("CATALOG_TIMEOUT_SECS", Some("5")),
                ("CATALOG_MAX_CONCURRENCY", Some("2")),
                ("REPORT_TIMEOUT_SECS", Some("120")),
            ],
            || {
                let config = CatalogConfig::from_env().unwrap();
                assert_eq!(config.timeout_secs, 5);
                assert_eq!(config.max_concurrency, 2);
                assert_eq!(config.report_timeout(), Some(Duration::from_secs(120)));
            },
        );
    }

    #[test]
    fn test_catalog_config_requires_url() {
        temp_env::with_vars(unset_all(), || {
            let err = CatalogConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "CATALOG_URL"));
        });
    }

    #[test]
    fn test_catalog_config_rejects_zero_concurrency() {
        temp_env::with_vars(
            [
                ("CATALOG_URL", Some("http://catalog")),
                ("CATALOG_MAX_CONCURRENCY", Some("0")),
            ],
            || {
                let err = CatalogConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("CATALOG_MAX_CONCURRENCY"));
            },
        );
    }

    #[test]
    fn test_catalog_config_invalid_timeout() {
        temp_env::with_vars(
            [
                ("CATALOG_URL", Some("http://catalog")),
                ("CATALOG_TIMEOUT_SECS", Some("soon")),
            ],
            || {
                let err = CatalogConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "CATALOG_TIMEOUT_SECS"));
            },
        );
    }

    #[test]
    fn test_catalog_config_invalid_report_timeout() {
        temp_env::with_vars(
            [
                ("CATALOG_URL", Some("http://catalog")),
                ("REPORT_TIMEOUT_SECS", Some("-1")),
            ],
            || {
                assert!(CatalogConfig::from_env().is_err());
            },
        );
    }
}
