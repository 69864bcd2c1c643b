//! Configuration for the migration reporter

use core_config::{CatalogConfig, Environment, FromEnv};
use domain_migration_report::ReportOptions;
use eyre::Result;

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub catalog: CatalogConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            environment: Environment::from_env(),
            catalog: CatalogConfig::from_env()?,
        })
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            max_concurrency: self.catalog.max_concurrency,
            fetch_timeout: self.catalog.timeout(),
            overall_timeout: self.catalog.report_timeout(),
        }
    }
}
