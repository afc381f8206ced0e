use super::classifier::MAX_WORKERS;
use super::{ClassifierConfig, ConfigError, DataConfig, LoggingConfig, OutputConfig};
use crate::ResolverEndpoint;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub workers: Option<usize>,
    pub sample_size: Option<usize>,
    pub query_timeout_ms: Option<u64>,
    pub domain_timeout_ms: Option<u64>,
    pub cname_resolver: Option<String>,
    pub resolvers_file: Option<String>,
    pub cdn_cnames_file: Option<String>,
    pub geo_table_file: Option<String>,
    pub output_dir: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from an optional TOML file and apply CLI overrides.
    ///
    /// A missing explicit path is an error; with no path the defaults are used.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => {
                let contents =
                    std::fs::read_to_string(Path::new(p)).map_err(|e| ConfigError::FileRead {
                        path: p.to_string(),
                        source: e,
                    })?;
                Self::from_toml_str(&contents)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(workers) = overrides.workers {
            self.classifier.workers = workers;
        }
        if let Some(sample_size) = overrides.sample_size {
            self.classifier.sample_size = sample_size;
        }
        if let Some(ms) = overrides.query_timeout_ms {
            self.classifier.query_timeout_ms = ms;
        }
        if let Some(ms) = overrides.domain_timeout_ms {
            self.classifier.domain_timeout_ms = ms;
        }
        if let Some(resolver) = overrides.cname_resolver {
            self.classifier.cname_resolver = resolver;
        }
        if let Some(file) = overrides.resolvers_file {
            self.data.resolvers_file = file;
        }
        if let Some(file) = overrides.cdn_cnames_file {
            self.data.cdn_cnames_file = file;
        }
        if let Some(file) = overrides.geo_table_file {
            self.data.geo_table_file = Some(file);
        }
        if let Some(dir) = overrides.output_dir {
            self.output.dir = dir;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.classifier;
        if c.sample_size == 0 {
            return Err(ConfigError::Validation(
                "classifier.sample_size must be at least 1".to_string(),
            ));
        }
        if c.workers == 0 {
            return Err(ConfigError::Validation(
                "classifier.workers must be at least 1".to_string(),
            ));
        }
        if c.workers > MAX_WORKERS {
            return Err(ConfigError::Validation(format!(
                "classifier.workers must be at most {}",
                MAX_WORKERS
            )));
        }
        if c.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "classifier.query_timeout_ms must be at least 1".to_string(),
            ));
        }
        c.cname_resolver
            .parse::<ResolverEndpoint>()
            .map_err(|e| ConfigError::Validation(format!("classifier.cname_resolver: {}", e)))?;
        Ok(())
    }
}
