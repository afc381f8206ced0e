use crate::{DiversityThresholds, DEFAULT_LOCATION_THRESHOLD, DEFAULT_SUBNET_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resolvers sampled (without replacement) for each fan-out.
pub const DEFAULT_SAMPLE_SIZE: usize = 30;

/// Domains classified concurrently.
pub const DEFAULT_WORKERS: usize = 4;

/// Upper bound on `workers`; each one holds a task, a semaphore permit and
/// two channel slots.
pub const MAX_WORKERS: usize = 1024;

pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 3_000;

pub const DEFAULT_DOMAIN_TIMEOUT_MS: u64 = 60_000;

pub const DEFAULT_CNAME_RESOLVER: &str = "8.8.8.8:53";

/// Classification engine settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Resolvers queried per fan-out (default: 30)
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Distinct /24 subnets must be strictly greater than this (default: 3)
    #[serde(default = "default_subnet_threshold")]
    pub subnet_threshold: usize,

    /// Distinct known locations must be strictly greater than this (default: 3)
    #[serde(default = "default_location_threshold")]
    pub location_threshold: usize,

    /// Concurrent domain classifications (default: 4)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Timeout for each individual DNS query in milliseconds
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Overall deadline for one domain in milliseconds, 0 disables it
    #[serde(default = "default_domain_timeout_ms")]
    pub domain_timeout_ms: u64,

    /// Resolver used for the CNAME hops
    #[serde(default = "default_cname_resolver")]
    pub cname_resolver: String,
}

impl ClassifierConfig {
    pub fn thresholds(&self) -> DiversityThresholds {
        DiversityThresholds {
            subnets: self.subnet_threshold,
            locations: self.location_threshold,
        }
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn domain_timeout(&self) -> Option<Duration> {
        (self.domain_timeout_ms > 0).then(|| Duration::from_millis(self.domain_timeout_ms))
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            subnet_threshold: default_subnet_threshold(),
            location_threshold: default_location_threshold(),
            workers: default_workers(),
            query_timeout_ms: default_query_timeout_ms(),
            domain_timeout_ms: default_domain_timeout_ms(),
            cname_resolver: default_cname_resolver(),
        }
    }
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

fn default_subnet_threshold() -> usize {
    DEFAULT_SUBNET_THRESHOLD
}

fn default_location_threshold() -> usize {
    DEFAULT_LOCATION_THRESHOLD
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_query_timeout_ms() -> u64 {
    DEFAULT_QUERY_TIMEOUT_MS
}

fn default_domain_timeout_ms() -> u64 {
    DEFAULT_DOMAIN_TIMEOUT_MS
}

fn default_cname_resolver() -> String {
    DEFAULT_CNAME_RESOLVER.to_string()
}
