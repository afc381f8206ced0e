//! Configuration for cdnscope
//!
//! - `root`: top-level configuration, TOML loading and CLI overrides
//! - `classifier`: thresholds, sampling, concurrency and timeouts
//! - `data`: locations of resolver, CDN suffix and geo data files
//! - `output`: where result files are written
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod classifier;
pub mod data;
pub mod errors;
pub mod logging;
pub mod output;
pub mod root;

pub use classifier::ClassifierConfig;
pub use data::DataConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use output::OutputConfig;
pub use root::{CliOverrides, Config};
