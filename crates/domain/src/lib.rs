//! cdnscope domain layer
pub mod batch;
pub mod cdn_suffix;
pub mod classification;
pub mod cname;
pub mod config;
pub mod diversity;
pub mod errors;
pub mod geo;
pub mod resolved_ip;
pub mod resolver_endpoint;
pub mod validators;
pub mod verdict;

pub use batch::BatchReport;
pub use cdn_suffix::CdnSuffixSet;
pub use classification::{Classification, DecisionPath, DomainOutcome, DomainRecord};
pub use cname::{registrable_suffix, CnameRecord, CnameVerdict};
pub use config::{CliOverrides, Config, ConfigError};
pub use diversity::{
    DiversityReport, DiversityThresholds, DEFAULT_LOCATION_THRESHOLD, DEFAULT_SUBNET_THRESHOLD,
};
pub use errors::DomainError;
pub use geo::GeoLocation;
pub use resolved_ip::{ResolvedIp, Subnet24};
pub use resolver_endpoint::ResolverEndpoint;
pub use validators::validate_domain_name;
pub use verdict::Verdict;
