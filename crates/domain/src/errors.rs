use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Domain does not exist: {0}")]
    NxDomain(String),

    #[error("Upstream server failure: {0}")]
    ServerFailure(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Resolver pool too small: {available} endpoints available, {requested} requested")]
    InsufficientResolvers { requested: usize, available: usize },

    #[error("Classification exceeded {0}ms deadline")]
    ClassificationTimeout(u64),

    #[error("Classification task panicked: {0}")]
    ClassificationPanicked(String),
}

impl DomainError {
    /// Failures that only invalidate a single query and degrade to "no data".
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::QueryTimeout
                | Self::NxDomain(_)
                | Self::ServerFailure(_)
                | Self::TransportError(_)
                | Self::InvalidDnsResponse(_)
                | Self::IoError(_)
        )
    }
}
