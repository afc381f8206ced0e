use async_trait::async_trait;
use cdnscope_domain::{CnameRecord, DomainError, ResolverEndpoint};
use std::net::Ipv4Addr;
use std::time::Duration;

/// A and CNAME lookups against an explicit resolver.
///
/// Implementations must return within roughly `timeout`, reporting
/// `DomainError::QueryTimeout` when it elapses. Callers additionally bound
/// every call with their own timer.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    async fn lookup_cname(
        &self,
        domain: &str,
        resolver: ResolverEndpoint,
        timeout: Duration,
    ) -> Result<CnameRecord, DomainError>;

    async fn lookup_a(
        &self,
        domain: &str,
        resolver: ResolverEndpoint,
        timeout: Duration,
    ) -> Result<Vec<Ipv4Addr>, DomainError>;
}
