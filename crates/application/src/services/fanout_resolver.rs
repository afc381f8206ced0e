use crate::ports::DnsLookup;
use cdnscope_domain::{DomainError, ResolvedIp, ResolverEndpoint};
use rustc_hash::FxHashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Union of the A records returned by every responsive resolver.
#[derive(Debug, Clone, Default)]
pub struct FanoutResult {
    /// Deduplicated by address; each entry keeps the first resolver that
    /// returned it.
    pub ips: Vec<ResolvedIp>,
    pub succeeded: usize,
    pub failed: usize,
}

impl FanoutResult {
    pub fn addresses(&self) -> Vec<Ipv4Addr> {
        self.ips.iter().map(|ip| ip.addr).collect()
    }
}

/// Sends the same A query to many resolvers at once.
pub struct FanoutResolver {
    lookup: Arc<dyn DnsLookup>,
    query_timeout: Duration,
}

impl FanoutResolver {
    pub fn new(lookup: Arc<dyn DnsLookup>, query_timeout: Duration) -> Self {
        Self {
            lookup,
            query_timeout,
        }
    }

    /// Query every resolver concurrently, each bounded by its own timeout.
    ///
    /// The `JoinSet` is local to the call; dropping it on any exit path
    /// aborts whatever is still running.
    pub async fn resolve(&self, domain: &Arc<str>, resolvers: &[ResolverEndpoint]) -> FanoutResult {
        debug!(%domain, resolvers = resolvers.len(), "Fanning out A queries");

        let mut tasks = JoinSet::new();
        for &resolver in resolvers {
            let lookup = Arc::clone(&self.lookup);
            let domain = Arc::clone(domain);
            let query_timeout = self.query_timeout;
            tasks.spawn(async move {
                let result =
                    match timeout(query_timeout, lookup.lookup_a(&domain, resolver, query_timeout))
                        .await
                    {
                        Ok(r) => r,
                        Err(_) => Err(DomainError::QueryTimeout),
                    };
                (resolver, result)
            });
        }

        let mut seen = FxHashSet::default();
        let mut result = FanoutResult::default();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((resolver, Ok(addrs))) => {
                    result.succeeded += 1;
                    for addr in addrs {
                        if seen.insert(addr) {
                            result.ips.push(ResolvedIp::new(addr, resolver));
                        }
                    }
                }
                Ok((resolver, Err(e))) if e.is_transient() => {
                    result.failed += 1;
                    debug!(%domain, %resolver, error = %e, "Resolver contributed no answer");
                }
                Ok((resolver, Err(e))) => {
                    result.failed += 1;
                    warn!(%domain, %resolver, error = %e, "Unexpected resolver error, no answer used");
                }
                Err(e) => {
                    result.failed += 1;
                    warn!(%domain, error = %e, "Fan-out query task failed");
                }
            }
        }

        debug!(
            %domain,
            unique_ips = result.ips.len(),
            succeeded = result.succeeded,
            failed = result.failed,
            "Fan-out complete"
        );

        result
    }
}
