use crate::ports::DnsLookup;
use cdnscope_domain::{
    registrable_suffix, CdnSuffixSet, CnameRecord, CnameVerdict, DomainError, ResolverEndpoint,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Follows at most two CNAME hops and matches their registrable suffixes
/// against the known CDN set.
pub struct CnameInspector {
    lookup: Arc<dyn DnsLookup>,
    suffixes: Arc<CdnSuffixSet>,
    resolver: ResolverEndpoint,
    query_timeout: Duration,
}

impl CnameInspector {
    pub fn new(
        lookup: Arc<dyn DnsLookup>,
        suffixes: Arc<CdnSuffixSet>,
        resolver: ResolverEndpoint,
        query_timeout: Duration,
    ) -> Self {
        Self {
            lookup,
            suffixes,
            resolver,
            query_timeout,
        }
    }

    pub async fn inspect(&self, domain: &str) -> CnameVerdict {
        let first = match self.hop(domain).await {
            CnameRecord::Canonical(name) => name,
            CnameRecord::NoData => return CnameVerdict::NoCname,
        };

        if let Some(suffix) = self.known_suffix(&first) {
            debug!(%domain, cname = %first, %suffix, "First CNAME hop is a known CDN");
            return CnameVerdict::ConfirmedCdn { suffix };
        }

        if let CnameRecord::Canonical(second) = self.hop(&first).await {
            if let Some(suffix) = self.known_suffix(&second) {
                debug!(%domain, cname = %second, %suffix, "Second CNAME hop is a known CDN");
                return CnameVerdict::ConfirmedCdn { suffix };
            }
        }

        CnameVerdict::UnknownCname { target: first }
    }

    /// One CNAME query. Timeouts and resolver errors degrade to `NoData`.
    async fn hop(&self, name: &str) -> CnameRecord {
        let query = self
            .lookup
            .lookup_cname(name, self.resolver, self.query_timeout);
        let result = match timeout(self.query_timeout, query).await {
            Ok(r) => r,
            Err(_) => Err(DomainError::QueryTimeout),
        };

        match result {
            Ok(record) => record,
            Err(e) if e.is_transient() => {
                debug!(%name, resolver = %self.resolver, error = %e, "CNAME lookup failed, treating as no data");
                CnameRecord::NoData
            }
            Err(e) => {
                warn!(%name, resolver = %self.resolver, error = %e, "Unexpected CNAME lookup error, treating as no data");
                CnameRecord::NoData
            }
        }
    }

    fn known_suffix(&self, name: &str) -> Option<Arc<str>> {
        self.suffixes.get(registrable_suffix(name)).cloned()
    }
}
