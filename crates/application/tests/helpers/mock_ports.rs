#![allow(dead_code)]

use async_trait::async_trait;
use cdnscope_application::ports::{DnsLookup, GeoLocator};
use cdnscope_application::services::{
    CnameInspector, DiversityAnalyzer, DomainClassifier, FanoutResolver, ResolverPool,
};
use cdnscope_domain::{
    CdnSuffixSet, CnameRecord, DiversityThresholds, DomainError, GeoLocation, ResolverEndpoint,
};
use std::collections::{HashMap, HashSet};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

pub fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

pub fn endpoint(i: u8) -> ResolverEndpoint {
    ResolverEndpoint::from(IpAddr::V4(Ipv4Addr::new(10, 53, 0, i)))
}

pub fn endpoints(n: u8) -> Vec<ResolverEndpoint> {
    (1..=n).map(endpoint).collect()
}

pub fn loc(city: &str) -> GeoLocation {
    GeoLocation::new("XX", "Region", city)
}

// ============================================================================
// Mock DnsLookup
// ============================================================================

#[derive(Default)]
pub struct MockDnsLookup {
    cnames: HashMap<String, Result<CnameRecord, DomainError>>,
    answers: HashMap<String, Vec<Ipv4Addr>>,
    per_resolver: HashMap<(String, ResolverEndpoint), Vec<Ipv4Addr>>,
    failing: HashSet<ResolverEndpoint>,
    hanging: HashSet<ResolverEndpoint>,
    hanging_domains: HashSet<String>,
    panicking_domains: HashSet<String>,
    cancel_on_cname: Option<CancellationToken>,
    cname_calls: AtomicU64,
    a_calls: AtomicU64,
    queried_resolvers: RwLock<Vec<ResolverEndpoint>>,
}

impl MockDnsLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cname(mut self, name: &str, target: &str) -> Self {
        self.cnames
            .insert(name.to_string(), Ok(CnameRecord::canonical(target)));
        self
    }

    pub fn with_cname_error(mut self, name: &str, error: DomainError) -> Self {
        self.cnames.insert(name.to_string(), Err(error));
        self
    }

    /// Every resolver answers `domain` with `ips`.
    pub fn with_answer(mut self, domain: &str, ips: &[&str]) -> Self {
        self.answers
            .insert(domain.to_string(), ips.iter().map(|s| ip(s)).collect());
        self
    }

    /// `resolver` answers `domain` with `ips`, overriding `with_answer`.
    pub fn with_resolver_answer(
        mut self,
        domain: &str,
        resolver: ResolverEndpoint,
        ips: &[&str],
    ) -> Self {
        self.per_resolver.insert(
            (domain.to_string(), resolver),
            ips.iter().map(|s| ip(s)).collect(),
        );
        self
    }

    pub fn with_failing_resolver(mut self, resolver: ResolverEndpoint) -> Self {
        self.failing.insert(resolver);
        self
    }

    pub fn with_hanging_resolver(mut self, resolver: ResolverEndpoint) -> Self {
        self.hanging.insert(resolver);
        self
    }

    /// CNAME lookups for `domain` never return.
    pub fn with_hanging_domain(mut self, domain: &str) -> Self {
        self.hanging_domains.insert(domain.to_string());
        self
    }

    pub fn with_panicking_domain(mut self, domain: &str) -> Self {
        self.panicking_domains.insert(domain.to_string());
        self
    }

    pub fn cancel_on_first_cname(mut self, token: CancellationToken) -> Self {
        self.cancel_on_cname = Some(token);
        self
    }

    pub fn cname_calls(&self) -> u64 {
        self.cname_calls.load(Ordering::Relaxed)
    }

    pub fn a_calls(&self) -> u64 {
        self.a_calls.load(Ordering::Relaxed)
    }

    pub async fn queried_resolvers(&self) -> Vec<ResolverEndpoint> {
        self.queried_resolvers.read().await.clone()
    }
}

#[async_trait]
impl DnsLookup for MockDnsLookup {
    async fn lookup_cname(
        &self,
        domain: &str,
        _resolver: ResolverEndpoint,
        _timeout: Duration,
    ) -> Result<CnameRecord, DomainError> {
        self.cname_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(token) = &self.cancel_on_cname {
            token.cancel();
        }
        if self.panicking_domains.contains(domain) {
            panic!("mock lookup exploded for {}", domain);
        }
        if self.hanging_domains.contains(domain) {
            std::future::pending::<()>().await;
        }
        match self.cnames.get(domain) {
            Some(result) => result.clone(),
            None => Ok(CnameRecord::NoData),
        }
    }

    async fn lookup_a(
        &self,
        domain: &str,
        resolver: ResolverEndpoint,
        _timeout: Duration,
    ) -> Result<Vec<Ipv4Addr>, DomainError> {
        self.a_calls.fetch_add(1, Ordering::Relaxed);
        self.queried_resolvers.write().await.push(resolver);

        if self.hanging.contains(&resolver) {
            std::future::pending::<()>().await;
        }
        if self.failing.contains(&resolver) {
            return Err(DomainError::TransportError(format!(
                "{} unreachable",
                resolver
            )));
        }
        if let Some(ips) = self.per_resolver.get(&(domain.to_string(), resolver)) {
            return Ok(ips.clone());
        }
        match self.answers.get(domain) {
            Some(ips) => Ok(ips.clone()),
            None => Err(DomainError::NxDomain(domain.to_string())),
        }
    }
}

// ============================================================================
// Mock GeoLocator
// ============================================================================

#[derive(Default)]
pub struct MockGeoLocator {
    table: HashMap<Ipv4Addr, GeoLocation>,
    calls: AtomicU64,
}

impl MockGeoLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, addr: &str, location: GeoLocation) -> Self {
        self.table.insert(ip(addr), location);
        self
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl GeoLocator for MockGeoLocator {
    fn locate(&self, ip: Ipv4Addr) -> GeoLocation {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.table.get(&ip).cloned().unwrap_or_default()
    }
}

// ============================================================================
// Wiring
// ============================================================================

pub const TEST_QUERY_TIMEOUT: Duration = Duration::from_millis(200);

pub fn build_classifier(
    lookup: Arc<MockDnsLookup>,
    geo: Arc<MockGeoLocator>,
    suffixes: &[&str],
    pool_size: u8,
    sample_size: usize,
) -> DomainClassifier {
    let inspector = CnameInspector::new(
        lookup.clone(),
        Arc::new(CdnSuffixSet::new(suffixes.iter().copied())),
        endpoint(250),
        TEST_QUERY_TIMEOUT,
    );
    let fanout = FanoutResolver::new(lookup, TEST_QUERY_TIMEOUT);
    let analyzer = DiversityAnalyzer::new(geo, DiversityThresholds::default());
    let pool = ResolverPool::new(endpoints(pool_size), sample_size).unwrap();
    DomainClassifier::new(inspector, fanout, analyzer, Arc::new(pool))
}
