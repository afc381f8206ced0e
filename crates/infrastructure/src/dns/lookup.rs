use super::forwarding::{DnsResponse, MessageBuilder, QueryKind, ResponseParser};
use super::transport::Transport;
use async_trait::async_trait;
use cdnscope_application::ports::DnsLookup;
use cdnscope_domain::{CnameRecord, DomainError, ResolverEndpoint};
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};
use tracing::debug;

/// `DnsLookup` over plain DNS: UDP first, TCP retry when the answer is
/// truncated.
#[derive(Debug, Clone, Default)]
pub struct HickoryDnsLookup;

impl HickoryDnsLookup {
    pub fn new() -> Self {
        Self
    }

    async fn query(
        &self,
        domain: &str,
        kind: QueryKind,
        resolver: ResolverEndpoint,
        timeout: Duration,
    ) -> Result<DnsResponse, DomainError> {
        let start = Instant::now();
        let (id, query_bytes) = MessageBuilder::build_query(domain, kind)?;

        let udp = Transport::udp(resolver.addr());
        let transport_response = udp.send(&query_bytes, timeout).await?;
        let mut response = Self::parse_matching(&transport_response.bytes, id)?;

        if response.truncated {
            debug!(server = %resolver, %domain, "Response truncated (TC bit), retrying via TCP");

            let remaining = timeout
                .checked_sub(start.elapsed())
                .unwrap_or(Duration::from_millis(500));

            let tcp = Transport::tcp(resolver.addr());
            let tcp_response = tcp.send(&query_bytes, remaining).await?;
            response = Self::parse_matching(&tcp_response.bytes, id)?;
        }

        debug!(
            server = %resolver,
            %domain,
            query_type = %kind,
            status = ResponseParser::rcode_to_status(response.rcode),
            latency_ms = start.elapsed().as_millis() as u64,
            "Lookup answered"
        );

        if response.is_nxdomain() {
            return Err(DomainError::NxDomain(domain.to_string()));
        }
        if response.is_server_error() {
            return Err(DomainError::ServerFailure(format!(
                "{} answered {} for {}",
                resolver,
                ResponseParser::rcode_to_status(response.rcode),
                domain
            )));
        }

        Ok(response)
    }

    fn parse_matching(bytes: &[u8], expected_id: u16) -> Result<DnsResponse, DomainError> {
        let response = ResponseParser::parse(bytes)?;
        if response.id != expected_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {} does not match query ID {}",
                response.id, expected_id
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl DnsLookup for HickoryDnsLookup {
    async fn lookup_cname(
        &self,
        domain: &str,
        resolver: ResolverEndpoint,
        timeout: Duration,
    ) -> Result<CnameRecord, DomainError> {
        let response = self.query(domain, QueryKind::Cname, resolver, timeout).await?;
        Ok(response
            .cname_chain
            .first()
            .map(|name| CnameRecord::Canonical(name.clone()))
            .unwrap_or(CnameRecord::NoData))
    }

    async fn lookup_a(
        &self,
        domain: &str,
        resolver: ResolverEndpoint,
        timeout: Duration,
    ) -> Result<Vec<Ipv4Addr>, DomainError> {
        let response = self.query(domain, QueryKind::A, resolver, timeout).await?;
        Ok(response.addresses)
    }
}
