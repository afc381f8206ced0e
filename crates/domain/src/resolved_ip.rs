use crate::ResolverEndpoint;
use ipnetwork::Ipv4Network;
use std::fmt;
use std::net::Ipv4Addr;

const SUBNET_PREFIX: u8 = 24;

/// IPv4 address returned by an A query, tagged with the resolver that saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedIp {
    pub addr: Ipv4Addr,
    pub resolver: ResolverEndpoint,
}

impl ResolvedIp {
    pub fn new(addr: Ipv4Addr, resolver: ResolverEndpoint) -> Self {
        Self { addr, resolver }
    }
}

/// /24 prefix of an IPv4 address (mask 255.255.255.0). Only used as a
/// deduplication key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subnet24(Ipv4Addr);

impl Subnet24 {
    pub fn of(addr: Ipv4Addr) -> Self {
        // A /24 prefix is always valid for Ipv4Network.
        let network = Ipv4Network::new(addr, SUBNET_PREFIX)
            .map(|n| n.network())
            .unwrap_or(addr);
        Self(network)
    }

    pub fn network(&self) -> Ipv4Addr {
        self.0
    }
}

impl fmt::Display for Subnet24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, SUBNET_PREFIX)
    }
}
