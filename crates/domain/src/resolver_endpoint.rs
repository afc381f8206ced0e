use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

const DEFAULT_DNS_PORT: u16 = 53;

/// Address of a third-party recursive resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolverEndpoint {
    addr: SocketAddr,
}

impl ResolverEndpoint {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl From<IpAddr> for ResolverEndpoint {
    fn from(ip: IpAddr) -> Self {
        Self::new(SocketAddr::new(ip, DEFAULT_DNS_PORT))
    }
}

impl From<SocketAddr> for ResolverEndpoint {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr)
    }
}

/// Accepts `1.1.1.1`, `1.1.1.1:5353`, `2606:4700::1111` and `[2606:4700::1111]:53`.
impl FromStr for ResolverEndpoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(Self::new(addr));
        }
        s.parse::<IpAddr>()
            .map(Self::from)
            .map_err(|_| DomainError::InvalidIpAddress(format!("Invalid resolver address '{}'", s)))
    }
}

impl fmt::Display for ResolverEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.addr.port() == DEFAULT_DNS_PORT {
            write!(f, "{}", self.addr.ip())
        } else {
            write!(f, "{}", self.addr)
        }
    }
}
