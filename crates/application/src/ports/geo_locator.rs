use cdnscope_domain::GeoLocation;
use std::net::Ipv4Addr;

/// Maps an address to a coarse location.
///
/// Must be a pure function of the address. Lookups that fail return
/// `GeoLocation::unknown()`.
pub trait GeoLocator: Send + Sync {
    fn locate(&self, ip: Ipv4Addr) -> GeoLocation;
}
