pub mod dns_lookup;
pub mod geo_locator;

pub use dns_lookup::DnsLookup;
pub use geo_locator::GeoLocator;
