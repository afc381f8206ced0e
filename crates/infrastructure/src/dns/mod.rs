pub mod forwarding;
pub mod lookup;
pub mod transport;

pub use lookup::HickoryDnsLookup;
