use std::fmt;
use std::sync::Arc;

/// Coarse location of an IP address (country, region, city).
///
/// The unknown location has every field empty and never counts toward
/// location diversity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GeoLocation {
    pub country: Arc<str>,
    pub region: Arc<str>,
    pub city: Arc<str>,
}

impl GeoLocation {
    pub fn new(
        country: impl Into<Arc<str>>,
        region: impl Into<Arc<str>>,
        city: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            country: country.into(),
            region: region.into(),
            city: city.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_unknown(&self) -> bool {
        self.country.is_empty() && self.region.is_empty() && self.city.is_empty()
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return f.write_str("unknown");
        }
        write!(f, "{}/{}/{}", self.country, self.region, self.city)
    }
}
