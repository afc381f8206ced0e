use crate::ports::GeoLocator;
use cdnscope_domain::{DiversityReport, DiversityThresholds, GeoLocation, Subnet24, Verdict};
use rustc_hash::FxHashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::trace;

/// Distinct /24 subnets covered by `ips`.
pub fn distinct_subnets(ips: &[Ipv4Addr]) -> FxHashSet<Subnet24> {
    ips.iter().map(|ip| Subnet24::of(*ip)).collect()
}

/// Applies the subnet and location diversity rule to a fan-out result.
pub struct DiversityAnalyzer {
    geo: Arc<dyn GeoLocator>,
    thresholds: DiversityThresholds,
}

impl DiversityAnalyzer {
    pub fn new(geo: Arc<dyn GeoLocator>, thresholds: DiversityThresholds) -> Self {
        Self { geo, thresholds }
    }

    /// Measures diversity. Addresses are deduplicated first so each one is
    /// geo-located exactly once.
    pub fn measure(&self, ips: &[Ipv4Addr]) -> DiversityReport {
        let mut seen = FxHashSet::default();
        let unique: Vec<Ipv4Addr> = ips.iter().copied().filter(|ip| seen.insert(*ip)).collect();

        let subnets = distinct_subnets(&unique);

        let locations: FxHashSet<GeoLocation> = unique
            .iter()
            .map(|ip| {
                let location = self.geo.locate(*ip);
                trace!(%ip, %location, "Geo lookup");
                location
            })
            .filter(|location| !location.is_unknown())
            .collect();

        DiversityReport {
            unique_ips: unique.len(),
            distinct_subnets: subnets.len(),
            distinct_locations: locations.len(),
        }
    }

    pub fn evaluate(&self, ips: &[Ipv4Addr]) -> (Verdict, DiversityReport) {
        let report = self.measure(ips);
        (report.verdict(&self.thresholds), report)
    }
}
