use crate::Verdict;
use serde::{Deserialize, Serialize};

/// Distinct /24 subnets a domain must exceed to count as CDN-fronted.
pub const DEFAULT_SUBNET_THRESHOLD: usize = 3;

/// Distinct known locations a domain must exceed to count as CDN-fronted.
pub const DEFAULT_LOCATION_THRESHOLD: usize = 3;

/// Exclusive lower bounds for the diversity decision.
///
/// Both counts must be strictly greater than their threshold. With the
/// defaults that means at least 4 subnets and 4 locations, so a handful of
/// co-located load-balanced servers stays `NoCdn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiversityThresholds {
    pub subnets: usize,
    pub locations: usize,
}

impl Default for DiversityThresholds {
    fn default() -> Self {
        Self {
            subnets: DEFAULT_SUBNET_THRESHOLD,
            locations: DEFAULT_LOCATION_THRESHOLD,
        }
    }
}

/// Diversity measured over the deduplicated fan-out result of one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiversityReport {
    pub unique_ips: usize,
    pub distinct_subnets: usize,
    pub distinct_locations: usize,
}

impl DiversityReport {
    pub fn verdict(&self, thresholds: &DiversityThresholds) -> Verdict {
        if self.distinct_subnets > thresholds.subnets
            && self.distinct_locations > thresholds.locations
        {
            Verdict::UsesCdn
        } else {
            Verdict::NoCdn
        }
    }
}
