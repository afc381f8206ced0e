use crate::{DiversityReport, DomainError, Verdict};
use std::fmt;
use std::sync::Arc;

/// How the classifier reached its verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionPath {
    /// A CNAME hop ended in a known CDN suffix; fan-out was skipped.
    KnownCdnSuffix { suffix: Arc<str> },
    /// The domain has no CNAME; fan-out was skipped.
    NoCname,
    /// Unrecognised CNAME, decided by IP diversity across resolvers.
    Diversity {
        target: Arc<str>,
        report: DiversityReport,
    },
}

impl fmt::Display for DecisionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KnownCdnSuffix { suffix } => write!(f, "known CDN suffix {}", suffix),
            Self::NoCname => f.write_str("no CNAME record"),
            Self::Diversity { target, report } => write!(
                f,
                "CNAME {} -> {} ips, {} subnets, {} locations",
                target, report.unique_ips, report.distinct_subnets, report.distinct_locations
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub path: DecisionPath,
}

impl Classification {
    pub fn new(verdict: Verdict, path: DecisionPath) -> Self {
        Self { verdict, path }
    }
}

/// Result of one domain's classification as seen by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainOutcome {
    Classified(Classification),
    /// Malformed input. Excluded from both result sets.
    Rejected(DomainError),
    /// Unexpected failure. Conservatively counted as `NoCdn`.
    Failed(DomainError),
}

impl DomainOutcome {
    /// Verdict this outcome contributes to the result sets, if any.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Self::Classified(c) => Some(c.verdict),
            Self::Rejected(_) => None,
            Self::Failed(_) => Some(Verdict::NoCdn),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DomainRecord {
    pub domain: Arc<str>,
    pub outcome: DomainOutcome,
}
