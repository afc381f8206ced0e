use super::{CnameInspector, DiversityAnalyzer, FanoutResolver, FanoutResult, ResolverPool};
use cdnscope_domain::{
    validate_domain_name, Classification, CnameVerdict, DecisionPath, DomainError, Verdict,
};
use std::sync::Arc;
use tracing::debug;

/// Classifier states. `Decided` is terminal.
enum Stage {
    CnameLookup,
    FanoutResolve { target: Arc<str> },
    DiversityCheck { target: Arc<str>, fanout: FanoutResult },
    Decided(Classification),
}

/// Decides whether a single domain is served through a CDN.
///
/// The CNAME chain is inspected first. A known CDN suffix or a missing
/// CNAME decides immediately without any fan-out. An unrecognised CNAME
/// falls through to multi-resolver A resolution and the diversity rule.
pub struct DomainClassifier {
    inspector: CnameInspector,
    fanout: FanoutResolver,
    analyzer: DiversityAnalyzer,
    pool: Arc<ResolverPool>,
}

impl DomainClassifier {
    pub fn new(
        inspector: CnameInspector,
        fanout: FanoutResolver,
        analyzer: DiversityAnalyzer,
        pool: Arc<ResolverPool>,
    ) -> Self {
        Self {
            inspector,
            fanout,
            analyzer,
            pool,
        }
    }

    /// Classify `domain`. The only error is malformed input; DNS failures
    /// along the way degrade to "no data".
    pub async fn classify(&self, domain: &Arc<str>) -> Result<Classification, DomainError> {
        validate_domain_name(domain)?;

        let mut stage = Stage::CnameLookup;
        loop {
            stage = match stage {
                Stage::CnameLookup => match self.inspector.inspect(domain).await {
                    CnameVerdict::ConfirmedCdn { suffix } => Stage::Decided(Classification::new(
                        Verdict::UsesCdn,
                        DecisionPath::KnownCdnSuffix { suffix },
                    )),
                    CnameVerdict::NoCname => Stage::Decided(Classification::new(
                        Verdict::NoCdn,
                        DecisionPath::NoCname,
                    )),
                    CnameVerdict::UnknownCname { target } => {
                        debug!(%domain, cname = %target, "Unrecognised CNAME, fan-out needed");
                        Stage::FanoutResolve { target }
                    }
                },
                Stage::FanoutResolve { target } => {
                    let resolvers = self.pool.sample();
                    let fanout = self.fanout.resolve(domain, &resolvers).await;
                    Stage::DiversityCheck { target, fanout }
                }
                Stage::DiversityCheck { target, fanout } => {
                    let (verdict, report) = self.analyzer.evaluate(&fanout.addresses());
                    Stage::Decided(Classification::new(
                        verdict,
                        DecisionPath::Diversity { target, report },
                    ))
                }
                Stage::Decided(classification) => return Ok(classification),
            };
        }
    }
}
