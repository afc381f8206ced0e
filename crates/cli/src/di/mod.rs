use crate::bootstrap::DataSet;
use anyhow::Context;
use cdnscope_application::ports::{DnsLookup, GeoLocator};
use cdnscope_application::services::{
    CnameInspector, DiversityAnalyzer, DomainClassifier, FanoutResolver, ResolverPool,
};
use cdnscope_application::use_cases::ClassifyBatchUseCase;
use cdnscope_domain::{Config, ResolverEndpoint};
use cdnscope_infrastructure::dns::HickoryDnsLookup;
use std::sync::Arc;

/// Wires the adapters into the classification engine.
pub fn build_use_case(config: &Config, data: DataSet) -> anyhow::Result<ClassifyBatchUseCase> {
    let c = &config.classifier;

    let pool = ResolverPool::new(data.resolvers, c.sample_size)
        .context("resolver pool cannot serve the configured sample size")?;

    let cname_resolver: ResolverEndpoint = c.cname_resolver.parse()?;

    let lookup: Arc<dyn DnsLookup> = Arc::new(HickoryDnsLookup::new());
    let geo: Arc<dyn GeoLocator> = Arc::new(data.geo);

    let inspector = CnameInspector::new(
        lookup.clone(),
        Arc::new(data.suffixes),
        cname_resolver,
        c.query_timeout(),
    );
    let fanout = FanoutResolver::new(lookup, c.query_timeout());
    let analyzer = DiversityAnalyzer::new(geo, c.thresholds());

    let classifier = DomainClassifier::new(inspector, fanout, analyzer, Arc::new(pool));

    Ok(ClassifyBatchUseCase::new(Arc::new(classifier), c.workers)
        .with_domain_timeout(c.domain_timeout()))
}
