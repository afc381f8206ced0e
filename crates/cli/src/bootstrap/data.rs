use anyhow::Context;
use cdnscope_domain::{CdnSuffixSet, Config, ResolverEndpoint};
use cdnscope_infrastructure::files;
use cdnscope_infrastructure::geo::CidrGeoTable;
use std::path::Path;
use tracing::{info, warn};

/// Reference data loaded once before the batch starts.
pub struct DataSet {
    pub resolvers: Vec<ResolverEndpoint>,
    pub suffixes: CdnSuffixSet,
    pub geo: CidrGeoTable,
}

pub fn load_data(config: &Config) -> anyhow::Result<DataSet> {
    let resolvers = files::load_resolvers(&config.data.resolvers_file)
        .with_context(|| format!("loading resolvers from {}", config.data.resolvers_file))?;

    let suffixes = files::load_cdn_suffixes(&config.data.cdn_cnames_file)
        .with_context(|| format!("loading CDN suffixes from {}", config.data.cdn_cnames_file))?;
    if suffixes.is_empty() {
        warn!(file = %config.data.cdn_cnames_file, "CDN suffix list is empty, CNAME short-circuit disabled");
    }

    let geo = match &config.data.geo_table_file {
        Some(path) => CidrGeoTable::load(path)
            .with_context(|| format!("loading geo table from {}", path))?,
        None => {
            warn!("No geo table configured, every location is unknown and fan-out cannot confirm a CDN");
            CidrGeoTable::empty()
        }
    };

    Ok(DataSet {
        resolvers,
        suffixes,
        geo,
    })
}

/// Collects the batch from `-d` and/or `-f`, in that order.
pub fn load_domains(list: Option<&str>, file: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let mut domains = Vec::new();

    if let Some(list) = list {
        domains.extend(files::split_domain_arg(list));
    }
    if let Some(path) = file {
        let from_file = files::load_lines(path)
            .with_context(|| format!("loading domains from {}", path.display()))?;
        domains.extend(from_file);
    }

    info!(domains = domains.len(), "Input domains loaded");
    Ok(domains)
}
