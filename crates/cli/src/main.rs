//! # cdnscope
//!
//! Classifies domains by whether they are served through a CDN.

mod bootstrap;
mod di;

use cdnscope_domain::CliOverrides;
use cdnscope_infrastructure::files;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "cdnscope")]
#[command(version)]
#[command(about = "Classify domains as CDN-fronted or not")]
#[command(group(ArgGroup::new("input").required(true).multiple(true).args(["domains", "domain_file"])))]
struct Cli {
    /// Comma-separated domains, e.g. a.com,b.com
    #[arg(short = 'd', long, value_name = "LIST")]
    domains: Option<String>,

    /// File with one domain per line
    #[arg(short = 'f', long, visible_alias = "df", value_name = "FILE")]
    domain_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Directory for useCdnDomains.txt / noCdnDomains.txt
    #[arg(short = 'o', long)]
    output_dir: Option<String>,

    /// Concurrent domain classifications
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Resolvers sampled per fan-out
    #[arg(long)]
    sample_size: Option<usize>,

    /// Per-query timeout in milliseconds
    #[arg(long)]
    query_timeout_ms: Option<u64>,

    /// Per-domain deadline in milliseconds (0 disables)
    #[arg(long)]
    domain_timeout_ms: Option<u64>,

    /// Resolver used for the CNAME hops
    #[arg(long)]
    cname_resolver: Option<String>,

    /// Resolver list file
    #[arg(long)]
    resolvers_file: Option<String>,

    /// CDN CNAME suffix list file
    #[arg(long)]
    cdn_cnames_file: Option<String>,

    /// CIDR geo table (cidr,country,region,city)
    #[arg(long)]
    geo_table: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            workers: self.workers,
            sample_size: self.sample_size,
            query_timeout_ms: self.query_timeout_ms,
            domain_timeout_ms: self.domain_timeout_ms,
            cname_resolver: self.cname_resolver.clone(),
            resolvers_file: self.resolvers_file.clone(),
            cdn_cnames_file: self.cdn_cnames_file.clone(),
            geo_table_file: self.geo_table.clone(),
            output_dir: self.output_dir.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);
    bootstrap::log_config(cli.config.as_deref(), &config);

    let domains = bootstrap::load_domains(cli.domains.as_deref(), cli.domain_file.as_deref())?;
    let data = bootstrap::load_data(&config)?;

    let use_case = match di::build_use_case(&config, data) {
        Ok(use_case) => use_case,
        Err(e) => {
            error!("Cannot start batch: {:#}", e);
            return Err(e);
        }
    };

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing in-flight domains");
            ctrl_c_token.cancel();
        }
    });

    let report = use_case.execute(domains, cancel).await;

    let (uses_path, no_path) = files::write_report(&config.output.dir, &report)?;

    info!(
        uses_cdn = report.uses_cdn.len(),
        no_cdn = report.no_cdn.len(),
        uses_cdn_file = %uses_path.display(),
        no_cdn_file = %no_path.display(),
        "Results written"
    );

    for (domain, reason) in &report.rejected {
        warn!(%domain, %reason, "Rejected input");
    }
    if !report.abandoned.is_empty() {
        warn!(
            abandoned = report.abandoned.len(),
            "Batch interrupted, abandoned domains were not written"
        );
    }

    Ok(())
}
