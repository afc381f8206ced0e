use cdnscope_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(config_path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logged once the subscriber exists, since the level comes from the config.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    let c = &config.classifier;
    info!(
        config_file = config_path.unwrap_or("default"),
        sample_size = c.sample_size,
        workers = c.workers,
        subnet_threshold = c.subnet_threshold,
        location_threshold = c.location_threshold,
        query_timeout_ms = c.query_timeout_ms,
        domain_timeout_ms = c.domain_timeout_ms,
        cname_resolver = %c.cname_resolver,
        "Configuration loaded"
    );
}
