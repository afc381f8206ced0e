use serde::{Deserialize, Serialize};

/// Static data files loaded once at startup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Trusted resolvers, one IP or IP:port per line
    #[serde(default = "default_resolvers_file")]
    pub resolvers_file: String,

    /// Known CDN CNAME suffixes, one per line
    #[serde(default = "default_cdn_cnames_file")]
    pub cdn_cnames_file: String,

    /// Optional CIDR geo table (`cidr,country,region,city`)
    #[serde(default)]
    pub geo_table_file: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            resolvers_file: default_resolvers_file(),
            cdn_cnames_file: default_cdn_cnames_file(),
            geo_table_file: None,
        }
    }
}

fn default_resolvers_file() -> String {
    "data/resolvers.txt".to_string()
}

fn default_cdn_cnames_file() -> String {
    "data/cdn_cname.txt".to_string()
}
