use cdnscope_application::ports::GeoLocator;
use cdnscope_domain::{DomainError, GeoLocation};
use ipnetwork::Ipv4Network;
use std::net::Ipv4Addr;
use std::path::Path;
use tracing::{info, warn};

/// In-memory geo table keyed by IPv4 CIDR blocks.
///
/// Text format, one block per line: `cidr,country,region,city`. Blank lines
/// and `#` comments are ignored. The most specific (longest prefix) block
/// containing an address wins.
#[derive(Debug, Clone, Default)]
pub struct CidrGeoTable {
    /// Sorted by descending prefix length so the first hit is the best.
    entries: Vec<(Ipv4Network, GeoLocation)>,
}

impl CidrGeoTable {
    pub fn new(mut entries: Vec<(Ipv4Network, GeoLocation)>) -> Self {
        entries.sort_by(|a, b| b.0.prefix().cmp(&a.0.prefix()));
        Self { entries }
    }

    /// A table that locates nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DomainError::IoError(format!("Failed to read geo table {}: {}", path.display(), e))
        })?;
        let table = Self::parse(&contents);
        info!(path = %path.display(), blocks = table.len(), "Geo table loaded");
        Ok(table)
    }

    /// Malformed lines are skipped with a warning.
    pub fn parse(contents: &str) -> Self {
        let mut entries = Vec::new();

        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.splitn(4, ',').map(str::trim).collect();
            let [cidr, country, region, city] = fields.as_slice() else {
                warn!(line = line_no + 1, "Geo table line needs 4 fields, skipping");
                continue;
            };

            match cidr.parse::<Ipv4Network>() {
                Ok(network) => {
                    entries.push((network, GeoLocation::new(*country, *region, *city)));
                }
                Err(e) => {
                    warn!(line = line_no + 1, cidr = %cidr, error = %e, "Invalid CIDR in geo table, skipping");
                }
            }
        }

        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GeoLocator for CidrGeoTable {
    fn locate(&self, ip: Ipv4Addr) -> GeoLocation {
        self.entries
            .iter()
            .find(|(network, _)| network.contains(ip))
            .map(|(_, location)| location.clone())
            .unwrap_or_default()
    }
}
