use std::sync::Arc;

/// Answer to a single CNAME lookup.
///
/// `NoData` is an explicit sentinel: the resolver answered without a CNAME.
/// Timeouts and resolver errors are reported as `DomainError` by the lookup
/// and folded into `NoData` by the caller that decides how to treat them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CnameRecord {
    Canonical(Arc<str>),
    NoData,
}

impl CnameRecord {
    pub fn canonical(name: impl Into<Arc<str>>) -> Self {
        Self::Canonical(name.into())
    }

    pub fn target(&self) -> Option<&Arc<str>> {
        match self {
            Self::Canonical(name) => Some(name),
            Self::NoData => None,
        }
    }
}

/// Outcome of inspecting the (at most two hop) CNAME chain of a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CnameVerdict {
    /// A hop ended in a known CDN suffix.
    ConfirmedCdn { suffix: Arc<str> },
    /// The first hop returned no CNAME.
    NoCname,
    /// A CNAME exists but no hop matched a known suffix.
    UnknownCname { target: Arc<str> },
}

/// Last two labels of a DNS name, e.g. `edge.knowncdn.net` -> `knowncdn.net`.
///
/// A trailing root dot is ignored. Names with fewer than two labels are
/// returned whole.
pub fn registrable_suffix(name: &str) -> &str {
    let name = name.strip_suffix('.').unwrap_or(name);
    match name.rmatch_indices('.').nth(1) {
        Some((idx, _)) => &name[idx + 1..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrable_suffix_takes_last_two_labels() {
        assert_eq!(registrable_suffix("edge.knowncdn.net"), "knowncdn.net");
        assert_eq!(registrable_suffix("a.b.c.cloudflare.net"), "cloudflare.net");
    }

    #[test]
    fn test_registrable_suffix_ignores_root_dot() {
        assert_eq!(registrable_suffix("edge.knowncdn.net."), "knowncdn.net");
    }

    #[test]
    fn test_registrable_suffix_short_names() {
        assert_eq!(registrable_suffix("knowncdn.net"), "knowncdn.net");
        assert_eq!(registrable_suffix("localhost"), "localhost");
        assert_eq!(registrable_suffix(""), "");
    }

    #[test]
    fn test_cname_record_target() {
        let record = CnameRecord::canonical("edge.knowncdn.net");
        assert_eq!(record.target().map(|s| s.as_ref()), Some("edge.knowncdn.net"));
        assert!(CnameRecord::NoData.target().is_none());
    }
}
