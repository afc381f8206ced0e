use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Known CDN CNAME suffixes (registrable domains such as `cloudflare.net`).
///
/// Membership is an exact, case-sensitive string match against the entries
/// as loaded.
#[derive(Debug, Clone, Default)]
pub struct CdnSuffixSet {
    suffixes: FxHashSet<Arc<str>>,
}

impl CdnSuffixSet {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = suffixes
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .map(|s| Arc::from(s.as_str()))
            .collect();
        Self { suffixes }
    }

    pub fn contains(&self, suffix: &str) -> bool {
        self.suffixes.contains(suffix)
    }

    /// Returns the stored entry matching `suffix`, if any.
    pub fn get(&self, suffix: &str) -> Option<&Arc<str>> {
        self.suffixes.get(suffix)
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}
