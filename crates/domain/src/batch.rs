use crate::{DomainOutcome, DomainRecord, Verdict};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Everything a batch produced. The two verdict collections are
/// order-irrelevant and disjoint.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub uses_cdn: Vec<Arc<str>>,
    pub no_cdn: Vec<Arc<str>>,
    /// Malformed domains, excluded from both verdict collections.
    pub rejected: Vec<(Arc<str>, String)>,
    /// Domains that failed unexpectedly; each one is also in `no_cdn`.
    pub failed: Vec<(Arc<str>, String)>,
    /// Domains never started because the batch was cancelled.
    pub abandoned: Vec<Arc<str>>,
    seen: FxHashSet<Arc<str>>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. Returns `false` if the domain was already recorded.
    pub fn record(&mut self, record: DomainRecord) -> bool {
        if !self.seen.insert(Arc::clone(&record.domain)) {
            return false;
        }

        match &record.outcome {
            DomainOutcome::Rejected(e) => {
                self.rejected.push((record.domain, e.to_string()));
            }
            DomainOutcome::Failed(e) => {
                self.failed.push((Arc::clone(&record.domain), e.to_string()));
                self.no_cdn.push(record.domain);
            }
            DomainOutcome::Classified(c) => match c.verdict {
                Verdict::UsesCdn => self.uses_cdn.push(record.domain),
                Verdict::NoCdn => self.no_cdn.push(record.domain),
            },
        }
        true
    }

    pub fn abandon(&mut self, domain: Arc<str>) {
        if self.seen.insert(Arc::clone(&domain)) {
            self.abandoned.push(domain);
        }
    }

    /// Number of domains that received a verdict.
    pub fn decided(&self) -> usize {
        self.uses_cdn.len() + self.no_cdn.len()
    }

    pub fn total(&self) -> usize {
        self.seen.len()
    }
}
