use cdnscope_domain::{DomainError, ResolverEndpoint};
use rustc_hash::FxHashSet;
use tracing::info;

/// Fixed set of trusted resolvers that fan-out queries are drawn from.
///
/// Construction fails when the pool holds fewer distinct endpoints than the
/// sample size, so sampling itself can never come up short.
#[derive(Debug, Clone)]
pub struct ResolverPool {
    endpoints: Vec<ResolverEndpoint>,
    sample_size: usize,
}

impl ResolverPool {
    pub fn new(endpoints: Vec<ResolverEndpoint>, sample_size: usize) -> Result<Self, DomainError> {
        let mut seen = FxHashSet::default();
        let endpoints: Vec<ResolverEndpoint> = endpoints
            .into_iter()
            .filter(|ep| seen.insert(*ep))
            .collect();

        if sample_size == 0 || endpoints.len() < sample_size {
            return Err(DomainError::InsufficientResolvers {
                requested: sample_size,
                available: endpoints.len(),
            });
        }

        info!(
            endpoints = endpoints.len(),
            sample_size, "Resolver pool ready"
        );

        Ok(Self {
            endpoints,
            sample_size,
        })
    }

    /// Draws `sample_size` distinct endpoints.
    pub fn sample(&self) -> Vec<ResolverEndpoint> {
        self.sample_with(&mut fastrand::Rng::new())
    }

    /// Partial Fisher-Yates shuffle; deterministic for a seeded `rng`.
    pub fn sample_with(&self, rng: &mut fastrand::Rng) -> Vec<ResolverEndpoint> {
        let mut picked = self.endpoints.clone();
        let n = picked.len();
        for i in 0..self.sample_size {
            let j = rng.usize(i..n);
            picked.swap(i, j);
        }
        picked.truncate(self.sample_size);
        picked
    }
}
