use crate::services::DomainClassifier;
use cdnscope_domain::config::classifier::MAX_WORKERS;
use cdnscope_domain::{BatchReport, DomainError, DomainOutcome, DomainRecord};
use futures::FutureExt;
use rustc_hash::FxHashSet;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Classifies a list of domains with at most `workers` in flight.
///
/// Each domain runs in its own task. Outcomes are sent over a channel to a
/// single collector, so the two verdict sets are only ever appended to from
/// one place.
pub struct ClassifyBatchUseCase {
    classifier: Arc<DomainClassifier>,
    workers: usize,
    domain_timeout: Option<Duration>,
}

impl ClassifyBatchUseCase {
    pub fn new(classifier: Arc<DomainClassifier>, workers: usize) -> Self {
        Self {
            classifier,
            workers: workers.clamp(1, MAX_WORKERS),
            domain_timeout: None,
        }
    }

    pub fn with_domain_timeout(mut self, limit: Option<Duration>) -> Self {
        self.domain_timeout = limit;
        self
    }

    /// Runs the batch to completion.
    ///
    /// Cancelling `cancel` stops new domains from starting; they are
    /// reported as abandoned. Classifications already running finish
    /// normally or hit their timeouts.
    pub async fn execute<I, S>(&self, domains: I, cancel: CancellationToken) -> BatchReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = dedup(domains);
        info!(domains = domains.len(), workers = self.workers, "Starting batch");

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let (tx, mut rx) = mpsc::channel::<DomainRecord>(self.workers.saturating_mul(2));

        let produce = async move {
            let mut tasks = JoinSet::new();
            let mut abandoned = Vec::new();
            let mut pending = domains.into_iter();

            while let Some(domain) = pending.next() {
                let permit = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    permit = Arc::clone(&semaphore).acquire_owned() => permit.ok(),
                };
                let Some(permit) = permit else {
                    abandoned.push(domain);
                    abandoned.extend(pending.by_ref());
                    break;
                };

                let classifier = Arc::clone(&self.classifier);
                let tx = tx.clone();
                let deadline = self.domain_timeout;
                tasks.spawn(async move {
                    let outcome = classify_one(&classifier, &domain, deadline).await;
                    if tx.send(DomainRecord { domain, outcome }).await.is_err() {
                        error!("Result collector closed before batch finished");
                    }
                    drop(permit);
                });
            }
            drop(tx);

            while let Some(joined) = tasks.join_next().await {
                if let Err(e) = joined {
                    error!(error = %e, "Classification task did not complete");
                }
            }
            abandoned
        };

        let collect = async move {
            let mut report = BatchReport::new();
            while let Some(record) = rx.recv().await {
                log_record(&record);
                report.record(record);
            }
            report
        };

        let (abandoned, mut report) = tokio::join!(produce, collect);

        if !abandoned.is_empty() {
            warn!(abandoned = abandoned.len(), "Batch cancelled before all domains started");
        }
        for domain in abandoned {
            report.abandon(domain);
        }

        info!(
            uses_cdn = report.uses_cdn.len(),
            no_cdn = report.no_cdn.len(),
            rejected = report.rejected.len(),
            failed = report.failed.len(),
            abandoned = report.abandoned.len(),
            "Batch complete"
        );

        report
    }
}

/// Runs one classification, turning timeouts, panics and errors into an
/// explicit outcome.
async fn classify_one(
    classifier: &DomainClassifier,
    domain: &Arc<str>,
    deadline: Option<Duration>,
) -> DomainOutcome {
    let work = AssertUnwindSafe(classifier.classify(domain)).catch_unwind();

    let result = match deadline {
        Some(limit) => match timeout(limit, work).await {
            Ok(r) => r,
            Err(_) => {
                return DomainOutcome::Failed(DomainError::ClassificationTimeout(
                    limit.as_millis() as u64,
                ))
            }
        },
        None => work.await,
    };

    match result {
        Ok(Ok(classification)) => DomainOutcome::Classified(classification),
        Ok(Err(e @ DomainError::InvalidDomainName(_))) => DomainOutcome::Rejected(e),
        Ok(Err(e)) => DomainOutcome::Failed(e),
        Err(panic) => DomainOutcome::Failed(DomainError::ClassificationPanicked(panic_message(
            panic.as_ref(),
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn log_record(record: &DomainRecord) {
    let domain = &record.domain;
    match &record.outcome {
        DomainOutcome::Classified(c) => {
            info!(%domain, verdict = %c.verdict, path = %c.path, "Domain classified");
        }
        DomainOutcome::Rejected(e) => {
            warn!(%domain, error = %e, "Domain rejected");
        }
        DomainOutcome::Failed(e) => {
            warn!(%domain, error = %e, "Classification failed, recording as no CDN");
        }
    }
}

/// Drops repeated domains, keeping the first occurrence.
fn dedup<I, S>(domains: I) -> Vec<Arc<str>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = FxHashSet::default();
    domains
        .into_iter()
        .map(|d| Arc::<str>::from(d.as_ref()))
        .filter(|d| seen.insert(Arc::clone(d)))
        .collect()
}
