//! Batched submissions.

use std::future::Future;

use futures::stream::{self, StreamExt};

use super::{SubmissionOutcome, SubmissionTarget};
use crate::error_handling::ApiError;

/// Runs `submit_one` for every target and collects one outcome per target.
///
/// Never stops early: an `Err` from `submit_one` becomes a failed outcome.
/// Up to `concurrency` submissions run at once (at least one); outcomes are
/// returned in input order whatever order they complete in.
pub async fn submit_all<I, F, Fut>(
    targets: I,
    concurrency: usize,
    submit_one: F,
) -> Vec<SubmissionOutcome>
where
    I: IntoIterator<Item = SubmissionTarget>,
    F: Fn(SubmissionTarget) -> Fut,
    Fut: Future<Output = Result<SubmissionOutcome, ApiError>>,
{
    let submit_one = &submit_one;
    let outcomes: Vec<SubmissionOutcome> = stream::iter(targets)
        .map(|target| async move {
            let pending = submit_one(target.clone());
            match pending.await {
                Ok(outcome) => outcome,
                Err(error) => {
                    log::warn!("Submission of {} failed: {}", target.url, error);
                    SubmissionOutcome::from_error(target, &error)
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let failed = outcomes.iter().filter(|o| !o.success).count();
    if failed > 0 {
        log::info!("{} of {} submissions failed", failed, outcomes.len());
    }
    outcomes
}
