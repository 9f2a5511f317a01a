/*!
 * Concurrent verification of a finished run.
 *
 * Requests are issued with bounded concurrency and may complete in any
 * order; outcomes are returned in document order. A verifier error never
 * aborts the run: it becomes a failed outcome for that unit.
 */

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{VerificationOutcome, VerificationRequest, Verifier};

/// Characters of neighbouring text given to the verifier on each side
const CONTEXT_CHARS: usize = 100;

/// One rewritten unit awaiting verification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformedUnit {
    pub unit_id: String,
    pub original: String,
    pub transformed: String,
}

/// Build requests in document order, with neighbour context
pub fn build_requests(units: &[TransformedUnit]) -> Vec<VerificationRequest> {
    units
        .iter()
        .enumerate()
        .map(|(index, unit)| {
            let before = index
                .checked_sub(1)
                .and_then(|prev| units.get(prev))
                .map(|u| snippet(&u.transformed))
                .unwrap_or_default();
            let after = units
                .get(index + 1)
                .map(|u| snippet(&u.transformed))
                .unwrap_or_default();

            VerificationRequest {
                unit_id: unit.unit_id.clone(),
                index,
                original_text: unit.original.clone(),
                transformed_text: unit.transformed.clone(),
                context: format!("Previous: {}... Next: {}...", before, after),
            }
        })
        .collect()
}

fn snippet(text: &str) -> String {
    text.chars().take(CONTEXT_CHARS).collect()
}

/// Verify every unit, at most `concurrent_requests` at a time
pub async fn verify_batch<V>(
    verifier: &V,
    units: &[TransformedUnit],
    concurrent_requests: usize,
    progress_callback: impl Fn(usize, usize) + Clone,
) -> Vec<VerificationOutcome>
where
    V: Verifier + ?Sized,
{
    let requests = build_requests(units);
    let total = requests.len();
    let completed = Arc::new(AtomicUsize::new(0));

    let mut outcomes: Vec<VerificationOutcome> = stream::iter(requests)
        .map(|request| {
            let completed = completed.clone();
            let progress_callback = progress_callback.clone();

            async move {
                let fallback = request.clone();
                let outcome = match verifier.verify(request).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!("{} verifier failed on unit {}: {}", verifier.name(), fallback.unit_id, e);
                        VerificationOutcome::failed(&fallback, format!("Verification error: {}", e))
                    }
                };

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress_callback(done, total);
                outcome
            }
        })
        .buffer_unordered(concurrent_requests.max(1))
        .collect()
        .await;

    outcomes.sort_by_key(|outcome| outcome.index);
    debug!(
        "Verified {} units, {} passed",
        outcomes.len(),
        outcomes.iter().filter(|o| o.passed).count()
    );
    outcomes
}
