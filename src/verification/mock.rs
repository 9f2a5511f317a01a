/*!
 * Mock verifier for testing.
 *
 * - `MockVerifier::passing()`: every unit passes
 * - `MockVerifier::failing()`: every unit fails with feedback
 * - `MockVerifier::erroring()`: every call returns an error
 * - `MockVerifier::fail_every(n)`: every n-th call fails
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::VerificationError;

use super::{VerificationOutcome, VerificationRequest, Verifier};

/// Behavior mode for the mock verifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    Passing,
    Failing,
    Erroring,
    /// Fails on every n-th call (1-based), passes otherwise
    FailEvery { n: usize },
}

/// Scripted verifier
#[derive(Debug, Clone)]
pub struct MockVerifier {
    behavior: MockBehavior,
    /// Shared between clones so concurrent callers see one sequence
    call_count: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl MockVerifier {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            delay: None,
        }
    }

    pub fn passing() -> Self {
        Self::new(MockBehavior::Passing)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn erroring() -> Self {
        Self::new(MockBehavior::Erroring)
    }

    pub fn fail_every(n: usize) -> Self {
        Self::new(MockBehavior::FailEvery { n: n.max(1) })
    }

    /// Sleep before answering, to exercise out-of-order completion
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of calls received so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Verifier for MockVerifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn verify(&self, request: VerificationRequest) -> Result<VerificationOutcome, VerificationError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(delay) = self.delay {
            // later units answer sooner
            let factor = 1 + (8usize.saturating_sub(request.index % 8));
            tokio::time::sleep(delay * factor as u32).await;
        }

        match self.behavior {
            MockBehavior::Passing => Ok(VerificationOutcome::passed(&request)),
            MockBehavior::Failing => Ok(VerificationOutcome::failed(
                &request,
                format!("Mock rejection of unit {}", request.unit_id),
            )),
            MockBehavior::Erroring => Err(VerificationError::Unavailable(
                "mock verifier is offline".to_string(),
            )),
            MockBehavior::FailEvery { n } => {
                if call % n == 0 {
                    Ok(VerificationOutcome::failed(&request, format!("Mock failure on call {}", call)))
                } else {
                    Ok(VerificationOutcome::passed(&request))
                }
            }
        }
    }
}
