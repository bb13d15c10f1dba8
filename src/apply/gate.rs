use crate::apply::{ApplyWait, ApplyWaitError};
use std::sync::Arc;

/// ApplyGate is the readiness barrier a request handler passes before trusting local state.
#[async_trait::async_trait]
pub trait ApplyGate: Send + Sync {
    /// Resolves once the local node has applied everything the caller may have observed.
    async fn wait_for_applied(&self) -> Result<(), ApplyWaitError>;
}

#[async_trait::async_trait]
impl<G: ApplyGate + ?Sized> ApplyGate for Arc<G> {
    async fn wait_for_applied(&self) -> Result<(), ApplyWaitError> {
        (**self).wait_for_applied().await
    }
}

/// CommittedIndexGate waits until the apply loop catches up to the commit index as it stood when
/// the wait began.
pub struct CommittedIndexGate<F> {
    apply_wait: Arc<ApplyWait>,
    committed_index: F,
}

impl<F> CommittedIndexGate<F>
where
    F: Fn() -> u64 + Send + Sync,
{
    pub fn new(apply_wait: Arc<ApplyWait>, committed_index: F) -> Self {
        CommittedIndexGate {
            apply_wait,
            committed_index,
        }
    }
}

#[async_trait::async_trait]
impl<F> ApplyGate for CommittedIndexGate<F>
where
    F: Fn() -> u64 + Send + Sync,
{
    async fn wait_for_applied(&self) -> Result<(), ApplyWaitError> {
        let index = (self.committed_index)();
        self.apply_wait.wait(index).wait().await
    }
}
