use crate::apply::notifier::{notifier, ApplyWaitError, Notifier, NotifierWaiter};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// ApplyWait lets readers wait until the local apply loop has applied a given log index.
///
/// The apply loop calls `trigger()` after each applied batch. One `Notifier` is kept per distinct
/// index that somebody is waiting on; it is fulfilled and discarded once that index is applied.
pub struct ApplyWait {
    state: Mutex<ApplyWaitState>,
}

struct ApplyWaitState {
    last_applied: u64,
    pending: BTreeMap<u64, Notifier>,
    stopped: bool,
}

impl ApplyWait {
    pub fn new(last_applied: u64) -> Self {
        ApplyWait {
            state: Mutex::new(ApplyWaitState {
                last_applied,
                pending: BTreeMap::new(),
                stopped: false,
            }),
        }
    }

    pub fn last_applied(&self) -> u64 {
        self.lock().last_applied
    }

    /// Returns a waiter that resolves once `index` has been applied.
    pub fn wait(&self, index: u64) -> NotifierWaiter {
        let mut state = self.lock();
        if state.stopped {
            return NotifierWaiter::ready(Err(ApplyWaitError::Stopped));
        }
        if index <= state.last_applied {
            return NotifierWaiter::ready(Ok(()));
        }

        state.pending.entry(index).or_insert_with(|| notifier().0).subscribe()
    }

    /// Records that everything up to and including `applied` is applied and releases the waiters
    /// at or below it. The applied index never moves backwards.
    pub fn trigger(&self, applied: u64) {
        let mut state = self.lock();
        if applied <= state.last_applied {
            return;
        }
        state.last_applied = applied;

        let still_pending = match applied.checked_add(1) {
            Some(next) => state.pending.split_off(&next),
            None => BTreeMap::new(),
        };
        let released = std::mem::replace(&mut state.pending, still_pending);
        drop(state);

        for (_, notifier) in released {
            notifier.notify(Ok(()));
        }
    }

    /// Fails every outstanding and future wait with `ApplyWaitError::Stopped`.
    pub fn stop(&self) {
        let mut state = self.lock();
        state.stopped = true;
        let released = std::mem::take(&mut state.pending);
        drop(state);

        for (_, notifier) in released {
            notifier.notify(Err(ApplyWaitError::Stopped));
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ApplyWaitState> {
        self.state.lock().expect("ApplyWait mutex guard poison")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Duration;

    async fn assert_pending(waiter: &NotifierWaiter) {
        tokio::time::timeout(Duration::from_millis(20), waiter.clone().wait())
            .await
            .expect_err("Expected timeout");
    }

    #[tokio::test]
    async fn already_applied_index_resolves_immediately() {
        let aw = ApplyWait::new(5);
        assert_eq!(aw.wait(3).wait().await, Ok(()));
        assert_eq!(aw.wait(5).wait().await, Ok(()));
    }

    #[tokio::test]
    async fn trigger_releases_only_waiters_at_or_below_applied() {
        let aw = ApplyWait::new(0);
        let w2 = aw.wait(2);
        let w2_again = aw.wait(2);
        let w4 = aw.wait(4);
        let w7 = aw.wait(7);

        aw.trigger(4);

        assert_eq!(w2.wait().await, Ok(()));
        assert_eq!(w2_again.wait().await, Ok(()));
        assert_eq!(w4.wait().await, Ok(()));
        assert_pending(&w7).await;
        assert_eq!(aw.last_applied(), 4);

        aw.trigger(9);
        assert_eq!(w7.wait().await, Ok(()));
    }

    #[tokio::test]
    async fn trigger_at_max_index_releases_everything() {
        let aw = ApplyWait::new(0);
        let w = aw.wait(u64::MAX);

        aw.trigger(u64::MAX);

        assert_eq!(w.wait().await, Ok(()));
        assert_eq!(aw.last_applied(), u64::MAX);
    }

    #[tokio::test]
    async fn trigger_never_moves_backwards() {
        let aw = ApplyWait::new(10);
        aw.trigger(3);
        assert_eq!(aw.last_applied(), 10);
    }

    #[tokio::test]
    async fn stop_fails_outstanding_and_future_waits() {
        let aw = ApplyWait::new(0);
        let w = aw.wait(1);

        aw.stop();

        assert_eq!(w.wait().await, Err(ApplyWaitError::Stopped));
        assert_eq!(aw.wait(1).wait().await, Err(ApplyWaitError::Stopped));
    }
}
