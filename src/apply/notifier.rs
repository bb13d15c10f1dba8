use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApplyWaitError {
    #[error("server stopped")]
    Stopped,
    #[error("apply notifier dropped before being fulfilled")]
    Abandoned,
}

type Outcome = Result<(), ApplyWaitError>;

/// Creates a single-fire signal. The `Notifier` half is consumed when fulfilled, so it can fire at
/// most once; every `NotifierWaiter` subscribed before that observes the same outcome.
pub fn notifier() -> (Notifier, NotifierWaiter) {
    let (tx, rx) = watch::channel(None);

    (Notifier { tx }, NotifierWaiter { rx })
}

pub struct Notifier {
    tx: watch::Sender<Option<Outcome>>,
}

impl Notifier {
    pub fn subscribe(&self) -> NotifierWaiter {
        NotifierWaiter {
            rx: self.tx.subscribe(),
        }
    }

    pub fn notify(self, outcome: Outcome) {
        // No receivers is fine; nobody was waiting.
        let _ = self.tx.send(Some(outcome));
    }
}

#[derive(Clone)]
pub struct NotifierWaiter {
    rx: watch::Receiver<Option<Outcome>>,
}

impl NotifierWaiter {
    /// A waiter that has already been fulfilled with `outcome`.
    pub fn ready(outcome: Outcome) -> Self {
        let (notifier, waiter) = notifier();
        notifier.notify(outcome);
        waiter
    }

    pub async fn wait(mut self) -> Outcome {
        loop {
            let current = self.rx.borrow().clone();
            if let Some(outcome) = current {
                return outcome;
            }

            if self.rx.changed().await.is_err() {
                // Sender is gone. It may have sent right before dropping.
                let last = self.rx.borrow().clone();
                return last.unwrap_or(Err(ApplyWaitError::Abandoned));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Duration;

    #[tokio::test]
    async fn all_subscribed_waiters_observe_outcome() {
        let (n, w1) = notifier();
        let w2 = n.subscribe();
        let w3 = w1.clone();

        let pending = tokio::spawn(w1.wait());
        tokio::task::yield_now().await;

        n.notify(Err(ApplyWaitError::Stopped));

        assert_eq!(pending.await.unwrap(), Err(ApplyWaitError::Stopped));
        assert_eq!(w2.wait().await, Err(ApplyWaitError::Stopped));
        assert_eq!(w3.wait().await, Err(ApplyWaitError::Stopped));
    }

    #[tokio::test]
    async fn unfulfilled_waiter_stays_pending() {
        let (_n, w) = notifier();
        tokio::time::timeout(Duration::from_millis(20), w.wait())
            .await
            .expect_err("Expected timeout");
    }

    #[tokio::test]
    async fn dropped_notifier_reports_abandoned() {
        let (n, w) = notifier();
        drop(n);
        assert_eq!(w.wait().await, Err(ApplyWaitError::Abandoned));
    }

    #[tokio::test]
    async fn ready_waiter_resolves_immediately() {
        assert_eq!(NotifierWaiter::ready(Ok(())).wait().await, Ok(()));
    }
}
