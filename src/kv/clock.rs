#[cfg(test)]
use tokio::sync::watch;
use tokio::time::{Duration, Instant};

/// Clock is the time source for retry backoff, so tests can step time by hand.
#[async_trait::async_trait]
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    async fn sleep_until(&mut self, deadline: Instant);

    async fn sleep(&mut self, duration: Duration) {
        let deadline = self.now() + duration;
        self.sleep_until(deadline).await;
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct RealClock;

#[async_trait::async_trait]
impl Clock for RealClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&mut self, deadline: Instant) {
        tokio::time::sleep_until(deadline).await;
    }
}

#[cfg(test)]
pub(crate) fn mocked_clock() -> (MockClock, MockClockController) {
    let (tx, rx) = watch::channel(Instant::now());

    (MockClock { current_time: rx }, MockClockController { current_time: tx })
}

#[cfg(test)]
#[derive(Clone)]
pub(crate) struct MockClock {
    current_time: watch::Receiver<Instant>,
}

#[cfg(test)]
#[async_trait::async_trait]
impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self.current_time.borrow()
    }

    async fn sleep_until(&mut self, deadline: Instant) {
        loop {
            if *self.current_time.borrow() >= deadline {
                return;
            }

            self.current_time.changed().await.expect("Controller dropped");
        }
    }
}

#[cfg(test)]
pub(crate) struct MockClockController {
    current_time: watch::Sender<Instant>,
}

#[cfg(test)]
impl MockClockController {
    /// Step in increments well below the backoff under test; a sleeper only promises to wake once
    /// `now` is at or past its deadline.
    pub(crate) fn advance(&mut self, duration: Duration) {
        let new_now = *self.current_time.borrow() + duration;
        self.current_time.send(new_now).expect("MockClock dropped");
    }
}
