use tokio::time::{Duration, Instant};

/// Clock lets monitor loops run on tokio time in production and on a hand-driven clock in tests.
#[async_trait::async_trait]
pub(crate) trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    async fn sleep_until(&mut self, deadline: Instant);

    async fn sleep(&mut self, duration: Duration) {
        let deadline = self.now() + duration;
        self.sleep_until(deadline).await;
    }
}

#[derive(Copy, Clone)]
pub(crate) struct RealClock;

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
pub(crate) use mock::{mocked_clock, MockClockController};

#[cfg(test)]
mod mock {
    use super::Clock;
    use tokio::sync::watch;
    use tokio::time::{Duration, Instant};

    pub(crate) fn mocked_clock() -> (MockClock, MockClockController) {
        let now = Instant::now();
        let (tx, rx) = watch::channel(now);

        (MockClock { current_time: rx }, MockClockController { current_time: tx })
    }

    /// MockClock only moves when its controller advances it.
    #[derive(Clone)]
    pub(crate) struct MockClock {
        current_time: watch::Receiver<Instant>,
    }

    #[async_trait::async_trait]
    impl Clock for MockClock {
        fn now(&self) -> Instant {
            *self.current_time.borrow()
        }

        async fn sleep_until(&mut self, deadline: Instant) {
            while *self.current_time.borrow() < deadline {
                if self.current_time.changed().await.is_err() {
                    // Controller is gone, time will never advance again.
                    std::future::pending::<()>().await;
                }
            }
        }
    }

    pub(crate) struct MockClockController {
        current_time: watch::Sender<Instant>,
    }

    impl MockClockController {
        /// Advance in steps no larger than the sleeps you want to observe, sleepers only wake
        /// once per advance.
        pub(crate) fn advance(&self, duration: Duration) {
            let new_now = *self.current_time.borrow() + duration;
            let _ = self.current_time.send(new_now);
        }
    }
}
