use tokio::sync::watch;

/// Dropping the `Stopper` tells every paired `StopCheck` to stop.
pub(crate) struct Stopper {
    signal: watch::Sender<bool>,
}

#[derive(Clone)]
pub(crate) struct StopCheck {
    signal: watch::Receiver<bool>,
}

pub(crate) fn new() -> (Stopper, StopCheck) {
    let (tx, rx) = watch::channel(false);

    (Stopper { signal: tx }, StopCheck { signal: rx })
}

impl Drop for Stopper {
    fn drop(&mut self) {
        let _ = self.signal.send(true);
    }
}

impl StopCheck {
    pub(crate) fn should_stop(&self) -> bool {
        *self.signal.borrow()
    }

    /// Resolves once stop has been requested.
    pub(crate) async fn stopped(&mut self) {
        loop {
            if *self.signal.borrow() {
                return;
            }
            if self.signal.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Duration;

    #[tokio::test]
    async fn drop_stops_waiters() {
        let (stopper, mut check) = new();
        let mut other = check.clone();
        assert!(!check.should_stop());

        let waiter = tokio::spawn(async move {
            other.stopped().await;
        });
        tokio::time::timeout(Duration::from_millis(20), check.stopped())
            .await
            .expect_err("Expected timeout");

        drop(stopper);
        assert!(check.should_stop());
        check.stopped().await;
        waiter.await.unwrap();
    }
}
