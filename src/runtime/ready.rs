use std::sync::Arc;
use tokio::sync::watch;

/// One-shot "page finished loading" signal.
#[derive(Clone, Debug)]
pub struct ReadySignal {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadySignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Resolve the signal. Returns `true` for the call that resolved it.
    pub fn resolve(&self) -> bool {
        self.tx.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        })
    }

    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until resolved; returns immediately if it already was.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_resolves_once() {
        let signal = ReadySignal::new();
        assert!(!signal.is_ready());
        assert!(signal.resolve());
        assert!(!signal.resolve());
        assert!(signal.is_ready());
    }

    #[tokio::test]
    async fn test_waiters_released_on_resolve() {
        let signal = ReadySignal::new();
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait().await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        signal.resolve();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter released")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_after_resolve_returns_immediately() {
        let signal = ReadySignal::new();
        signal.resolve();
        tokio::time::timeout(Duration::from_millis(100), signal.wait())
            .await
            .expect("already ready");
    }
}
