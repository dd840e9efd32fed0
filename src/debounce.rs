//! Cancellable delayed delivery.
//!
//! A [`Debouncer`] collapses a burst of [`schedule`](Debouncer::schedule)
//! calls into one message, sent once the burst has been quiet for the
//! configured delay. At most one delivery is pending at any time.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Messages are delivered on `tx`. Must be used inside a tokio runtime.
    pub fn new(delay: Duration, tx: mpsc::UnboundedSender<T>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    /// Sends `msg` after the delay unless another call comes first.
    pub fn schedule(&mut self, msg: T) {
        self.cancel();

        let deadline = Instant::now() + self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            // The receiver may be gone during shutdown.
            let _ = tx.send(msg);
        }));
    }

    /// Drops the pending message, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
