//! Simulated processing delays
//!
//! Work that imitates a slow upstream call is spawned behind a timer and
//! tied to a [`PendingTask`] handle. Dropping the handle before the timer
//! fires aborts the work, so a requester that went away never receives a
//! late write.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};

/// Handle to delayed work; aborts the work when dropped
#[must_use = "dropping a PendingTask cancels it"]
pub struct PendingTask<T> {
    handle: JoinHandle<T>,
}

impl<T> PendingTask<T> {
    /// Cancel explicitly; equivalent to dropping the handle
    pub fn cancel(self) {
        drop(self);
    }
}

impl<T> Future for PendingTask<T> {
    type Output = Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx)
    }
}

impl<T> Drop for PendingTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Run `work` after `delay` on the runtime
pub fn simulate<F>(delay: Duration, work: F) -> PendingTask<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let handle = tokio::spawn(async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        work.await
    });
    PendingTask { handle }
}
