//! Cancellable delayed tasks.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A unit of work that runs once after a fixed delay unless it is cancelled
/// first.
///
/// The work future is not polled until the delay elapses. Cancelling before
/// that point drops it without running it. Work that needs to observe a
/// cancellation racing with its own execution should check the token itself
/// (see [`ScheduledTask::token`]).
#[derive(Debug)]
pub struct ScheduledTask<T> {
    handle: JoinHandle<Option<T>>,
    token: CancellationToken,
}

impl<T: Send + 'static> ScheduledTask<T> {
    /// Schedules `work` to run after `delay` on the current tokio runtime.
    pub fn spawn<F>(delay: Duration, token: CancellationToken, work: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let guard = token.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                () = guard.cancelled() => {
                    tracing::debug!(?delay, "scheduled task cancelled before firing");
                    None
                }
                () = tokio::time::sleep(delay) => Some(work.await),
            }
        });

        Self { handle, token }
    }

    /// Returns the token controlling this task.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancels the task. Has no effect if the work already ran.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true once the task has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns true once the task has stopped, whether it ran or not.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the task to settle.
    ///
    /// Returns the work's output, or `None` when the task was cancelled
    /// before firing.
    pub async fn join(self) -> Option<T> {
        match self.handle.await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(error = %e, "scheduled task did not complete");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn runs_after_delay() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();

        let task = ScheduledTask::spawn(
            Duration::from_secs(2),
            CancellationToken::new(),
            async move {
                flag.store(true, Ordering::SeqCst);
                42
            },
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!ran.load(Ordering::SeqCst));

        assert_eq!(task.join().await, Some(42));
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_task_never_runs() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();

        let task = ScheduledTask::spawn(
            Duration::from_secs(2),
            CancellationToken::new(),
            async move {
                flag.store(true, Ordering::SeqCst);
            },
        );

        task.cancel();
        assert!(task.is_cancelled());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(task.join().await, None);
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelling_after_completion_is_harmless() {
        let task = ScheduledTask::spawn(
            Duration::from_millis(10),
            CancellationToken::new(),
            async { "done" },
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(task.is_finished());

        task.cancel();
        assert_eq!(task.join().await, Some("done"));
    }
}
