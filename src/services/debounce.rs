//! Input debouncing and stale-response detection for search-as-you-type.
//!
//! A [`Debouncer`] only runs the most recently scheduled job, once its delay
//! has passed without another `schedule` call. Replacing a job cancels its
//! pending timer but never a fetch that already started, so responses can
//! still arrive out of order; [`SearchGeneration`] tickets let the consumer
//! drop every response that is not for the latest input.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Replaces any pending job with `job`, to run after the delay.
    pub fn schedule<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(job);
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.replace(timer) {
            previous.abort();
        }
    }

    /// Drops the pending job, if its delay has not elapsed yet.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Identifies the input a fetch was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub query: String,
}

/// Monotonic counter; each new input makes every earlier ticket stale.
#[derive(Debug, Clone, Default)]
pub struct SearchGeneration {
    latest: Arc<AtomicU64>,
}

impl SearchGeneration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, query: &str) -> Ticket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation,
            query: query.to_string(),
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::mpsc;
    use tokio::time::{Instant, sleep, timeout};

    // With the clock paused, sleeping in the test auto-advances time and runs
    // every timer that is due on the way.

    #[tokio::test(start_paused = true)]
    async fn test_only_last_job_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let (tx, mut rx) = mpsc::unbounded_channel();

        for query in ["i", "in", "inc", "inception"] {
            let tx = tx.clone();
            debouncer.schedule(async move {
                let _ = tx.send(query);
            });
            sleep(Duration::from_millis(100)).await;
        }

        assert!(rx.try_recv().is_err());

        sleep(Duration::from_millis(500)).await;

        assert_eq!(rx.try_recv().unwrap(), "inception");
        assert!(rx.try_recv().is_err());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_waits_for_full_delay() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let runs = Arc::new(AtomicUsize::new(0));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduled_at = Instant::now();

        let counter = runs.clone();
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            let _ = tx.send(Instant::now());
        });

        sleep(Duration::from_millis(499)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert!(debouncer.is_pending());

        let ran_at = timeout(Duration::from_millis(50), rx.recv())
            .await
            .expect("job should run right after the delay")
            .unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(ran_at - scheduled_at >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_drop_discard_pending_job() {
        let runs = Arc::new(AtomicUsize::new(0));

        let debouncer = Debouncer::new(Duration::from_millis(500));
        let counter = runs.clone();
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        let counter = runs.clone();
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(debouncer);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_started_job_survives_replacement() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let first = tx.clone();
        debouncer.schedule(async move {
            sleep(Duration::from_secs(1)).await;
            let _ = first.send("slow");
        });
        // Past the first delay, so the slow job is already running.
        sleep(Duration::from_millis(150)).await;

        debouncer.schedule(async move {
            let _ = tx.send("fast");
        });

        let received = timeout(Duration::from_millis(200), rx.recv()).await.unwrap();
        assert_eq!(received, Some("fast"));

        let received = timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
        assert_eq!(received, Some("slow"));
    }

    #[test]
    fn test_only_latest_ticket_is_current() {
        let generation = SearchGeneration::new();
        let a = generation.issue("a");
        let ab = generation.issue("ab");

        assert!(!generation.is_current(&a));
        assert!(generation.is_current(&ab));
        assert!(ab.generation > a.generation);

        let shared = generation.clone();
        let abc = shared.issue("abc");
        assert!(!generation.is_current(&ab));
        assert!(generation.is_current(&abc));
    }
}
