//! Timed replay.
//!
//! The driver owns the timing of a run: it ticks the session, releases the
//! lock and sleeps for the current speed's delay. Time comes from a
//! [`Clock`] so tests can run a whole log without waiting.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::playback::Tick;
use crate::session::Session;
use crate::traversal::{TraversalTick, TRAVERSAL_DELAY};

/// Source of delays between steps.
pub trait Clock: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Wall-clock delays.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Returns immediately and records the time it was asked to wait.
#[derive(Debug, Default)]
pub struct ManualClock {
    elapsed_ms: AtomicU64,
    sleeps: AtomicUsize,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total virtual time slept.
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms.load(Ordering::Relaxed))
    }

    pub fn sleeps(&self) -> usize {
        self.sleeps.load(Ordering::Relaxed)
    }
}

impl Clock for ManualClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        self.elapsed_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
        self.sleeps.fetch_add(1, Ordering::Relaxed);
        std::future::ready(())
    }
}

/// Cancellation token for one run. A new run gets a new flag, so a
/// cancelled driver can never pick up the next run's steps.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How a driven run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every step was applied
    Completed,
    /// Stopped before the end
    Cancelled,
    /// Nothing was running
    Inactive,
}

/// Play the session's current run to the end, one step per delay.
///
/// The flag is checked under the write guard at every step boundary. The
/// session cancels a run's flag while holding `&mut self`, so a driver that
/// waited on the lock while its run was stopped and replaced sees the
/// cancellation before it can tick. Whoever cancels is responsible for
/// stopping the session; the driver only walks away.
pub async fn drive<C: Clock>(
    session: Arc<RwLock<Session>>,
    clock: &C,
    cancel: CancelFlag,
) -> RunOutcome {
    loop {
        let (tick, delay) = {
            let mut session = session.write().await;
            if cancel.is_cancelled() {
                debug!("Run cancelled");
                return RunOutcome::Cancelled;
            }
            (session.tick(), session.delay())
        };
        match tick {
            // Speed may change between steps, so the delay is read each time.
            Tick::Applied(_) | Tick::Held => clock.sleep(delay).await,
            Tick::Completed => return RunOutcome::Completed,
            Tick::Inactive => return RunOutcome::Inactive,
        }
    }
}

/// Walk the session's tree traversal, one node per [`TRAVERSAL_DELAY`].
pub async fn drive_traversal<C: Clock>(
    session: Arc<RwLock<Session>>,
    clock: &C,
    cancel: CancelFlag,
) -> RunOutcome {
    loop {
        let tick = {
            let mut session = session.write().await;
            if cancel.is_cancelled() {
                debug!("Traversal cancelled");
                return RunOutcome::Cancelled;
            }
            session.tick_traversal()
        };
        match tick {
            TraversalTick::Active(_) => clock.sleep(TRAVERSAL_DELAY).await,
            TraversalTick::Done => return RunOutcome::Completed,
            TraversalTick::Inactive => return RunOutcome::Inactive,
        }
    }
}
