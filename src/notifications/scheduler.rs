// SPDX-License-Identifier: MPL-2.0
//! One-shot expiry timers.
//!
//! A [`Scheduler`] arms one timer per timed toast and reports the ids whose
//! timers fired. Delivery always goes back through the host's event loop:
//! the manager drains fired ids in [`ToastManager::tick`](super::ToastManager::tick)
//! and re-checks that each toast is still visible before removing it.

use super::toast::ToastId;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Schedules and cancels per-toast expiry timers.
pub trait Scheduler {
    /// Arms a timer that fires once `after` has elapsed. Re-arming an id
    /// replaces its previous timer.
    fn schedule(&mut self, id: ToastId, after: Duration);

    /// Disarms the timer for `id`. Unknown ids are ignored.
    fn cancel(&mut self, id: ToastId);

    /// Returns the ids whose timers fired at or before `now`, disarming them.
    fn take_due(&mut self, now: Instant) -> Vec<ToastId>;

    /// Number of armed timers.
    fn pending(&self) -> usize;
}

/// Deadline table polled from the host's periodic tick.
///
/// Deterministic: it only compares deadlines against the `now` it is given,
/// so tests can drive it with synthetic instants.
#[derive(Debug, Default)]
pub struct DeadlineScheduler {
    deadlines: HashMap<ToastId, Instant>,
}

impl DeadlineScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a timer relative to an explicit start instant.
    ///
    /// A duration too long to represent as an `Instant` never fires, so no
    /// timer is armed for it and any previous timer for `id` is disarmed.
    pub fn schedule_from(&mut self, id: ToastId, start: Instant, after: Duration) {
        match start.checked_add(after) {
            Some(deadline) => {
                self.deadlines.insert(id, deadline);
            }
            None => {
                tracing::debug!(%id, ?after, "expiry beyond the clock range, timer not armed");
                self.deadlines.remove(&id);
            }
        }
    }

    /// Returns the deadline of an armed timer.
    #[must_use]
    pub fn deadline(&self, id: ToastId) -> Option<Instant> {
        self.deadlines.get(&id).copied()
    }
}

impl Scheduler for DeadlineScheduler {
    fn schedule(&mut self, id: ToastId, after: Duration) {
        self.schedule_from(id, Instant::now(), after);
    }

    fn cancel(&mut self, id: ToastId) {
        self.deadlines.remove(&id);
    }

    fn take_due(&mut self, now: Instant) -> Vec<ToastId> {
        let mut due: Vec<(Instant, ToastId)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*deadline, *id))
            .collect();
        due.sort();

        for (_, id) in &due {
            self.deadlines.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    fn pending(&self) -> usize {
        self.deadlines.len()
    }
}

/// Timer per toast on a tokio runtime.
///
/// Each armed toast gets a task sleeping for its duration; fired ids are
/// sent over a channel and collected by [`Scheduler::take_due`]. Cancelling
/// aborts the task.
#[derive(Debug)]
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
    tasks: HashMap<ToastId, JoinHandle<()>>,
    fired_tx: mpsc::UnboundedSender<ToastId>,
    fired_rx: mpsc::UnboundedReceiver<ToastId>,
}

impl TokioScheduler {
    /// Creates a scheduler spawning its timers on `runtime`.
    #[must_use]
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            tasks: HashMap::new(),
            fired_tx,
            fired_rx,
        }
    }

    /// Creates a scheduler on the runtime of the calling context.
    ///
    /// Returns `None` outside of a tokio runtime.
    #[must_use]
    pub fn current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, id: ToastId, after: Duration) {
        let tx = self.fired_tx.clone();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(after).await;
            // Receiver lives as long as the scheduler; a send error only
            // means the scheduler was dropped first.
            let _ = tx.send(id);
        });
        if let Some(previous) = self.tasks.insert(id, task) {
            previous.abort();
        }
    }

    fn cancel(&mut self, id: ToastId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
        }
    }

    fn take_due(&mut self, _now: Instant) -> Vec<ToastId> {
        let mut due = Vec::new();
        while let Ok(id) = self.fired_rx.try_recv() {
            // A timer may fire just before it is cancelled; only report ids
            // that are still armed.
            if self.tasks.remove(&id).is_some() {
                due.push(id);
            }
        }
        due
    }

    fn pending(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_fires_at_exact_duration() {
        let mut scheduler = DeadlineScheduler::new();
        let id = ToastId::new();
        let start = Instant::now();
        scheduler.schedule_from(id, start, Duration::from_secs(1));

        assert!(scheduler
            .take_due(start + Duration::from_millis(999))
            .is_empty());
        assert_eq!(scheduler.take_due(start + Duration::from_secs(1)), vec![id]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn deadline_fires_only_once() {
        let mut scheduler = DeadlineScheduler::new();
        let id = ToastId::new();
        let start = Instant::now();
        scheduler.schedule_from(id, start, Duration::from_millis(10));

        let later = start + Duration::from_secs(5);
        assert_eq!(scheduler.take_due(later), vec![id]);
        assert!(scheduler.take_due(later).is_empty());
    }

    #[test]
    fn cancelled_deadline_never_fires() {
        let mut scheduler = DeadlineScheduler::new();
        let id = ToastId::new();
        let start = Instant::now();
        scheduler.schedule_from(id, start, Duration::from_millis(10));
        scheduler.cancel(id);

        assert!(scheduler.take_due(start + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn due_ids_come_out_in_deadline_order() {
        let mut scheduler = DeadlineScheduler::new();
        let start = Instant::now();
        let late = ToastId::new();
        let early = ToastId::new();
        scheduler.schedule_from(late, start, Duration::from_secs(3));
        scheduler.schedule_from(early, start, Duration::from_secs(1));

        assert_eq!(
            scheduler.take_due(start + Duration::from_secs(10)),
            vec![early, late]
        );
    }

    #[test]
    fn rescheduling_replaces_deadline() {
        let mut scheduler = DeadlineScheduler::new();
        let id = ToastId::new();
        let start = Instant::now();
        scheduler.schedule_from(id, start, Duration::from_secs(1));
        scheduler.schedule_from(id, start, Duration::from_secs(5));

        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.deadline(id), Some(start + Duration::from_secs(5)));
    }

    #[test]
    fn unrepresentable_deadline_is_not_armed() {
        let mut scheduler = DeadlineScheduler::new();
        let id = ToastId::new();
        let start = Instant::now();
        scheduler.schedule_from(id, start, Duration::from_secs(1));
        scheduler.schedule_from(id, start, Duration::MAX);

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.deadline(id), None);
        assert!(scheduler.take_due(start + Duration::from_secs(10)).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_timer_fires_after_duration() {
        let mut scheduler = TokioScheduler::current().expect("inside runtime");
        let id = ToastId::new();
        scheduler.schedule(id, Duration::from_secs(1));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(scheduler.take_due(Instant::now()).is_empty());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(scheduler.take_due(Instant::now()), vec![id]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_cancelled_timer_is_not_reported() {
        let mut scheduler = TokioScheduler::current().expect("inside runtime");
        let id = ToastId::new();
        scheduler.schedule(id, Duration::from_secs(1));
        scheduler.cancel(id);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(scheduler.take_due(Instant::now()).is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn tokio_scheduler_requires_runtime() {
        assert!(TokioScheduler::current().is_none());
    }
}
