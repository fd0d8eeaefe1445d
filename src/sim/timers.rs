//! Deferred and periodic tasks
//!
//! Replaces free-running wall-clock callbacks with data: a task names what
//! should happen and which entity it targets, and the world applies it when
//! the scheduler reports it due. Entity ids are never reused, so a task whose
//! target is already gone resolves to nothing.

use serde::{Deserialize, Serialize};

/// Stable identifier of an enemy
pub type EnemyId = u32;

/// Shortest accepted period for repeating timers
pub const MIN_PERIOD_MS: f64 = 1.0;

/// Cancellation handle returned by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

/// Work a timer performs when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerTask {
    /// Player leaves the hit state
    PlayerRecover,
    /// Enemy picks a new random state
    EnemyStateChange(EnemyId),
    /// Enemy is hidden and removed from the world
    EnemyRemove(EnemyId),
    /// Idle reminder cue
    IdleReminder,
}

impl TimerTask {
    /// Enemy this task touches, if any
    pub fn enemy(&self) -> Option<EnemyId> {
        match *self {
            TimerTask::EnemyStateChange(id) | TimerTask::EnemyRemove(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TimerEntry {
    handle: TimerHandle,
    due_ms: f64,
    period_ms: Option<f64>,
    task: TimerTask,
}

/// Scheduler driven by the simulation clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    now_ms: f64,
    next_handle: u64,
    entries: Vec<TimerEntry>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulation time in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run `task` once after `delay_ms`
    pub fn schedule(&mut self, delay_ms: f64, task: TimerTask) -> TimerHandle {
        self.push(delay_ms, None, task)
    }

    /// Run `task` every `period_ms`, first time one period from now
    ///
    /// Periods shorter than `MIN_PERIOD_MS` (or not finite) are refused.
    pub fn schedule_every(&mut self, period_ms: f64, task: TimerTask) -> Option<TimerHandle> {
        if !(period_ms.is_finite() && period_ms >= MIN_PERIOD_MS) {
            log::warn!("Refusing periodic {task:?} with period {period_ms} ms");
            return None;
        }
        Some(self.push(period_ms, Some(period_ms), task))
    }

    fn push(&mut self, delay_ms: f64, period_ms: Option<f64>, task: TimerTask) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(TimerEntry {
            handle,
            due_ms: self.now_ms + delay_ms.max(0.0),
            period_ms,
            task,
        });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Cancel every timer whose task matches
    pub fn cancel_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&TimerTask) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|e| !predicate(&e.task));
        before - self.entries.len()
    }

    /// Advance the clock and collect every task that fell due
    ///
    /// Tasks come out in due-time order (handle order on ties). A periodic
    /// timer fires once for each period the step covered.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<TimerTask> {
        self.now_ms += dt_ms.max(0.0);

        let mut fired: Vec<(f64, TimerHandle, TimerTask)> = Vec::new();
        let now = self.now_ms;

        self.entries.retain_mut(|entry| {
            while entry.due_ms <= now {
                fired.push((entry.due_ms, entry.handle, entry.task));
                match entry.period_ms {
                    Some(period) => entry.due_ms += period,
                    None => return false,
                }
            }
            true
        });

        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, _, task)| task).collect()
    }
}
