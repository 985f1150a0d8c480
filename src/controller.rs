//! Debounced apply and reset scheduling
//!
//! A single slot holds the task for the current cycle. Every new cycle (an
//! edit or a reset) aborts whatever task is in the slot before spawning its
//! own, so at most one debounce delay and one tool process exist at a time.
//! Aborting drops the task's future, which kills a running child process.
//!
//! Results travel back to the interaction thread over an mpsc queue, tagged
//! with the cycle's generation so stale results can be discarded there.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::executor;
use crate::params::{ParamChange, Snapshot};
use crate::tool::Tool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub debounce: Duration,
    pub deadline: Duration,
}

/// Where the current cycle stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Debounce delay running
    Pending,
    /// Tool process in flight
    Running,
}

/// Work for the interaction thread
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateKind {
    Status(String),
    /// Reset finished: restore defaults under suppression, then show the text
    ResetCompleted(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiUpdate {
    pub generation: u64,
    pub kind: UpdateKind,
}

pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Sending half of the interaction-thread queue
#[derive(Clone)]
pub struct UiQueue {
    tx: Sender<UiUpdate>,
    waker: Waker,
}

impl UiQueue {
    /// `waker` runs after each send so the UI thread wakes up to drain the queue
    pub fn new(waker: Waker) -> (Self, Receiver<UiUpdate>) {
        let (tx, rx) = std::sync::mpsc::channel();
        (Self { tx, waker }, rx)
    }

    fn send(&self, update: UiUpdate) {
        if self.tx.send(update).is_err() {
            debug!("UI queue closed, dropping update");
            return;
        }
        (self.waker)();
    }
}

struct Slot {
    generation: u64,
    phase: Phase,
    task: Option<JoinHandle<()>>,
}

struct Inner {
    runtime: Handle,
    tool: Tool,
    timings: Timings,
    queue: UiQueue,
    slot: Mutex<Slot>,
}

#[derive(Clone)]
pub struct Controller {
    inner: Arc<Inner>,
}

impl Controller {
    pub fn new(runtime: Handle, tool: Tool, timings: Timings, queue: UiQueue) -> Self {
        Self {
            inner: Arc::new(Inner {
                runtime,
                tool,
                timings,
                queue,
                slot: Mutex::new(Slot {
                    generation: 0,
                    phase: Phase::Idle,
                    task: None,
                }),
            }),
        }
    }

    pub fn phase(&self) -> Phase {
        self.inner.lock().phase
    }

    /// True if `generation` belongs to the most recently started cycle
    pub fn is_current(&self, generation: u64) -> bool {
        self.inner.lock().generation == generation
    }

    /// Parameter-change listener entry point
    pub fn on_parameter_changed(&self, change: &ParamChange) {
        debug!(kind = ?change.kind, value = change.value, "Parameter changed");
        self.schedule_apply(change.snapshot);
    }

    /// Supersede any pending or running cycle and apply `snapshot` once the
    /// debounce delay passes without another call.
    pub fn schedule_apply(&self, snapshot: Snapshot) {
        let mut slot = self.inner.lock();
        let generation = Inner::supersede(&mut slot);
        slot.phase = Phase::Pending;
        debug!(
            generation,
            temperature = snapshot.temperature,
            brightness = snapshot.brightness,
            gamma = snapshot.gamma,
            "Scheduled apply"
        );

        let inner = Arc::clone(&self.inner);
        slot.task = Some(self.inner.runtime.spawn(async move {
            tokio::time::sleep(inner.timings.debounce).await;
            if !inner.enter_running(generation) {
                return;
            }

            let invocation = inner.tool.apply(&snapshot);
            let result = executor::run(&invocation, inner.timings.deadline).await;
            let text = executor::status_text(&invocation.mode, &result);
            inner.finish(generation, UpdateKind::Status(text));
        }));
    }

    /// Run the tool's reset mode now, superseding any pending or running cycle.
    /// Defaults are restored on the interaction thread once the tool returns,
    /// whether or not it succeeded.
    pub fn reset(&self) {
        let mut slot = self.inner.lock();
        let generation = Inner::supersede(&mut slot);
        slot.phase = Phase::Running;
        info!(generation, "Reset requested");

        let inner = Arc::clone(&self.inner);
        slot.task = Some(self.inner.runtime.spawn(async move {
            let invocation = inner.tool.reset();
            let result = executor::run(&invocation, inner.timings.deadline).await;
            let text = executor::status_text(&invocation.mode, &result);
            inner.finish(generation, UpdateKind::ResetCompleted(text));
        }));
    }

    /// Abort the current cycle without starting a new one
    pub fn cancel(&self) {
        let mut slot = self.inner.lock();
        Inner::supersede(&mut slot);
        slot.phase = Phase::Idle;
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Abort the task in the slot and open a new generation
    fn supersede(slot: &mut Slot) -> u64 {
        if let Some(task) = slot.task.take() {
            if !task.is_finished() {
                debug!(generation = slot.generation, phase = ?slot.phase, "Superseding cycle");
            }
            task.abort();
        }
        slot.generation += 1;
        slot.generation
    }

    fn enter_running(&self, generation: u64) -> bool {
        let mut slot = self.lock();
        if slot.generation != generation {
            return false;
        }
        slot.phase = Phase::Running;
        true
    }

    fn finish(&self, generation: u64, kind: UpdateKind) {
        {
            let mut slot = self.lock();
            if slot.generation != generation {
                debug!(generation, "Discarding superseded result");
                return;
            }
            slot.phase = Phase::Idle;
        }
        self.queue.send(UiUpdate { generation, kind });
    }
}
