// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Assignment;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tracing::{debug, info};

/// What happens to assignments still queued when grading is finalized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShutdownPolicy {
    /// Hand out everything already queued, then report shutdown
    #[default]
    Drain,
    /// Report shutdown immediately; queued assignments are never delivered
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    /// Arrived after finalize; nothing was queued
    Dropped,
}

/// Read-only view of a worker's completed-count
#[derive(Debug, Clone, Default)]
pub struct CompletedCounter {
    inner: Arc<AtomicUsize>,
}

impl CompletedCounter {
    pub fn get(&self) -> usize {
        self.inner.load(Ordering::Acquire)
    }

    pub(crate) fn increment(&self) {
        self.inner.fetch_add(1, Ordering::AcqRel);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerStats {
    pub id: usize,
    pub name: String,
    pub completed: usize,
}

struct RegisteredWorker {
    id: usize,
    name: String,
    completed: CompletedCounter,
}

struct State {
    pending: VecDeque<Assignment>,
    submitted: usize,
    terminated: bool,
    workers: Vec<RegisteredWorker>,
}

enum NextStep {
    Deliver(Assignment),
    Shutdown,
    Wait,
}

/// Shared grading queue: students submit, assistants take, the driver finalizes.
///
/// All state sits behind a single mutex. Blocked takers park on a `Notify`:
/// a submit wakes one of them, finalize wakes all of them. A taker registers
/// for wakeups before inspecting the queue, so a submit or finalize racing
/// with the inspection cannot be missed.
pub struct Coordinator {
    state: Mutex<State>,
    wakeup: Notify,
    policy: ShutdownPolicy,
}

impl Coordinator {
    pub fn new(policy: ShutdownPolicy) -> Self {
        Self::with_capacity(0, policy)
    }

    /// Creates a coordinator sized for the expected number of workers
    pub fn with_capacity(worker_count: usize, policy: ShutdownPolicy) -> Self {
        Self {
            state: Mutex::new(State {
                pending: VecDeque::new(),
                submitted: 0,
                terminated: false,
                workers: Vec::with_capacity(worker_count),
            }),
            wakeup: Notify::new(),
            policy,
        }
    }

    pub fn policy(&self) -> ShutdownPolicy {
        self.policy
    }

    // A panic in some other task must not wedge the queue for everyone else.
    // No critical section below can leave the state half-updated.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submit(&self, assignment: Assignment) -> SubmitOutcome {
        {
            let mut state = self.lock();
            if state.terminated {
                debug!(
                    owner = assignment.owner_id(),
                    category = %assignment.category(),
                    "submission after finalize dropped"
                );
                return SubmitOutcome::Dropped;
            }
            debug!(
                owner = assignment.owner_id(),
                category = %assignment.category(),
                "assignment queued"
            );
            state.pending.push_back(assignment);
            state.submitted += 1;
        }
        self.wakeup.notify_one();
        SubmitOutcome::Accepted
    }

    /// Waits for the next assignment in submission order.
    /// Returns None once grading is finalized and nothing is left to hand out.
    pub async fn take_next(&self) -> Option<Assignment> {
        loop {
            let notified = self.wakeup.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            match self.next_step() {
                NextStep::Deliver(assignment) => return Some(assignment),
                NextStep::Shutdown => return None,
                NextStep::Wait => notified.await,
            }
        }
    }

    // Terminated check and dequeue happen in one critical section.
    fn next_step(&self) -> NextStep {
        let mut state = self.lock();
        if state.terminated && self.policy == ShutdownPolicy::Discard {
            return NextStep::Shutdown;
        }
        match state.pending.pop_front() {
            Some(assignment) => NextStep::Deliver(assignment),
            None if state.terminated => NextStep::Shutdown,
            None => NextStep::Wait,
        }
    }

    pub fn finalize(&self) {
        {
            let mut state = self.lock();
            if state.terminated {
                return;
            }
            state.terminated = true;
            info!(
                submitted = state.submitted,
                pending = state.pending.len(),
                policy = ?self.policy,
                "grading finalized"
            );
        }
        self.wakeup.notify_waiters();
    }

    pub fn is_finalized(&self) -> bool {
        self.lock().terminated
    }

    pub fn submitted_count(&self) -> usize {
        self.lock().submitted
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    /// Assignments that were accepted but will never be handed out
    pub fn abandoned_count(&self) -> usize {
        let state = self.lock();
        if state.terminated && self.policy == ShutdownPolicy::Discard {
            state.pending.len()
        } else {
            0
        }
    }

    pub fn worker_stats(&self) -> Vec<WorkerStats> {
        self.lock()
            .workers
            .iter()
            .map(|worker| WorkerStats {
                id: worker.id,
                name: worker.name.clone(),
                completed: worker.completed.get(),
            })
            .collect()
    }

    /// Records a worker so its completed-count shows up in `worker_stats`.
    /// Returns the assigned id and the counter the worker owns.
    pub fn register_worker(&self, name: impl Into<String>) -> (usize, CompletedCounter) {
        let mut state = self.lock();
        let id = state.workers.len();
        let completed = CompletedCounter::default();
        state.workers.push(RegisteredWorker {
            id,
            name: name.into(),
            completed: completed.clone(),
        });
        (id, completed)
    }
}
