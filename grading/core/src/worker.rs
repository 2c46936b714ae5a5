// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CompletedCounter, Coordinator, Grader};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Grading assistant: takes assignments until the coordinator reports shutdown
pub struct Worker<G: Grader + 'static> {
    id: usize,
    name: String,
    coordinator: Arc<Coordinator>,
    grader: Arc<G>,
    completed: CompletedCounter,
    task_handle: Option<JoinHandle<usize>>,
}

impl<G: Grader + 'static> Worker<G> {
    pub fn new(name: impl Into<String>, coordinator: Arc<Coordinator>, grader: Arc<G>) -> Self {
        let name = name.into();
        let (id, completed) = coordinator.register_worker(name.clone());
        Self {
            id,
            name,
            coordinator,
            grader,
            completed,
            task_handle: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn completed(&self) -> usize {
        self.completed.get()
    }

    /// Spawns the grading loop. Calling it again while running does nothing.
    pub fn start(&mut self) {
        if self.task_handle.is_some() {
            warn!(worker = %self.name, "worker already started");
            return;
        }

        let name = self.name.clone();
        let coordinator = self.coordinator.clone();
        let grader = self.grader.clone();
        let completed = self.completed.clone();

        let handle = tokio::spawn(async move {
            debug!(worker = %name, "worker started");

            while let Some(assignment) = coordinator.take_next().await {
                grader.grade(&assignment).await;
                completed.increment();
                debug!(
                    worker = %name,
                    owner = assignment.owner_id(),
                    category = %assignment.category(),
                    "assignment graded"
                );
            }

            debug!(worker = %name, graded = completed.get(), "worker finished");
            completed.get()
        });

        self.task_handle = Some(handle);
    }

    /// Interrupts the task from outside. The worker ends abnormally and
    /// whatever it was grading at that moment is lost.
    pub fn abort(&self) {
        if let Some(handle) = &self.task_handle {
            handle.abort();
        }
    }

    /// Waits for the worker to finish and returns how many assignments it graded
    pub async fn wait(self) -> Result<usize, tokio::task::JoinError> {
        match self.task_handle {
            Some(handle) => handle.await,
            None => Ok(self.completed.get()),
        }
    }
}
