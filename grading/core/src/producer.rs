// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Assignment, AssignmentError, Category, Coordinator, Random, SubmitOutcome, Timer};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Student: thinks for a while, then submits exactly one assignment
pub struct Producer<T: Timer + 'static, R: Random + 'static> {
    owner_id: u32,
    owner_name: String,
    coordinator: Arc<Coordinator>,
    timer: Arc<T>,
    random: Arc<R>,
    max_think_time: Duration,
}

impl<T: Timer + 'static, R: Random + 'static> Producer<T, R> {
    pub fn new(
        owner_id: u32,
        owner_name: impl Into<String>,
        coordinator: Arc<Coordinator>,
        timer: Arc<T>,
        random: Arc<R>,
        max_think_time: Duration,
    ) -> Self {
        Self {
            owner_id,
            owner_name: owner_name.into(),
            coordinator,
            timer,
            random,
            max_think_time,
        }
    }

    pub async fn run(self) -> Result<SubmitOutcome, AssignmentError> {
        let category = Category::ALL[self.random.usize(0..Category::ALL.len())];
        let max_millis = u64::try_from(self.max_think_time.as_millis()).unwrap_or(u64::MAX);
        let think_time = Duration::from_millis(self.random.u64(0..=max_millis));

        self.timer.sleep(think_time).await;

        let assignment = Assignment::new(self.owner_id, self.owner_name, category)?;
        let outcome = self.coordinator.submit(assignment);
        debug!(
            owner = self.owner_id,
            %category,
            think_ms = think_time.as_millis() as u64,
            ?outcome,
            "assignment submitted"
        );
        Ok(outcome)
    }

    pub fn spawn(self) -> JoinHandle<Result<SubmitOutcome, AssignmentError>> {
        tokio::spawn(self.run())
    }
}
