// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Assignment, Timer};
use async_trait::async_trait;

/// Processes a single assignment on behalf of a worker
#[async_trait]
pub trait Grader: Send + Sync {
    async fn grade(&self, assignment: &Assignment);
}

/// Simulates grading by blocking for the category's grading time
pub struct TimedGrader<T: Timer> {
    timer: T,
}

impl<T: Timer> TimedGrader<T> {
    pub fn new(timer: T) -> Self {
        Self { timer }
    }
}

#[async_trait]
impl<T: Timer> Grader for TimedGrader<T> {
    async fn grade(&self, assignment: &Assignment) {
        self.timer.sleep(assignment.category().grading_time()).await;
    }
}
