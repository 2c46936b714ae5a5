// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(dead_code)]

use async_trait::async_trait;
use grading_core::{Assignment, Category, Grader, Random, Timer};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

pub fn assignment(owner_id: u32, category: Category) -> Assignment {
    Assignment::new(owner_id, format!("Student #{}", owner_id), category).unwrap()
}

pub fn category_index(category: Category) -> usize {
    Category::ALL.iter().position(|c| *c == category).unwrap()
}

/// Returns immediately
pub struct InstantTimer;

#[async_trait]
impl Timer for InstantTimer {
    async fn sleep(&self, _duration: Duration) {}
}

/// Records every requested duration without sleeping
#[derive(Default)]
pub struct RecordingTimer {
    pub requested: Mutex<Vec<Duration>>,
}

#[async_trait]
impl Timer for RecordingTimer {
    async fn sleep(&self, duration: Duration) {
        self.requested.lock().unwrap().push(duration);
    }
}

/// Always picks the same category and think time
pub struct FixedRandom {
    pub category: Category,
    pub think_ms: u64,
}

impl FixedRandom {
    pub fn new(category: Category, think_ms: u64) -> Self {
        Self { category, think_ms }
    }
}

impl Random for FixedRandom {
    fn usize(&self, range: std::ops::Range<usize>) -> usize {
        category_index(self.category).clamp(range.start, range.end - 1)
    }
    fn u64(&self, range: std::ops::RangeInclusive<u64>) -> u64 {
        self.think_ms.clamp(*range.start(), *range.end())
    }
}

/// Grades instantly and remembers the order it saw categories in
#[derive(Default)]
pub struct RecordingGrader {
    graded: Mutex<Vec<Category>>,
}

impl RecordingGrader {
    pub fn graded(&self) -> Vec<Category> {
        self.graded.lock().unwrap().clone()
    }
}

#[async_trait]
impl Grader for RecordingGrader {
    async fn grade(&self, assignment: &Assignment) {
        self.graded.lock().unwrap().push(assignment.category());
    }
}

/// Crashes when asked to grade the given category
pub struct PanickingGrader {
    pub fatal: Category,
}

#[async_trait]
impl Grader for PanickingGrader {
    async fn grade(&self, assignment: &Assignment) {
        if assignment.category() == self.fatal {
            panic!("grader crashed on {}", assignment.category());
        }
    }
}

/// Signals when grading begins, then never finishes
#[derive(Default)]
pub struct StuckGrader {
    pub started: Notify,
}

#[async_trait]
impl Grader for StuckGrader {
    async fn grade(&self, _assignment: &Assignment) {
        self.started.notify_one();
        std::future::pending::<()>().await;
    }
}
