// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    AssignmentError, Coordinator, Producer, Random, SimulationConfig, SubmitOutcome, TimedGrader,
    Timer, Worker, WorkerStats,
};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    /// Submissions accepted before finalize
    pub submitted: usize,
    /// Sum of every worker's completed-count
    pub graded: usize,
    /// Accepted but never handed out (discard policy only)
    pub abandoned: usize,
    /// Submissions that arrived after finalize; every spawned student is
    /// joined, so this plus `submitted` accounts for all of them
    pub dropped: usize,
    /// Workers that ended abnormally
    pub failed_workers: usize,
    pub workers: Vec<WorkerStats>,
}

/// Drives one grading session: students submit, assistants grade, then shutdown
pub struct Orchestrator<T: Timer + 'static, R: Random + 'static> {
    config: SimulationConfig,
    timer: Arc<T>,
    random: Arc<R>,
    cancellation_token: CancellationToken,
}

impl<T: Timer + 'static, R: Random + 'static> Orchestrator<T, R> {
    pub fn new(config: SimulationConfig, timer: Arc<T>, random: Arc<R>) -> Self {
        Self {
            config,
            timer,
            random,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Cancelling this token stops waiting for students and finalizes early
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    pub async fn run(&self) -> SimulationReport {
        let config = &self.config;
        let coordinator = Arc::new(Coordinator::with_capacity(
            config.num_assistants,
            config.shutdown_policy,
        ));
        let grader = Arc::new(TimedGrader::new(self.timer.clone()));

        info!(
            students = config.num_students,
            assistants = config.num_assistants,
            policy = ?config.shutdown_policy,
            "grading session started"
        );

        let mut workers: Vec<_> = (0..config.num_assistants)
            .map(|i| Worker::new(format!("Assistant #{}", i), coordinator.clone(), grader.clone()))
            .collect();
        for worker in workers.iter_mut() {
            worker.start();
        }

        let mut producers: VecDeque<_> = (0..config.num_students)
            .map(|i| {
                Producer::new(
                    i,
                    format!("Student #{}", i),
                    coordinator.clone(),
                    self.timer.clone(),
                    self.random.clone(),
                    config.max_think_time(),
                )
                .spawn()
            })
            .collect();

        // A handle leaves the queue only once joined, so cancelling the
        // select below never detaches a student task.
        let mut dropped = 0;
        let join_producers = async {
            while let Some(handle) = producers.front_mut() {
                let result = handle.await;
                producers.pop_front();
                tally_student(result, &mut dropped);
            }
        };

        tokio::select! {
            _ = join_producers => info!("All students submitted"),
            _ = self.cancellation_token.cancelled() => {
                warn!(
                    remaining = producers.len(),
                    "Shutdown requested, finalizing before all students submitted"
                );
            }
        }

        coordinator.finalize();

        // Late students still submit; the coordinator drops what they send
        for handle in producers.drain(..) {
            tally_student(handle.await, &mut dropped);
        }

        let mut failed_workers = 0;
        for worker in workers {
            let name = worker.name().to_string();
            match worker.wait().await {
                Ok(graded) => info!(worker = %name, graded, "assistant finished"),
                Err(e) => {
                    failed_workers += 1;
                    error!(worker = %name, "assistant terminated abnormally: {}", e);
                }
            }
        }

        let stats = coordinator.worker_stats();
        let report = SimulationReport {
            submitted: coordinator.submitted_count(),
            graded: stats.iter().map(|s| s.completed).sum(),
            abandoned: coordinator.abandoned_count(),
            dropped,
            failed_workers,
            workers: stats,
        };

        info!(
            submitted = report.submitted,
            graded = report.graded,
            abandoned = report.abandoned,
            "grading session finished"
        );
        report
    }
}

fn tally_student(
    result: Result<Result<SubmitOutcome, AssignmentError>, JoinError>,
    dropped: &mut usize,
) {
    match result {
        Ok(Ok(SubmitOutcome::Accepted)) => {}
        Ok(Ok(SubmitOutcome::Dropped)) => *dropped += 1,
        Ok(Err(e)) => warn!("Student rejected at submission: {}", e),
        Err(e) => error!("Student task failed: {}", e),
    }
}
