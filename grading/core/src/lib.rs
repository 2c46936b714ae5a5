// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod category;
pub use category::Category;

mod assignment;
pub use assignment::{Assignment, AssignmentError};

mod coordinator;
pub use coordinator::{CompletedCounter, Coordinator, ShutdownPolicy, SubmitOutcome, WorkerStats};

mod worker;
pub use worker::Worker;

mod producer;
pub use producer::Producer;

pub mod grader;
pub use grader::{Grader, TimedGrader};

pub mod timer;
pub use timer::Timer;

pub mod tokio_timer;
pub use tokio_timer::TokioTimer;

pub mod random;
pub use random::Random;

pub mod fastrand_random;
pub use fastrand_random::FastrandRandom;

mod config;
pub use config::{ConfigError, SimulationConfig};

mod orchestrator;
pub use orchestrator::{Orchestrator, SimulationReport};
