// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Kind of assignment; determines how long grading takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Lab,
    Homework,
    Project,
    Playground,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Lab,
        Category::Homework,
        Category::Project,
        Category::Playground,
    ];

    pub fn grading_time(self) -> Duration {
        match self {
            Category::Lab => Duration::from_millis(20),
            Category::Homework => Duration::from_millis(40),
            Category::Project => Duration::from_millis(80),
            Category::Playground => Duration::from_millis(2),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Lab => "lab",
            Category::Homework => "homework",
            Category::Project => "project",
            Category::Playground => "playground",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_distinct_grading_time() {
        let mut times: Vec<_> = Category::ALL.iter().map(|c| c.grading_time()).collect();
        times.sort();
        times.dedup();
        assert_eq!(times.len(), Category::ALL.len());
    }
}
