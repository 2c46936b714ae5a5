// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Category;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("owner name must not be blank (owner id {0})")]
    BlankOwnerName(u32),
}

/// One unit of work submitted by a student; immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    owner_id: u32,
    owner_name: String,
    category: Category,
}

impl Assignment {
    pub fn new(
        owner_id: u32,
        owner_name: impl Into<String>,
        category: Category,
    ) -> Result<Self, AssignmentError> {
        let owner_name = owner_name.into();
        if owner_name.trim().is_empty() {
            return Err(AssignmentError::BlankOwnerName(owner_id));
        }
        Ok(Self {
            owner_id,
            owner_name,
            category,
        })
    }

    pub fn owner_id(&self) -> u32 {
        self.owner_id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn category(&self) -> Category {
        self.category
    }
}
