// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Fresh identifiers for declarations
//!
//! Ids only need to be unique within one document; they are how expressions
//! cross-reference the variable or procedure they read or call.

use uuid::Uuid;

pub trait IdSource {
    fn fresh(&mut self) -> String;
}

/// Random v4 uuids
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn fresh(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic ids `<prefix><n>`, for reproducible documents
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: usize,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::with_prefix("id")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn fresh(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
