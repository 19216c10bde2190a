// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Diagnostics raised during translation
//!
//! Three kinds, all fatal except `MissingName`, which the statement translator
//! recovers from at assignment-target positions by declaring a new variable.

use crate::syntax::Located;
use thiserror::Error;

pub type Result<T, E = Diagnostic> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// The tree violates a structural precondition (wrong node kind, arity).
    #[error("{message} at line {line}")]
    Structural { message: String, line: u32 },

    /// A valid construct of the source grammar that is deliberately not modelled.
    #[error("Unsupported {construct} at line {line}")]
    Unsupported { construct: String, line: u32 },

    /// An identifier that no visible scope declares.
    #[error("Missing name '{name}' at line {line}")]
    MissingName { name: String, line: u32 },
}

impl Diagnostic {
    pub fn structural(node: &impl Located, message: impl Into<String>) -> Self {
        Diagnostic::Structural {
            message: message.into(),
            line: node.line(),
        }
    }

    /// Unsupported node, named by its grammar kind.
    pub fn unsupported(node: &impl Located) -> Self {
        Self::unsupported_construct(node, format!("'{}'", node.kind_name()))
    }

    pub fn unsupported_construct(node: &impl Located, construct: impl Into<String>) -> Self {
        Diagnostic::Unsupported {
            construct: construct.into(),
            line: node.line(),
        }
    }

    pub fn missing_name(node: &impl Located, name: impl Into<String>) -> Self {
        Diagnostic::MissingName {
            name: name.into(),
            line: node.line(),
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            Diagnostic::Structural { line, .. }
            | Diagnostic::Unsupported { line, .. }
            | Diagnostic::MissingName { line, .. } => *line,
        }
    }

    pub fn is_missing_name(&self) -> bool {
        matches!(self, Diagnostic::MissingName { .. })
    }
}

/// Fails with a structural diagnostic unless `node` has one of the `accepted` kinds.
pub fn require_kind(node: &impl Located, accepted: &[&str]) -> Result<()> {
    let kind = node.kind_name();
    if accepted.contains(&kind) {
        return Ok(());
    }
    Err(Diagnostic::structural(
        node,
        format!("Expected '{}' type, got '{}'", accepted.join("'/'"), kind),
    ))
}
