// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Pseudocode IR
//!
//! This crate translates the syntax tree of a restricted procedural language
//! (functions, loops, conditionals, arrays, arithmetic) into a typed,
//! normalized, language-agnostic document. It does NOT parse source text:
//! trees arrive as JSON from an external parser.

pub mod data;
pub mod diagnostics;
pub mod presentation;
pub mod syntax;
pub mod translation;
mod construction;

#[cfg(test)]
pub(crate) mod test_utils;

// Diagnostics
pub use diagnostics::{Diagnostic, Result};

// Input tree
pub use syntax::Mod;

// Types and signature tables
pub use data::signatures::{ArgumentSignature, Signature, SignatureTable};
pub use data::types::Type;

// Fresh ids
pub use data::naming::{IdSource, SequentialIds, UuidIds};

// Output document
pub use presentation::{Document, ExpressionNode, StatementNode};

// Entry points
pub use translation::{translate, Translation, TranslationPipeline};
