// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Translation from syntax trees to pseudocode IR
//!
//! Modular translation with single responsibilities:
//! - symbols: scopes, declarations and the variable type store
//! - expression_translator: one source expression to one IR expression
//! - statement_translator: statement sequences, two-pass procedure resolution
//! - builtins: names and types of the builtin functions and variables
//! - pipeline: module driver

pub mod builtins;
pub mod expression_translator;
pub mod pipeline;
pub mod statement_translator;
pub mod symbols;

pub use expression_translator::ExpressionTranslator;
pub use pipeline::{translate, Translation, TranslationPipeline};
pub use statement_translator::StatementTranslator;
pub use symbols::SymbolTable;
