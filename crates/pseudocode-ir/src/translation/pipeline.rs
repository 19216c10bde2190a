// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Translation pipeline orchestrator
//!
//! Coordinates the translation of one module tree into a pseudocode document:
//! translate the top-level statements, wrap them as the implicit entry
//! procedure, finalize.

use crate::data::naming::{IdSource, UuidIds};
use crate::data::signatures::SignatureTable;
use crate::data::types::Type;
use crate::diagnostics::{Diagnostic, Result};
use crate::presentation::{finalize, Document};
use crate::syntax::{Located, Mod};
use crate::translation::statement_translator::StatementTranslator;
use crate::translation::symbols::SymbolTable;
use log::{debug, info};

/// Output of one pipeline run
#[derive(Debug, Clone)]
pub struct Translation {
    pub document: Document,

    /// Argument types observed at call sites of procedures that had no
    /// supplied signature, keyed by procedure name
    pub captured_signatures: SignatureTable,

    /// Procedures reached by at least one call
    pub called_procedures: Vec<String>,
}

pub struct TranslationPipeline {
    ids: Box<dyn IdSource>,
    signatures: SignatureTable,
}

impl TranslationPipeline {
    pub fn new(ids: impl IdSource + 'static) -> Self {
        Self::from_boxed(Box::new(ids))
    }

    /// Id source chosen at run time
    pub fn from_boxed(ids: Box<dyn IdSource>) -> Self {
        Self {
            ids,
            signatures: SignatureTable::new(),
        }
    }

    /// Seed procedure and parameter types from an external table
    pub fn with_signatures(mut self, signatures: SignatureTable) -> Self {
        self.signatures = signatures;
        self
    }

    /// Run the full translation pipeline
    pub fn run(self, module: &Mod) -> Result<Translation> {
        let body = match module {
            Mod::Module { body } => body,
            other => {
                return Err(Diagnostic::structural(
                    other,
                    format!("Expected 'Module' type, got '{}'", other.kind_name()),
                ))
            }
        };

        let supplied = self.signatures.len();
        let mut symbols = SymbolTable::new(self.ids).with_signatures(self.signatures);

        // Step 1: translate the module body, procedures included
        let (statements, _) = StatementTranslator::new(&mut symbols).translate_block(body)?;

        // Step 2: top-level code becomes the anonymous entry procedure
        if !statements.is_empty() {
            let entry = symbols.declare_procedure(None, Some(Type::Void));
            symbols.procedure_mut(entry).body = statements;
            debug!("wrapped top-level statements in the entry procedure");
        }

        let called_procedures = symbols.called_procedures();
        let captured_signatures = symbols.captured_signatures().clone();
        let declarations = symbols.into_declarations();
        info!(
            "translated module: {} procedures, {} variables, {} supplied signatures",
            declarations.procedures.len(),
            declarations.variables.len(),
            supplied
        );

        // Step 3: publish
        Ok(Translation {
            document: finalize(&declarations),
            captured_signatures,
            called_procedures,
        })
    }
}

/// Translate one module tree with random uuids
pub fn translate(module: &Mod, signatures: Option<SignatureTable>) -> Result<Document> {
    let pipeline = TranslationPipeline::new(UuidIds);
    let pipeline = match signatures {
        Some(signatures) => pipeline.with_signatures(signatures),
        None => pipeline,
    };
    pipeline.run(module).map(|translation| translation.document)
}
