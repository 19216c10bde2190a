// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Procedure and variable declarations
//!
//! Declarations are owned by the symbol table's arenas. Everything else refers
//! to them through the typed indices below.

use crate::data::statements::Statement;
use crate::data::types::Type;

/// Index of a variable in the symbol table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub(crate) usize);

/// Index of a procedure in the symbol table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcedureId(pub(crate) usize);

/// What a name in scope resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    Procedure(ProcedureId),
    Variable(VariableId),
}

#[derive(Debug, Clone)]
pub struct Procedure {
    /// Fresh id published in the document
    pub uuid: String,

    /// Source name, `None` for the implicit module entry
    pub name: Option<String>,

    /// Result type, narrowed as return statements are translated
    pub ty: Type,

    pub parameters: Vec<VariableId>,

    pub body: Vec<Statement>,

    /// Set once any call site has resolved to this procedure
    pub called: bool,
}

impl Procedure {
    /// Name used in diagnostics
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<module>")
    }
}

#[derive(Debug, Clone)]
pub struct Variable {
    /// Fresh id published in the document
    pub uuid: String,

    pub name: String,
}
