// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::data::declarations::{ProcedureId, VariableId};
use crate::data::expressions::Expression;

/// IR statement. Procedures are not statements here: they live in the
/// module's procedure list and are emitted there.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Declaration point of a local or global variable
    Variable(VariableId),

    /// Call of a user procedure whose value is discarded
    Call {
        procedure: ProcedureId,
        arguments: Vec<Expression>,
    },

    /// Effectful builtin call whose value is discarded (`xs.append(v)`)
    BuiltinCall {
        builtin: String,
        arguments: Vec<Expression>,
    },

    Return { expression: Option<Expression> },

    Assignment {
        variable: VariableId,
        expression: Expression,
    },

    /// `target[index] = expression`
    ArrayAssignment {
        target: VariableId,
        indexes: Vec<Expression>,
        expression: Expression,
    },

    Selection {
        guard: Expression,
        body: Vec<Statement>,
        alternative: Vec<Statement>,
    },

    /// Pre-test loop
    Loop {
        guard: Expression,
        body: Vec<Statement>,
    },

    Break,
    Continue,
}
