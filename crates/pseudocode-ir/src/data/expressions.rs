// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::data::declarations::{ProcedureId, VariableId};
use crate::data::types::Type;
use crate::syntax::Constant;

/// Value carried by a literal node
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Scalar(Constant),
    /// Aggregate literal; every element already unified to one element type
    Elements(Vec<Expression>),
}

/// Typed IR expression. Variables and procedures are referenced by id only.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Read of a declared variable
    Variable { variable: VariableId, ty: Type },

    /// Read of a builtin name such as `int` or `__name__`
    BuiltinVariable { name: String, ty: Type },

    /// Call of a user procedure
    Call {
        procedure: ProcedureId,
        arguments: Vec<Expression>,
        ty: Type,
    },

    /// Call of a builtin function
    BuiltinCall {
        builtin: String,
        arguments: Vec<Expression>,
        ty: Type,
    },

    /// `len(target)`, always `int`
    ArrayLength { target: Box<Expression> },

    /// `target[index]`
    ArrayElement {
        target: Box<Expression>,
        index: Box<Expression>,
        ty: Type,
    },

    Literal { value: LiteralValue, ty: Type },

    BinaryOp {
        op: BinOp,
        left: Box<Expression>,
        right: Box<Expression>,
        ty: Type,
    },

    UnaryOp {
        op: UnOp,
        operand: Box<Expression>,
        ty: Type,
    },
}

/// Canonical binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
    Pow,
    And,
    Or,
    Equal,
    Different,
    Greater,
    GreaterEq,
    Smaller,
    SmallerEq,
}

impl BinOp {
    /// Name published in the document
    pub fn name(self) -> &'static str {
        match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::Div => "div",
            BinOp::IntDiv => "intdiv",
            BinOp::Mod => "mod",
            BinOp::Pow => "pow",
            BinOp::And => "and",
            BinOp::Or => "or",
            BinOp::Equal => "equal",
            BinOp::Different => "different",
            BinOp::Greater => "greater",
            BinOp::GreaterEq => "greater_eq",
            BinOp::Smaller => "smaller",
            BinOp::SmallerEq => "smaller_eq",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Equal
                | BinOp::Different
                | BinOp::Greater
                | BinOp::GreaterEq
                | BinOp::Smaller
                | BinOp::SmallerEq
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not,
    Neg,
}

impl UnOp {
    pub fn name(self) -> &'static str {
        match self {
            UnOp::Not => "not",
            UnOp::Neg => "neg",
        }
    }
}

impl Expression {
    /// Inferred type of this node
    pub fn ty(&self) -> Type {
        match self {
            Expression::ArrayLength { .. } => Type::Int,
            Expression::Variable { ty, .. }
            | Expression::BuiltinVariable { ty, .. }
            | Expression::Call { ty, .. }
            | Expression::BuiltinCall { ty, .. }
            | Expression::ArrayElement { ty, .. }
            | Expression::Literal { ty, .. }
            | Expression::BinaryOp { ty, .. }
            | Expression::UnaryOp { ty, .. } => ty.clone(),
        }
    }

    /// Id of the variable read by a plain variable reference
    pub fn variable_id(&self) -> Option<VariableId> {
        match self {
            Expression::Variable { variable, .. } => Some(*variable),
            _ => None,
        }
    }
}
