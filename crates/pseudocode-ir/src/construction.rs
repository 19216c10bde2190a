// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Builders for IR nodes
//!
//! Pure constructors, one per node shape. They never resolve names or compute
//! types: callers pass resolved ids and inferred types in.

use crate::data::declarations::{ProcedureId, VariableId};
use crate::data::expressions::{BinOp, Expression, LiteralValue, UnOp};
use crate::data::statements::Statement;
use crate::data::types::Type;
use crate::syntax::Constant;

impl Expression {
    pub fn variable(variable: VariableId, ty: Type) -> Self {
        Expression::Variable { variable, ty }
    }

    pub fn builtin_variable(name: impl Into<String>, ty: Type) -> Self {
        Expression::BuiltinVariable {
            name: name.into(),
            ty,
        }
    }

    pub fn call(procedure: ProcedureId, arguments: Vec<Expression>, ty: Type) -> Self {
        Expression::Call {
            procedure,
            arguments,
            ty,
        }
    }

    pub fn builtin_call(builtin: impl Into<String>, arguments: Vec<Expression>, ty: Type) -> Self {
        Expression::BuiltinCall {
            builtin: builtin.into(),
            arguments,
            ty,
        }
    }

    pub fn array_length(target: Expression) -> Self {
        Expression::ArrayLength {
            target: Box::new(target),
        }
    }

    pub fn array_element(target: Expression, index: Expression, ty: Type) -> Self {
        Expression::ArrayElement {
            target: Box::new(target),
            index: Box::new(index),
            ty,
        }
    }

    pub fn literal(value: Constant, ty: Type) -> Self {
        Expression::Literal {
            value: LiteralValue::Scalar(value),
            ty,
        }
    }

    /// Integer literal
    pub fn int(value: i64) -> Self {
        Self::literal(Constant::Int(value), Type::Int)
    }

    /// Aggregate literal whose elements share `element_type`
    pub fn aggregate(elements: Vec<Expression>, element_type: Type) -> Self {
        Expression::Literal {
            value: LiteralValue::Elements(elements),
            ty: Type::array_of(element_type),
        }
    }

    pub fn binary(op: BinOp, left: Expression, right: Expression, ty: Type) -> Self {
        Expression::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty,
        }
    }

    pub fn unary(op: UnOp, operand: Expression, ty: Type) -> Self {
        Expression::UnaryOp {
            op,
            operand: Box::new(operand),
            ty,
        }
    }
}

impl Statement {
    pub fn call(procedure: ProcedureId, arguments: Vec<Expression>) -> Self {
        Statement::Call {
            procedure,
            arguments,
        }
    }

    pub fn builtin_call(builtin: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Statement::BuiltinCall {
            builtin: builtin.into(),
            arguments,
        }
    }

    pub fn ret(expression: Option<Expression>) -> Self {
        Statement::Return { expression }
    }

    pub fn assignment(variable: VariableId, expression: Expression) -> Self {
        Statement::Assignment {
            variable,
            expression,
        }
    }

    pub fn array_assignment(target: VariableId, index: Expression, expression: Expression) -> Self {
        Statement::ArrayAssignment {
            target,
            indexes: vec![index],
            expression,
        }
    }

    pub fn selection(guard: Expression, body: Vec<Statement>, alternative: Vec<Statement>) -> Self {
        Statement::Selection {
            guard,
            body,
            alternative,
        }
    }

    pub fn pre_test_loop(guard: Expression, body: Vec<Statement>) -> Self {
        Statement::Loop { guard, body }
    }
}
