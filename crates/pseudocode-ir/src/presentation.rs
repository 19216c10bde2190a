// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Public document shape
//!
//! `finalize` turns the translated declarations into the serializable document.
//! Declarations are referenced by their published uuid, and every typed node
//! splits its type into a base name and an `array` flag.

use crate::data::declarations::{Procedure, ProcedureId, VariableId};
use crate::data::expressions::{Expression, LiteralValue};
use crate::data::statements::Statement;
use crate::data::types::Type;
use crate::syntax::Constant;
use crate::translation::symbols::Declarations;
use serde::Serialize;
use std::collections::BTreeSet;

pub const FORMAT: &str = "pseudocodejson";
pub const VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub format: String,
    pub version: String,
    pub constants: Vec<StatementNode>,
    pub procedures: Vec<StatementNode>,
}

/// `{ "type": <base>, "array": <bool> }`, flattened into typed nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedType {
    #[serde(rename = "type")]
    pub name: String,
    pub array: bool,
}

impl From<&Type> for PublishedType {
    fn from(ty: &Type) -> Self {
        let (name, array) = ty.published();
        Self { name, array }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Statement")]
pub enum StatementNode {
    Procedure {
        uuid: String,
        id: Option<String>,
        #[serde(flatten)]
        ty: PublishedType,
        parameters: Vec<StatementNode>,
        body: Vec<StatementNode>,
    },
    Variable {
        uuid: String,
        id: String,
        #[serde(flatten)]
        ty: PublishedType,
    },
    Call {
        #[serde(flatten)]
        target: CallTarget,
        arguments: Vec<ExpressionNode>,
    },
    Return {
        expression: Option<ExpressionNode>,
    },
    Assignment {
        variable: String,
        expression: ExpressionNode,
    },
    #[serde(rename = "Array Assignment")]
    ArrayAssignment {
        target: String,
        indexes: Vec<ExpressionNode>,
        expression: ExpressionNode,
    },
    Selection {
        guard: ExpressionNode,
        body: Vec<StatementNode>,
        alternative: Vec<StatementNode>,
    },
    Loop {
        guard: ExpressionNode,
        body: Vec<StatementNode>,
    },
    Break,
    Continue,
}

/// Callee of a call statement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CallTarget {
    Procedure { procedure: String },
    Builtin { builtin: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Expression")]
pub enum ExpressionNode {
    Variable {
        #[serde(flatten)]
        reference: Reference,
        #[serde(flatten)]
        ty: PublishedType,
    },
    Call {
        #[serde(flatten)]
        call: CallNode,
        #[serde(flatten)]
        ty: PublishedType,
    },
    #[serde(rename = "Array Length")]
    ArrayLength {
        target: Box<ExpressionNode>,
        indexes: Vec<ExpressionNode>,
        #[serde(flatten)]
        ty: PublishedType,
    },
    #[serde(rename = "Array Element")]
    ArrayElement {
        target: Box<ExpressionNode>,
        indexes: Vec<ExpressionNode>,
        #[serde(flatten)]
        ty: PublishedType,
    },
    Literal {
        #[serde(flatten)]
        ty: PublishedType,
        value: LiteralNode,
    },
    #[serde(rename = "Binary Op")]
    BinaryOp {
        op: &'static str,
        left: Box<ExpressionNode>,
        right: Box<ExpressionNode>,
        #[serde(flatten)]
        ty: PublishedType,
    },
    #[serde(rename = "Unary Op")]
    UnaryOp {
        op: &'static str,
        expression: Box<ExpressionNode>,
        #[serde(flatten)]
        ty: PublishedType,
    },
}

/// What a variable expression reads
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reference {
    Variable { variable: String },
    Builtin { builtin: String },
}

/// A user call nests its call statement; a builtin call is inline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CallNode {
    Procedure {
        call: Box<StatementNode>,
    },
    Builtin {
        builtin: String,
        arguments: Vec<ExpressionNode>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralNode {
    Scalar(Constant),
    Elements(Vec<ExpressionNode>),
}

impl Document {
    fn new(procedures: Vec<StatementNode>) -> Self {
        Self {
            format: FORMAT.to_string(),
            version: VERSION.to_string(),
            constants: vec![],
            procedures,
        }
    }

    /// The procedure named `name` and every procedure it transitively calls,
    /// in document order. `None` if no procedure has that name.
    pub fn isolate(&self, name: &str) -> Option<Document> {
        let root = self.procedures.iter().find(|procedure| {
            matches!(procedure, StatementNode::Procedure { id: Some(id), .. } if id == name)
        })?;

        let mut reachable = BTreeSet::new();
        let mut pending = vec![root];
        while let Some(procedure) = pending.pop() {
            let StatementNode::Procedure { uuid, .. } = procedure else {
                continue;
            };
            if !reachable.insert(uuid.as_str()) {
                continue;
            }
            let mut calls = vec![];
            procedure.collect_calls(&mut calls);
            pending.extend(self.procedures.iter().filter(|candidate| {
                matches!(candidate, StatementNode::Procedure { uuid, .. } if calls.contains(&uuid.as_str()))
            }));
        }

        let procedures = self
            .procedures
            .iter()
            .filter(|procedure| {
                matches!(procedure, StatementNode::Procedure { uuid, .. } if reachable.contains(uuid.as_str()))
            })
            .cloned()
            .collect();
        Some(Document {
            constants: self.constants.clone(),
            ..Document::new(procedures)
        })
    }

    /// Names of the procedures in the document, the implicit entry excluded
    pub fn procedure_names(&self) -> Vec<&str> {
        self.procedures
            .iter()
            .filter_map(|procedure| match procedure {
                StatementNode::Procedure { id: Some(id), .. } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl StatementNode {
    /// Uuids of the procedures called anywhere below this node
    fn collect_calls<'n>(&'n self, calls: &mut Vec<&'n str>) {
        match self {
            StatementNode::Procedure { body, .. } | StatementNode::Loop { body, .. } => {
                body.iter().for_each(|statement| statement.collect_calls(calls));
                if let StatementNode::Loop { guard, .. } = self {
                    guard.collect_calls(calls);
                }
            }
            StatementNode::Call { target, arguments } => {
                if let CallTarget::Procedure { procedure } = target {
                    calls.push(procedure);
                }
                arguments.iter().for_each(|argument| argument.collect_calls(calls));
            }
            StatementNode::Return { expression } => {
                expression.iter().for_each(|expression| expression.collect_calls(calls))
            }
            StatementNode::Assignment { expression, .. } => expression.collect_calls(calls),
            StatementNode::ArrayAssignment {
                indexes,
                expression,
                ..
            } => {
                indexes.iter().for_each(|index| index.collect_calls(calls));
                expression.collect_calls(calls);
            }
            StatementNode::Selection {
                guard,
                body,
                alternative,
            } => {
                guard.collect_calls(calls);
                body.iter()
                    .chain(alternative)
                    .for_each(|statement| statement.collect_calls(calls));
            }
            StatementNode::Variable { .. } | StatementNode::Break | StatementNode::Continue => {}
        }
    }
}

impl ExpressionNode {
    fn collect_calls<'n>(&'n self, calls: &mut Vec<&'n str>) {
        match self {
            ExpressionNode::Variable { .. } => {}
            ExpressionNode::Call {
                call: CallNode::Procedure { call },
                ..
            } => call.collect_calls(calls),
            ExpressionNode::Call {
                call: CallNode::Builtin { arguments, .. },
                ..
            } => arguments.iter().for_each(|argument| argument.collect_calls(calls)),
            ExpressionNode::ArrayLength { target, indexes, .. }
            | ExpressionNode::ArrayElement { target, indexes, .. } => {
                target.collect_calls(calls);
                indexes.iter().for_each(|index| index.collect_calls(calls));
            }
            ExpressionNode::Literal { value, .. } => {
                if let LiteralNode::Elements(elements) = value {
                    elements.iter().for_each(|element| element.collect_calls(calls));
                }
            }
            ExpressionNode::BinaryOp { left, right, .. } => {
                left.collect_calls(calls);
                right.collect_calls(calls);
            }
            ExpressionNode::UnaryOp { expression, .. } => expression.collect_calls(calls),
        }
    }
}

/// Build the public document from everything a translation declared
pub fn finalize(declarations: &Declarations) -> Document {
    let finalizer = Finalizer { declarations };
    Document::new(
        declarations
            .procedures
            .iter()
            .map(|procedure| finalizer.procedure(procedure))
            .collect(),
    )
}

struct Finalizer<'d> {
    declarations: &'d Declarations,
}

impl Finalizer<'_> {
    fn procedure(&self, procedure: &Procedure) -> StatementNode {
        StatementNode::Procedure {
            uuid: procedure.uuid.clone(),
            id: procedure.name.clone(),
            ty: PublishedType::from(&procedure.ty),
            parameters: procedure
                .parameters
                .iter()
                .map(|parameter| self.variable(*parameter))
                .collect(),
            body: self.block(&procedure.body),
        }
    }

    /// Declaration of a variable with its final type
    fn variable(&self, id: VariableId) -> StatementNode {
        let variable = self.declarations.variable(id);
        StatementNode::Variable {
            uuid: variable.uuid.clone(),
            id: variable.name.clone(),
            ty: PublishedType::from(&self.declarations.registry.get_type(id)),
        }
    }

    fn variable_uuid(&self, id: VariableId) -> String {
        self.declarations.variable(id).uuid.clone()
    }

    fn procedure_uuid(&self, id: ProcedureId) -> String {
        self.declarations.procedure(id).uuid.clone()
    }

    fn block(&self, statements: &[Statement]) -> Vec<StatementNode> {
        statements
            .iter()
            .map(|statement| self.statement(statement))
            .collect()
    }

    fn expressions(&self, expressions: &[Expression]) -> Vec<ExpressionNode> {
        expressions
            .iter()
            .map(|expression| self.expression(expression))
            .collect()
    }

    fn statement(&self, statement: &Statement) -> StatementNode {
        match statement {
            Statement::Variable(id) => self.variable(*id),
            Statement::Call {
                procedure,
                arguments,
            } => StatementNode::Call {
                target: CallTarget::Procedure {
                    procedure: self.procedure_uuid(*procedure),
                },
                arguments: self.expressions(arguments),
            },
            Statement::BuiltinCall { builtin, arguments } => StatementNode::Call {
                target: CallTarget::Builtin {
                    builtin: builtin.clone(),
                },
                arguments: self.expressions(arguments),
            },
            Statement::Return { expression } => StatementNode::Return {
                expression: expression.as_ref().map(|expression| self.expression(expression)),
            },
            Statement::Assignment {
                variable,
                expression,
            } => StatementNode::Assignment {
                variable: self.variable_uuid(*variable),
                expression: self.expression(expression),
            },
            Statement::ArrayAssignment {
                target,
                indexes,
                expression,
            } => StatementNode::ArrayAssignment {
                target: self.variable_uuid(*target),
                indexes: self.expressions(indexes),
                expression: self.expression(expression),
            },
            Statement::Selection {
                guard,
                body,
                alternative,
            } => StatementNode::Selection {
                guard: self.expression(guard),
                body: self.block(body),
                alternative: self.block(alternative),
            },
            Statement::Loop { guard, body } => StatementNode::Loop {
                guard: self.expression(guard),
                body: self.block(body),
            },
            Statement::Break => StatementNode::Break,
            Statement::Continue => StatementNode::Continue,
        }
    }

    fn expression(&self, expression: &Expression) -> ExpressionNode {
        let ty = PublishedType::from(&expression.ty());
        match expression {
            Expression::Variable { variable, .. } => ExpressionNode::Variable {
                reference: Reference::Variable {
                    variable: self.variable_uuid(*variable),
                },
                ty,
            },
            Expression::BuiltinVariable { name, .. } => ExpressionNode::Variable {
                reference: Reference::Builtin {
                    builtin: name.clone(),
                },
                ty,
            },
            Expression::Call {
                procedure,
                arguments,
                ..
            } => ExpressionNode::Call {
                call: CallNode::Procedure {
                    call: Box::new(StatementNode::Call {
                        target: CallTarget::Procedure {
                            procedure: self.procedure_uuid(*procedure),
                        },
                        arguments: self.expressions(arguments),
                    }),
                },
                ty,
            },
            Expression::BuiltinCall {
                builtin, arguments, ..
            } => ExpressionNode::Call {
                call: CallNode::Builtin {
                    builtin: builtin.clone(),
                    arguments: self.expressions(arguments),
                },
                ty,
            },
            Expression::ArrayLength { target } => ExpressionNode::ArrayLength {
                target: Box::new(self.expression(target)),
                indexes: vec![],
                ty,
            },
            Expression::ArrayElement { target, index, .. } => ExpressionNode::ArrayElement {
                target: Box::new(self.expression(target)),
                indexes: vec![self.expression(index)],
                ty,
            },
            Expression::Literal { value, .. } => ExpressionNode::Literal {
                ty,
                value: match value {
                    LiteralValue::Scalar(constant) => LiteralNode::Scalar(constant.clone()),
                    LiteralValue::Elements(elements) => LiteralNode::Elements(self.expressions(elements)),
                },
            },
            Expression::BinaryOp {
                op, left, right, ..
            } => ExpressionNode::BinaryOp {
                op: op.name(),
                left: Box::new(self.expression(left)),
                right: Box::new(self.expression(right)),
                ty,
            },
            Expression::UnaryOp { op, operand, .. } => ExpressionNode::UnaryOp {
                op: op.name(),
                expression: Box::new(self.expression(operand)),
                ty,
            },
        }
    }
}
