// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Builtin names known to the translator

use crate::data::expressions::Expression;
use crate::data::types::Type;
use crate::diagnostics::{Diagnostic, Result};
use crate::syntax::{Constant, Expr, ExprKind, Located};

pub const BUILTIN_FUNCTIONS: &[&str] = &[
    "abs", "all", "any", "ascii", "bin", "bool", "breakpoint", "bytearray", "bytes",
    "callable", "chr", "classmethod", "compile", "complex", "delattr", "dict", "dir",
    "divmod", "enumerate", "eval", "exec", "filter", "float", "format", "frozenset",
    "getattr", "globals", "hasattr", "hash", "help", "hex", "id", "input", "int",
    "isinstance", "issubclass", "iter", "len", "list", "locals", "map", "max",
    "memoryview", "min", "next", "object", "oct", "open", "ord", "pow", "print",
    "property", "range", "repr", "reversed", "round", "set", "setattr", "slice",
    "sorted", "staticmethod", "str", "sum", "super", "tuple", "type", "vars", "zip",
    "__import__",
];

/// Builtins dropped when used as a bare statement
pub const IGNORED_STATEMENT_BUILTINS: &[&str] = &["print"];

/// The single method shape accepted on arrays
pub const APPEND: &str = "append";

pub const LEN: &str = "len";

pub const RANGE: &str = "range";

pub fn is_function(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

pub fn is_ignored_statement(name: &str) -> bool {
    IGNORED_STATEMENT_BUILTINS.contains(&name)
}

/// Type of a builtin identifier read as a value
pub fn variable_type(name: &str) -> Option<Type> {
    match name {
        "int" | "float" | "str" | "bool" | "list" => Some(Type::Type),
        "__name__" | "__file__" => Some(Type::String),
        _ => None,
    }
}

/// Result type of a builtin call given its translated arguments
pub fn return_type(call: &Expr, name: &str, arguments: &[Expression]) -> Result<Type> {
    let first = arguments.first().map(Expression::ty).unwrap_or_default();
    let ty = match name {
        "round" if arguments.len() > 1 => Type::Double,
        "len" | "int" | "round" | "ord" | "hash" | "id" => Type::Int,
        "float" => Type::Double,
        "str" | "chr" | "input" | "repr" | "ascii" | "bin" | "hex" | "oct" | "format" => {
            Type::String
        }
        "bool" | "all" | "any" | "callable" | "isinstance" | "issubclass" | "hasattr" => {
            Type::Boolean
        }
        "print" => Type::Void,
        "range" => Type::array_of(Type::Int),
        "abs" => first,
        "min" | "max" if arguments.len() == 1 => first.element(),
        "min" | "max" => {
            let types: Vec<Type> = arguments.iter().map(Expression::ty).collect();
            Type::unify_all(&types).map_err(|(existing, conflicting)| {
                Diagnostic::unsupported_construct(
                    call,
                    format!(
                        "multiple types for arguments of '{}' ({}, {})",
                        name, existing, conflicting
                    ),
                )
            })?
        }
        "sum" => first.element(),
        "sorted" | "reversed" | "list" => Type::array_of(first.element()),
        _ => Type::Unknown,
    };
    Ok(ty)
}

/// Explicit type named by a parameter, return or assignment annotation
pub fn annotation_type(annotation: &Expr) -> Result<Type> {
    match &annotation.kind {
        ExprKind::Name { id, .. } => match id.as_str() {
            "int" => Ok(Type::Int),
            "float" => Ok(Type::Double),
            "str" => Ok(Type::String),
            "bool" => Ok(Type::Boolean),
            "list" | "List" => Ok(Type::array_of(Type::Unknown)),
            other => Err(Diagnostic::unsupported_construct(
                annotation,
                format!("type annotation '{}'", other),
            )),
        },
        ExprKind::Constant { value: Constant::Null } | ExprKind::NameConstant { value: Constant::Null } => {
            Ok(Type::Void)
        }
        ExprKind::Subscript { value, slice, .. }
            if matches!(value.identifier(), Some("list" | "List")) =>
        {
            let element = match &slice.kind {
                ExprKind::Index { value } => value.as_ref(),
                _ => slice.as_ref(),
            };
            annotation_type(element).map(Type::array_of)
        }
        _ => Err(Diagnostic::unsupported_construct(
            annotation,
            format!("type annotation of kind '{}'", annotation.kind_name()),
        )),
    }
}
