// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Type lattice for the pseudocode IR
//!
//! `Unknown` sits below every concrete type. Two distinct concrete types never
//! unify; there is no implicit widening between numeric types.

use crate::data::expressions::BinOp;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Type {
    #[default]
    Unknown,
    Void,
    Boolean,
    Int,
    Double,
    String,
    /// Meta-type of builtin type names such as `int`
    Type,
    Array(Box<Type>),
}

impl Type {
    pub fn array_of(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    /// Element type of an array, `Unknown` for anything else
    pub fn element(&self) -> Type {
        match self {
            Type::Array(element) => (**element).clone(),
            _ => Type::Unknown,
        }
    }

    /// Least upper bound in the lattice, `None` on a conflict.
    pub fn unify(&self, other: &Type) -> Option<Type> {
        match (self, other) {
            (Type::Unknown, ty) | (ty, Type::Unknown) => Some(ty.clone()),
            (Type::Array(a), Type::Array(b)) => a.unify(b).map(Type::array_of),
            (a, b) if a == b => Some(a.clone()),
            _ => None,
        }
    }

    /// Unify a sequence of candidates, stopping at the first conflicting pair.
    /// On conflict returns the accumulated type and the candidate that broke it.
    pub fn unify_all<'a>(
        candidates: impl IntoIterator<Item = &'a Type>,
    ) -> Result<Type, (Type, Type)> {
        candidates
            .into_iter()
            .try_fold(Type::Unknown, |acc, ty| acc.unify(ty).ok_or_else(|| (acc, ty.clone())))
    }

    /// Result type of a binary operator applied to operands of the given types.
    pub fn of_binary(op: BinOp, left: &Type, right: &Type) -> Type {
        if op.is_comparison() || op.is_logical() {
            return Type::Boolean;
        }
        if *left == Type::String || *right == Type::String {
            Type::String
        } else if op == BinOp::Div || *left == Type::Double || *right == Type::Double {
            Type::Double
        } else if *left == Type::Int || *right == Type::Int {
            Type::Int
        } else {
            Type::Unknown
        }
    }

    /// Base name and array flag as published in the document.
    /// Only the outermost array level is split off.
    pub fn published(&self) -> (String, bool) {
        match self {
            Type::Array(element) => (element.to_string(), true),
            ty => (ty.to_string(), false),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Type::Unknown => write!(f, "unknown"),
            Type::Void => write!(f, "void"),
            Type::Boolean => write!(f, "boolean"),
            Type::Int => write!(f, "int"),
            Type::Double => write!(f, "double"),
            Type::String => write!(f, "string"),
            Type::Type => write!(f, "type"),
            Type::Array(element) => write!(f, "{}[]", element),
        }
    }
}

impl FromStr for Type {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(element) = s.strip_suffix("[]") {
            return element.parse().map(Type::array_of);
        }
        match s {
            "unknown" => Ok(Type::Unknown),
            "void" => Ok(Type::Void),
            "boolean" | "bool" => Ok(Type::Boolean),
            "int" => Ok(Type::Int),
            "double" | "float" => Ok(Type::Double),
            "string" | "str" => Ok(Type::String),
            "type" => Ok(Type::Type),
            other => Err(format!("unknown type name '{}'", other)),
        }
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
