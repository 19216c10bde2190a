// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Source syntax tree
//!
//! The tree is produced by an external parser and read here as JSON in the shape
//! of a Python `ast` dump: every node is an object whose `_type` field carries the
//! grammar label, plus an optional `lineno`. Fields the translator never reads
//! are ignored.

use serde::{Deserialize, Serialize};

/// Anything that can be blamed in a diagnostic.
pub trait Located {
    /// Source line, 0 if unavailable
    fn line(&self) -> u32;

    /// Grammar label of the node
    fn kind_name(&self) -> &'static str;
}

/// Declares a field-less grammar enum together with its label lookup.
macro_rules! grammar_labels {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
        #[serde(tag = "_type")]
        $vis enum $name {
            $($variant),*
        }

        impl $name {
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

grammar_labels! {
    /// Arithmetic and bitwise operators of `BinOp` and `AugAssign`
    pub enum Operator {
        Add, Sub, Mult, MatMult, Div, Mod, Pow, LShift, RShift, BitOr, BitXor, BitAnd, FloorDiv,
    }
}

grammar_labels! {
    pub enum BoolOperator { And, Or }
}

grammar_labels! {
    pub enum UnaryOperator { Invert, Not, UAdd, USub }
}

grammar_labels! {
    pub enum ComparisonOperator { Eq, NotEq, Lt, LtE, Gt, GtE, Is, IsNot, In, NotIn }
}

grammar_labels! {
    /// Whether a name is read, written or deleted
    pub enum ExprContext { Load, Store, Del }
}

impl Default for ExprContext {
    fn default() -> Self {
        ExprContext::Load
    }
}

/// Scalar literal value
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Constant {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

// ============================================================================
// Module
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "_type")]
pub enum Mod {
    Module { body: Vec<Stmt> },
    Interactive { body: Vec<Stmt> },
    Expression { body: Box<Expr> },
    FunctionType {},
}

impl Mod {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

impl Located for Mod {
    fn line(&self) -> u32 {
        0
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Mod::Module { .. } => "Module",
            Mod::Interactive { .. } => "Interactive",
            Mod::Expression { .. } => "Expression",
            Mod::FunctionType {} => "FunctionType",
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Stmt {
    #[serde(flatten)]
    pub kind: StmtKind,
    #[serde(default)]
    pub lineno: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "_type")]
pub enum StmtKind {
    FunctionDef {
        name: String,
        args: Arguments,
        body: Vec<Stmt>,
        #[serde(default)]
        decorator_list: Vec<Expr>,
        #[serde(default)]
        returns: Option<Expr>,
    },
    AsyncFunctionDef {},
    ClassDef {},
    Return {
        #[serde(default)]
        value: Option<Expr>,
    },
    Delete {},
    Assign {
        targets: Vec<Expr>,
        value: Expr,
    },
    AugAssign {
        target: Expr,
        op: Operator,
        value: Expr,
    },
    AnnAssign {
        target: Expr,
        annotation: Expr,
        #[serde(default)]
        value: Option<Expr>,
    },
    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    AsyncFor {},
    While {
        test: Expr,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    If {
        test: Expr,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    With {},
    AsyncWith {},
    Match {},
    Raise {
        #[serde(default)]
        exc: Option<Expr>,
    },
    Try {},
    TryStar {},
    Assert {},
    Import {},
    ImportFrom {},
    Global {},
    Nonlocal {},
    Expr {
        value: Expr,
    },
    Pass {},
    Break {},
    Continue {},
}

/// Parameter list of a function definition
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    pub posonlyargs: Vec<Arg>,
    #[serde(default)]
    pub args: Vec<Arg>,
    #[serde(default)]
    pub vararg: Option<Arg>,
    #[serde(default)]
    pub kwonlyargs: Vec<Arg>,
    #[serde(default)]
    pub kwarg: Option<Arg>,
    #[serde(default)]
    pub defaults: Vec<Expr>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Arg {
    pub arg: String,
    #[serde(default)]
    pub annotation: Option<Expr>,
    #[serde(default)]
    pub lineno: u32,
}

impl Located for Arg {
    fn line(&self) -> u32 {
        self.lineno
    }

    fn kind_name(&self) -> &'static str {
        "arg"
    }
}

impl Located for Stmt {
    fn line(&self) -> u32 {
        self.lineno
    }

    fn kind_name(&self) -> &'static str {
        match &self.kind {
            StmtKind::FunctionDef { .. } => "FunctionDef",
            StmtKind::AsyncFunctionDef {} => "AsyncFunctionDef",
            StmtKind::ClassDef {} => "ClassDef",
            StmtKind::Return { .. } => "Return",
            StmtKind::Delete {} => "Delete",
            StmtKind::Assign { .. } => "Assign",
            StmtKind::AugAssign { .. } => "AugAssign",
            StmtKind::AnnAssign { .. } => "AnnAssign",
            StmtKind::For { .. } => "For",
            StmtKind::AsyncFor {} => "AsyncFor",
            StmtKind::While { .. } => "While",
            StmtKind::If { .. } => "If",
            StmtKind::With {} => "With",
            StmtKind::AsyncWith {} => "AsyncWith",
            StmtKind::Match {} => "Match",
            StmtKind::Raise { .. } => "Raise",
            StmtKind::Try {} => "Try",
            StmtKind::TryStar {} => "TryStar",
            StmtKind::Assert {} => "Assert",
            StmtKind::Import {} => "Import",
            StmtKind::ImportFrom {} => "ImportFrom",
            StmtKind::Global {} => "Global",
            StmtKind::Nonlocal {} => "Nonlocal",
            StmtKind::Expr { .. } => "Expr",
            StmtKind::Pass {} => "Pass",
            StmtKind::Break {} => "Break",
            StmtKind::Continue {} => "Continue",
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Expr {
    #[serde(flatten)]
    pub kind: ExprKind,
    #[serde(default)]
    pub lineno: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "_type")]
pub enum ExprKind {
    BoolOp {
        op: BoolOperator,
        values: Vec<Expr>,
    },
    NamedExpr {},
    BinOp {
        left: Box<Expr>,
        op: Operator,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    Lambda {},
    IfExp {},
    Dict {},
    Set {},
    ListComp {},
    SetComp {},
    DictComp {},
    GeneratorExp {},
    Await {},
    Yield {},
    YieldFrom {},
    Compare {
        left: Box<Expr>,
        ops: Vec<ComparisonOperator>,
        comparators: Vec<Expr>,
    },
    Call {
        func: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
        #[serde(default)]
        keywords: Vec<Keyword>,
    },
    FormattedValue {},
    JoinedStr {},
    Constant {
        #[serde(default)]
        value: Constant,
    },
    Num {
        n: Constant,
    },
    Str {
        s: String,
    },
    NameConstant {
        #[serde(default)]
        value: Constant,
    },
    Bytes {},
    Ellipsis {},
    Attribute {
        value: Box<Expr>,
        attr: String,
        #[serde(default)]
        ctx: ExprContext,
    },
    Subscript {
        value: Box<Expr>,
        slice: Box<Expr>,
        #[serde(default)]
        ctx: ExprContext,
    },
    Starred {},
    Name {
        id: String,
        #[serde(default)]
        ctx: ExprContext,
    },
    List {
        elts: Vec<Expr>,
        #[serde(default)]
        ctx: ExprContext,
    },
    Tuple {
        elts: Vec<Expr>,
        #[serde(default)]
        ctx: ExprContext,
    },
    Slice {
        #[serde(default)]
        lower: Option<Box<Expr>>,
        #[serde(default)]
        upper: Option<Box<Expr>>,
        #[serde(default)]
        step: Option<Box<Expr>>,
    },
    Index {
        value: Box<Expr>,
    },
    ExtSlice {},
}

/// Keyword argument of a call; only its presence matters
#[derive(Debug, Clone, Deserialize)]
pub struct Keyword {
    #[serde(default)]
    pub arg: Option<String>,
}

impl Expr {
    /// Identifier of a `Name` node
    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Name { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Elements of a `Tuple` or `List` node
    pub fn elements(&self) -> Option<&[Expr]> {
        match &self.kind {
            ExprKind::Tuple { elts, .. } | ExprKind::List { elts, .. } => Some(elts),
            _ => None,
        }
    }
}

impl Located for Expr {
    fn line(&self) -> u32 {
        self.lineno
    }

    fn kind_name(&self) -> &'static str {
        match &self.kind {
            ExprKind::BoolOp { .. } => "BoolOp",
            ExprKind::NamedExpr {} => "NamedExpr",
            ExprKind::BinOp { .. } => "BinOp",
            ExprKind::UnaryOp { .. } => "UnaryOp",
            ExprKind::Lambda {} => "Lambda",
            ExprKind::IfExp {} => "IfExp",
            ExprKind::Dict {} => "Dict",
            ExprKind::Set {} => "Set",
            ExprKind::ListComp {} => "ListComp",
            ExprKind::SetComp {} => "SetComp",
            ExprKind::DictComp {} => "DictComp",
            ExprKind::GeneratorExp {} => "GeneratorExp",
            ExprKind::Await {} => "Await",
            ExprKind::Yield {} => "Yield",
            ExprKind::YieldFrom {} => "YieldFrom",
            ExprKind::Compare { .. } => "Compare",
            ExprKind::Call { .. } => "Call",
            ExprKind::FormattedValue {} => "FormattedValue",
            ExprKind::JoinedStr {} => "JoinedStr",
            ExprKind::Constant { .. } => "Constant",
            ExprKind::Num { .. } => "Num",
            ExprKind::Str { .. } => "Str",
            ExprKind::NameConstant { .. } => "NameConstant",
            ExprKind::Bytes {} => "Bytes",
            ExprKind::Ellipsis {} => "Ellipsis",
            ExprKind::Attribute { .. } => "Attribute",
            ExprKind::Subscript { .. } => "Subscript",
            ExprKind::Starred {} => "Starred",
            ExprKind::Name { .. } => "Name",
            ExprKind::List { .. } => "List",
            ExprKind::Tuple { .. } => "Tuple",
            ExprKind::Slice { .. } => "Slice",
            ExprKind::Index { .. } => "Index",
            ExprKind::ExtSlice {} => "ExtSlice",
        }
    }
}
