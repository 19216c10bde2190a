// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Translates source expressions to typed IR expressions
//!
//! Single responsibility: one source expression in, one IR expression out, with
//! names resolved through the symbol table and the result type computed.

use crate::data::declarations::VariableId;
use crate::data::expressions::{BinOp, Expression, UnOp};
use crate::data::types::Type;
use crate::diagnostics::{require_kind, Diagnostic, Result};
use crate::syntax::{
    BoolOperator, ComparisonOperator, Constant, Expr, ExprContext, ExprKind, Keyword, Located,
    Operator, UnaryOperator,
};
use crate::translation::builtins;
use crate::translation::symbols::SymbolTable;
use itertools::Itertools;

pub struct ExpressionTranslator<'a> {
    symbols: &'a mut SymbolTable,
}

impl<'a> ExpressionTranslator<'a> {
    pub fn new(symbols: &'a mut SymbolTable) -> Self {
        Self { symbols }
    }

    pub fn translate(&mut self, expr: &Expr) -> Result<Expression> {
        match &expr.kind {
            ExprKind::Name { id, ctx } => self.translate_name(expr, id, *ctx),

            ExprKind::Constant { value } | ExprKind::NameConstant { value } | ExprKind::Num { n: value } => {
                Ok(literal(value.clone()))
            }
            ExprKind::Str { s } => Ok(literal(Constant::Str(s.clone()))),

            ExprKind::List { elts, .. } | ExprKind::Tuple { elts, .. } => self.translate_aggregate(expr, elts),

            ExprKind::BinOp { left, op, right } => {
                let op = binary_operator(expr, *op)?;
                let left = self.translate(left)?;
                let right = self.translate(right)?;
                let ty = Type::of_binary(op, &left.ty(), &right.ty());
                Ok(Expression::binary(op, left, right, ty))
            }

            ExprKind::BoolOp { op, values } => {
                let op = match op {
                    BoolOperator::And => BinOp::And,
                    BoolOperator::Or => BinOp::Or,
                };
                let values = values
                    .iter()
                    .map(|value| self.translate(value))
                    .collect::<Result<Vec<_>>>()?;
                right_fold(op, values)
                    .ok_or_else(|| Diagnostic::structural(expr, "Expected at least two operands"))
            }

            ExprKind::Compare {
                left,
                ops,
                comparators,
            } => self.translate_compare(expr, left, ops, comparators),

            ExprKind::UnaryOp { op, operand } => {
                let operand = self.translate(operand)?;
                let op = match op {
                    UnaryOperator::UAdd => return Ok(operand),
                    UnaryOperator::Not => UnOp::Not,
                    UnaryOperator::USub => UnOp::Neg,
                    UnaryOperator::Invert => {
                        return Err(Diagnostic::unsupported_construct(
                            expr,
                            format!("operation '{}'", op.name()),
                        ))
                    }
                };
                let ty = operand.ty();
                Ok(Expression::unary(op, operand, ty))
            }

            ExprKind::Call {
                func,
                args,
                keywords,
            } => self.translate_call(expr, func, args, keywords),

            ExprKind::Subscript { value, slice, .. } => self.translate_subscript(value, slice),

            ExprKind::Attribute { attr, .. } => Err(Diagnostic::unsupported_construct(
                expr,
                format!("attribute access '.{}'", attr),
            )),

            _ => Err(Diagnostic::unsupported(expr)),
        }
    }

    fn translate_name(&mut self, expr: &Expr, name: &str, ctx: ExprContext) -> Result<Expression> {
        let search_enclosing = ctx != ExprContext::Store;
        if let Some(variable) = self.symbols.lookup_as_variable(expr, name, search_enclosing)? {
            return Ok(self.read(variable));
        }
        match builtins::variable_type(name) {
            Some(ty) => Ok(Expression::builtin_variable(name, ty)),
            None => Err(Diagnostic::missing_name(expr, name)),
        }
    }

    /// Variable reference carrying the variable's currently known type
    pub fn read(&self, variable: VariableId) -> Expression {
        Expression::variable(variable, self.symbols.type_of_variable(variable))
    }

    fn translate_aggregate(&mut self, expr: &Expr, elements: &[Expr]) -> Result<Expression> {
        let elements = elements
            .iter()
            .map(|element| self.translate(element))
            .collect::<Result<Vec<_>>>()?;
        let types: Vec<Type> = elements.iter().map(Expression::ty).collect();
        let element_type = Type::unify_all(&types).map_err(|(existing, conflicting)| {
            Diagnostic::unsupported_construct(
                expr,
                format!("multiple types for array elements ({}, {})", existing, conflicting),
            )
        })?;
        Ok(Expression::aggregate(elements, element_type))
    }

    /// `a < b < c` becomes `and(smaller(a, b), smaller(b, c))`; the shared operand
    /// is the same IR node cloned into both comparisons.
    fn translate_compare(
        &mut self,
        expr: &Expr,
        left: &Expr,
        ops: &[ComparisonOperator],
        comparators: &[Expr],
    ) -> Result<Expression> {
        if ops.len() != comparators.len() {
            return Err(Diagnostic::structural(
                expr,
                format!("Expected {} comparators, got {}", ops.len(), comparators.len()),
            ));
        }
        let ops = ops
            .iter()
            .map(|op| comparison_operator(expr, *op))
            .collect::<Result<Vec<_>>>()?;
        let operands = std::iter::once(left)
            .chain(comparators)
            .map(|operand| self.translate(operand))
            .collect::<Result<Vec<_>>>()?;

        let comparisons = operands
            .into_iter()
            .tuple_windows()
            .zip(ops)
            .map(|((left, right), op)| Expression::binary(op, left, right, Type::Boolean))
            .collect();
        right_fold(BinOp::And, comparisons)
            .ok_or_else(|| Diagnostic::structural(expr, "Expected at least one comparison"))
    }

    fn translate_call(&mut self, expr: &Expr, func: &Expr, args: &[Expr], keywords: &[Keyword]) -> Result<Expression> {
        if !keywords.is_empty() {
            return Err(Diagnostic::unsupported_construct(expr, "keyword arguments"));
        }
        match &func.kind {
            ExprKind::Name { id, .. } => {
                let arguments = self.translate_arguments(args)?;
                let argument_types: Vec<Type> = arguments.iter().map(Expression::ty).collect();
                if let Some(procedure) = self.symbols.lookup_as_procedure(func, id, true, &argument_types)? {
                    let ty = self.symbols.procedure(procedure).ty.clone();
                    return Ok(Expression::call(procedure, arguments, ty));
                }
                self.translate_builtin_call(expr, func, id, arguments)
            }
            ExprKind::Attribute { value, attr, .. } if attr == builtins::APPEND => {
                self.translate_append(expr, value, args)
            }
            ExprKind::Attribute { attr, .. } => Err(Diagnostic::unsupported_construct(
                expr,
                format!("method call '.{}'", attr),
            )),
            _ => Err(Diagnostic::unsupported_construct(
                expr,
                format!("call of '{}'", func.kind_name()),
            )),
        }
    }

    fn translate_arguments(&mut self, args: &[Expr]) -> Result<Vec<Expression>> {
        args.iter().map(|arg| self.translate(arg)).collect()
    }

    fn translate_builtin_call(
        &mut self,
        expr: &Expr,
        func: &Expr,
        name: &str,
        mut arguments: Vec<Expression>,
    ) -> Result<Expression> {
        if name == builtins::LEN {
            return match arguments.pop() {
                Some(target) if arguments.is_empty() => Ok(Expression::array_length(target)),
                _ => Err(Diagnostic::structural(expr, "Expected exactly one argument")),
            };
        }
        if !builtins::is_function(name) {
            return Err(Diagnostic::missing_name(func, name));
        }
        let ty = builtins::return_type(expr, name, &arguments)?;
        Ok(Expression::builtin_call(name, arguments, ty))
    }

    /// `xs.append(v)` grows `xs`, which therefore must hold elements of `v`'s type
    fn translate_append(&mut self, expr: &Expr, target: &Expr, args: &[Expr]) -> Result<Expression> {
        let [value] = args else {
            return Err(Diagnostic::structural(expr, "Expected exactly one argument"));
        };
        let variable = self.resolve_array(target)?;
        let value = self.translate(value)?;
        self.symbols
            .constrain_variable_type(expr, variable, &Type::array_of(value.ty()))?;
        Ok(Expression::builtin_call(
            builtins::APPEND,
            vec![self.read(variable), value],
            Type::Void,
        ))
    }

    /// Resolve the base name of an array write. Builtin names are not assignable.
    pub fn resolve_array(&mut self, base: &Expr) -> Result<VariableId> {
        require_kind(base, &["Name"])?;
        let name = base.identifier().unwrap_or_default();
        if let Some(variable) = self.symbols.lookup_as_variable(base, name, true)? {
            return Ok(variable);
        }
        if builtins::variable_type(name).is_some() {
            return Err(Diagnostic::unsupported_construct(
                base,
                format!("assignment to builtin '{}'", name),
            ));
        }
        Err(Diagnostic::missing_name(base, name))
    }

    /// Index of a subscript, with the legacy `Index` wrapper removed
    pub fn translate_index(&mut self, slice: &Expr) -> Result<Expression> {
        match &slice.kind {
            ExprKind::Index { value } => self.translate(value),
            ExprKind::Slice { .. } | ExprKind::ExtSlice {} => {
                Err(Diagnostic::unsupported_construct(slice, "slice as array index"))
            }
            _ => self.translate(slice),
        }
    }

    fn translate_subscript(&mut self, base: &Expr, slice: &Expr) -> Result<Expression> {
        require_kind(base, &["Name"])?;
        let target = self.translate(base)?;
        if let ExprKind::Slice { lower, upper, step } = &slice.kind {
            // `xs[:]` reads the whole array
            if lower.is_none() && upper.is_none() && step.is_none() {
                return Ok(target);
            }
            return Err(Diagnostic::unsupported_construct(slice, "slice with bounds"));
        }
        let index = self.translate_index(slice)?;
        let ty = target.ty().element();
        Ok(Expression::array_element(target, index, ty))
    }
}

fn literal(value: Constant) -> Expression {
    let ty = match &value {
        Constant::Null => Type::Unknown,
        Constant::Bool(_) => Type::Boolean,
        Constant::Int(_) => Type::Int,
        Constant::Float(_) => Type::Double,
        Constant::Str(_) => Type::String,
    };
    Expression::literal(value, ty)
}

/// `[a, b, c]` folded as `op(a, op(b, c))`
fn right_fold(op: BinOp, operands: Vec<Expression>) -> Option<Expression> {
    operands
        .into_iter()
        .rev()
        .reduce(|right, left| Expression::binary(op, left, right, Type::Boolean))
}

pub fn binary_operator(node: &impl Located, op: Operator) -> Result<BinOp> {
    match op {
        Operator::Add => Ok(BinOp::Add),
        Operator::Sub => Ok(BinOp::Sub),
        Operator::Mult => Ok(BinOp::Mul),
        Operator::Div => Ok(BinOp::Div),
        Operator::FloorDiv => Ok(BinOp::IntDiv),
        Operator::Mod => Ok(BinOp::Mod),
        Operator::Pow => Ok(BinOp::Pow),
        _ => Err(Diagnostic::unsupported_construct(
            node,
            format!("operation '{}'", op.name()),
        )),
    }
}

fn comparison_operator(node: &impl Located, op: ComparisonOperator) -> Result<BinOp> {
    match op {
        ComparisonOperator::Eq => Ok(BinOp::Equal),
        ComparisonOperator::NotEq => Ok(BinOp::Different),
        ComparisonOperator::Gt => Ok(BinOp::Greater),
        ComparisonOperator::GtE => Ok(BinOp::GreaterEq),
        ComparisonOperator::Lt => Ok(BinOp::Smaller),
        ComparisonOperator::LtE => Ok(BinOp::SmallerEq),
        _ => Err(Diagnostic::unsupported_construct(
            node,
            format!("operation '{}'", op.name()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::expressions::LiteralValue;
    use crate::data::naming::SequentialIds;
    use serde_json::json;

    fn expr(value: serde_json::Value) -> Expr {
        serde_json::from_value(value).unwrap()
    }

    fn name(id: &str) -> serde_json::Value {
        json!({ "_type": "Name", "id": id, "ctx": { "_type": "Load" } })
    }

    fn int(n: i64) -> serde_json::Value {
        json!({ "_type": "Constant", "value": n })
    }

    fn symbols() -> SymbolTable {
        SymbolTable::new(Box::new(SequentialIds::new()))
    }

    #[test]
    fn test_literals_are_typed() {
        let mut symbols = symbols();
        let mut translator = ExpressionTranslator::new(&mut symbols);
        let cases = [
            (json!({ "_type": "Constant", "value": 2.5 }), Type::Double),
            (json!({ "_type": "Constant", "value": true }), Type::Boolean),
            (json!({ "_type": "Constant", "value": null }), Type::Unknown),
            (json!({ "_type": "Str", "s": "x" }), Type::String),
            (json!({ "_type": "Num", "n": 7 }), Type::Int),
        ];
        for (node, ty) in cases {
            assert_eq!(translator.translate(&expr(node)).unwrap().ty(), ty);
        }
    }

    #[test]
    fn test_aggregate_elements_must_agree() {
        let mut symbols = symbols();
        let mut translator = ExpressionTranslator::new(&mut symbols);

        let list = translator
            .translate(&expr(json!({ "_type": "List", "elts": [int(1), int(2)] })))
            .unwrap();
        assert_eq!(list.ty(), Type::array_of(Type::Int));
        assert!(matches!(list, Expression::Literal { value: LiteralValue::Elements(ref e), .. } if e.len() == 2));

        let mixed = expr(json!({
            "_type": "Tuple", "lineno": 3,
            "elts": [int(1), { "_type": "Constant", "value": "a" }]
        }));
        assert_eq!(
            translator.translate(&mixed).unwrap_err().to_string(),
            "Unsupported multiple types for array elements (int, string) at line 3"
        );
    }

    #[test]
    fn test_arithmetic_types() {
        let mut symbols = symbols();
        let mut translator = ExpressionTranslator::new(&mut symbols);
        let floor = expr(json!({
            "_type": "BinOp", "left": int(7), "op": { "_type": "FloorDiv" }, "right": int(2)
        }));
        let translated = translator.translate(&floor).unwrap();
        assert!(matches!(translated, Expression::BinaryOp { op: BinOp::IntDiv, .. }));
        assert_eq!(translated.ty(), Type::Int);

        let bitwise = expr(json!({
            "_type": "BinOp", "lineno": 2, "left": int(7), "op": { "_type": "BitOr" }, "right": int(2)
        }));
        assert_eq!(
            translator.translate(&bitwise).unwrap_err().to_string(),
            "Unsupported operation 'BitOr' at line 2"
        );
    }

    #[test]
    fn test_chained_comparison_shares_middle_operand() {
        let mut symbols = symbols();
        let b = symbols.declare_variable("b", Some(Type::Int), None, None);
        let mut translator = ExpressionTranslator::new(&mut symbols);
        let chain = expr(json!({
            "_type": "Compare",
            "left": int(1),
            "ops": [{ "_type": "Lt" }, { "_type": "LtE" }],
            "comparators": [name("b"), int(3)]
        }));

        let Expression::BinaryOp { op: BinOp::And, left, right, ty } = translator.translate(&chain).unwrap() else {
            panic!("expected a conjunction");
        };
        assert_eq!(ty, Type::Boolean);
        let Expression::BinaryOp { op: BinOp::Smaller, right: first_b, .. } = *left else {
            panic!("expected smaller");
        };
        let Expression::BinaryOp { op: BinOp::SmallerEq, left: second_b, .. } = *right else {
            panic!("expected smaller_eq");
        };
        assert_eq!(first_b.variable_id(), Some(b));
        assert_eq!(second_b.variable_id(), Some(b));
    }

    #[test]
    fn test_bool_op_folds_right() {
        let mut symbols = symbols();
        let mut translator = ExpressionTranslator::new(&mut symbols);
        let truth = json!({ "_type": "Constant", "value": true });
        let node = expr(json!({
            "_type": "BoolOp", "op": { "_type": "Or" }, "values": [truth, truth, truth]
        }));
        let Expression::BinaryOp { op: BinOp::Or, left, right, .. } = translator.translate(&node).unwrap() else {
            panic!("expected a disjunction");
        };
        assert!(matches!(*left, Expression::Literal { .. }));
        assert!(matches!(*right, Expression::BinaryOp { op: BinOp::Or, .. }));
    }

    #[test]
    fn test_names_resolve_to_variables_or_builtins() {
        let mut symbols = symbols();
        let x = symbols.declare_variable("x", Some(Type::String), None, None);
        let mut translator = ExpressionTranslator::new(&mut symbols);

        assert_eq!(
            translator.translate(&expr(name("x"))).unwrap(),
            Expression::variable(x, Type::String)
        );
        assert_eq!(
            translator.translate(&expr(name("__name__"))).unwrap(),
            Expression::builtin_variable("__name__", Type::String)
        );
        let missing = translator
            .translate(&expr(json!({ "_type": "Name", "id": "y", "lineno": 9 })))
            .unwrap_err();
        assert!(missing.is_missing_name());
        assert_eq!(missing.line(), 9);
    }

    #[test]
    fn test_builtin_calls() {
        let mut symbols = symbols();
        let xs = symbols.declare_variable("xs", Some(Type::array_of(Type::Double)), None, None);
        let mut translator = ExpressionTranslator::new(&mut symbols);

        let len = expr(json!({ "_type": "Call", "func": name("len"), "args": [name("xs")] }));
        assert_eq!(
            translator.translate(&len).unwrap(),
            Expression::array_length(Expression::variable(xs, Type::array_of(Type::Double)))
        );

        let len_of_two = expr(json!({ "_type": "Call", "func": name("len"), "args": [name("xs"), name("xs")] }));
        assert_eq!(
            translator.translate(&len_of_two).unwrap_err().to_string(),
            "Expected exactly one argument at line 0"
        );

        let max = expr(json!({ "_type": "Call", "func": name("max"), "args": [name("xs")] }));
        assert_eq!(translator.translate(&max).unwrap().ty(), Type::Double);

        let mixed = expr(json!({
            "_type": "Call", "lineno": 5, "func": name("max"),
            "args": [int(1), { "_type": "Constant", "value": 2.5 }]
        }));
        assert_eq!(
            translator.translate(&mixed).unwrap_err().to_string(),
            "Unsupported multiple types for arguments of 'max' (int, double) at line 5"
        );

        let unknown = expr(json!({ "_type": "Call", "func": name("frobnicate"), "args": [] }));
        assert!(translator.translate(&unknown).unwrap_err().is_missing_name());

        let keywords = expr(json!({
            "_type": "Call", "func": name("sorted"), "args": [name("xs")],
            "keywords": [{ "_type": "keyword", "arg": "reverse" }]
        }));
        assert!(matches!(
            translator.translate(&keywords),
            Err(Diagnostic::Unsupported { .. })
        ));
    }

    #[test]
    fn test_append_widens_unknown_array() {
        let mut symbols = symbols();
        let xs = symbols.declare_variable("xs", Some(Type::array_of(Type::Unknown)), None, None);
        let mut translator = ExpressionTranslator::new(&mut symbols);
        let append = expr(json!({
            "_type": "Call",
            "func": { "_type": "Attribute", "value": name("xs"), "attr": "append" },
            "args": [int(4)]
        }));

        let translated = translator.translate(&append).unwrap();
        assert!(matches!(translated, Expression::BuiltinCall { ref builtin, .. } if builtin == "append"));
        assert_eq!(symbols.type_of_variable(xs), Type::array_of(Type::Int));
    }

    #[test]
    fn test_subscripts() {
        let mut symbols = symbols();
        let xs = symbols.declare_variable("xs", Some(Type::array_of(Type::Int)), None, None);
        let mut translator = ExpressionTranslator::new(&mut symbols);

        let element = expr(json!({
            "_type": "Subscript", "value": name("xs"), "slice": { "_type": "Index", "value": int(0) }
        }));
        assert_eq!(translator.translate(&element).unwrap().ty(), Type::Int);

        let whole = expr(json!({ "_type": "Subscript", "value": name("xs"), "slice": { "_type": "Slice" } }));
        assert_eq!(translator.translate(&whole).unwrap().variable_id(), Some(xs));

        let bounded = expr(json!({
            "_type": "Subscript", "value": name("xs"), "slice": { "_type": "Slice", "lower": int(1) }
        }));
        assert!(matches!(translator.translate(&bounded), Err(Diagnostic::Unsupported { .. })));

        let chained = expr(json!({
            "_type": "Subscript", "value": element_json(), "slice": int(0)
        }));
        assert!(matches!(translator.translate(&chained), Err(Diagnostic::Structural { .. })));
    }

    fn element_json() -> serde_json::Value {
        json!({ "_type": "Subscript", "value": name("xs"), "slice": int(0) })
    }
}
