// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Translates statement sequences to IR statements
//!
//! A sequence is translated in two passes. The first pass translates every
//! statement and registers each function definition under its name without
//! touching its body. The second pass translates the deferred bodies, each in
//! its own child scope. Every procedure of a sequence is therefore visible to
//! the bodies of all of its siblings, itself included.

use crate::data::declarations::{ProcedureId, VariableId};
use crate::data::expressions::{BinOp, Expression};
use crate::data::statements::Statement;
use crate::data::types::Type;
use crate::diagnostics::{require_kind, Diagnostic, Result};
use crate::syntax::{Arguments, Constant, Expr, ExprKind, Located, Operator, Stmt, StmtKind};
use crate::translation::builtins;
use crate::translation::expression_translator::{binary_operator, ExpressionTranslator};
use crate::translation::symbols::SymbolTable;
use log::{debug, trace};

pub struct StatementTranslator<'a> {
    symbols: &'a mut SymbolTable,
}

/// Function definition registered in the first pass
struct DeferredProcedure<'s> {
    procedure: ProcedureId,
    node: &'s Stmt,
    name: &'s str,
    args: &'s Arguments,
    body: &'s [Stmt],
}

/// Statements of one sequence and the unified type of its returns
#[derive(Default)]
struct Block {
    statements: Vec<Statement>,
    returns: Type,
}

impl Block {
    fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    fn record_return(&mut self, node: &impl Located, ty: &Type) -> Result<()> {
        self.returns = self.returns.unify(ty).ok_or_else(|| {
            Diagnostic::unsupported_construct(
                node,
                format!("multiple types for return value ({}, {})", self.returns, ty),
            )
        })?;
        Ok(())
    }
}

impl<'a> StatementTranslator<'a> {
    pub fn new(symbols: &'a mut SymbolTable) -> Self {
        Self { symbols }
    }

    fn expressions(&mut self) -> ExpressionTranslator<'_> {
        ExpressionTranslator::new(self.symbols)
    }

    fn read(&self, variable: VariableId) -> Expression {
        Expression::variable(variable, self.symbols.type_of_variable(variable))
    }

    /// Translate a statement sequence. Returns the IR statements and the
    /// unification of every return type reachable in the sequence outside of
    /// nested procedure bodies.
    pub fn translate_block(&mut self, statements: &[Stmt]) -> Result<(Vec<Statement>, Type)> {
        let mut block = Block::default();
        let mut deferred = Vec::new();
        for statement in statements {
            trace!(
                "translating {} at line {}",
                statement.kind_name(),
                statement.line()
            );
            self.translate_statement(statement, &mut block, &mut deferred)?;
        }
        for procedure in deferred {
            self.translate_procedure(procedure)?;
        }
        Ok((block.statements, block.returns))
    }

    fn translate_statement<'s>(
        &mut self,
        statement: &'s Stmt,
        block: &mut Block,
        deferred: &mut Vec<DeferredProcedure<'s>>,
    ) -> Result<()> {
        match &statement.kind {
            StmtKind::FunctionDef {
                name,
                args,
                body,
                decorator_list,
                returns,
            } => {
                if let Some(decorator) = decorator_list.first() {
                    return Err(Diagnostic::unsupported_construct(
                        decorator,
                        format!("decorator on '{}'", name),
                    ));
                }
                check_parameters(statement, name, args)?;
                let explicit_type = returns.as_ref().map(builtins::annotation_type).transpose()?;
                let procedure = self.symbols.declare_procedure(Some(name.as_str()), explicit_type);
                deferred.push(DeferredProcedure {
                    procedure,
                    node: statement,
                    name,
                    args,
                    body,
                });
            }

            StmtKind::Return { value } => {
                let expression = match value {
                    Some(value) => Some(self.expressions().translate(value)?),
                    None => None,
                };
                let ty = expression.as_ref().map(Expression::ty).unwrap_or(Type::Void);
                block.record_return(statement, &ty)?;
                block.push(Statement::ret(expression));
            }

            StmtKind::Assign { targets, value } => self.translate_assign(targets, value, block)?,

            StmtKind::AugAssign { target, op, value } => {
                self.translate_aug_assign(target, *op, value, block)?
            }

            StmtKind::AnnAssign {
                target,
                annotation,
                value,
            } => {
                let ty = builtins::annotation_type(annotation)?;
                let Some(name) = target.identifier() else {
                    return Err(Diagnostic::unsupported_construct(
                        target,
                        format!("annotated assignment to '{}'", target.kind_name()),
                    ));
                };
                let variable = self.bind(target, name, &ty, block)?;
                if let Some(value) = value {
                    let expression = self.expressions().translate(value)?;
                    self.symbols
                        .constrain_variable_type(value, variable, &expression.ty())?;
                    block.push(Statement::assignment(variable, expression));
                }
            }

            StmtKind::If { test, body, orelse } => {
                let guard = self.expressions().translate(test)?;
                let (body, body_returns) = self.translate_block(body)?;
                let (alternative, alternative_returns) = self.translate_block(orelse)?;
                block.record_return(statement, &body_returns)?;
                block.record_return(statement, &alternative_returns)?;
                block.push(Statement::selection(guard, body, alternative));
            }

            StmtKind::While { test, body, orelse } => {
                if !orelse.is_empty() {
                    return Err(Diagnostic::unsupported_construct(statement, "else-block in 'While'"));
                }
                let guard = self.expressions().translate(test)?;
                let (body, returns) = self.translate_block(body)?;
                block.record_return(statement, &returns)?;
                block.push(Statement::pre_test_loop(guard, body));
            }

            StmtKind::For {
                target,
                iter,
                body,
                orelse,
            } => {
                if !orelse.is_empty() {
                    return Err(Diagnostic::unsupported_construct(statement, "else-block in 'For'"));
                }
                self.translate_counting_loop(statement, target, iter, body, block)?
            }

            StmtKind::Break {} => block.push(Statement::Break),
            StmtKind::Continue {} => block.push(Statement::Continue),

            StmtKind::Expr { value } => self.translate_expression_statement(statement, value, block)?,

            StmtKind::Raise { exc: Some(_) } => return Err(Diagnostic::unsupported(statement)),
            StmtKind::Raise { exc: None }
            | StmtKind::Pass {}
            | StmtKind::Delete {}
            | StmtKind::Import {}
            | StmtKind::ImportFrom {}
            | StmtKind::Assert {} => trace!("ignored {} at line {}", statement.kind_name(), statement.line()),

            _ => return Err(Diagnostic::unsupported(statement)),
        }
        Ok(())
    }

    /// Second pass over one function definition
    fn translate_procedure(&mut self, deferred: DeferredProcedure<'_>) -> Result<()> {
        debug!("translating body of {}", deferred.name);
        let (parameters, body, returns) = self.in_child_scope(|translator| {
            let parameters = deferred
                .args
                .args
                .iter()
                .enumerate()
                .map(|(position, arg)| -> Result<VariableId> {
                    let explicit_type = arg.annotation.as_ref().map(builtins::annotation_type).transpose()?;
                    Ok(translator.symbols.declare_variable(
                        &arg.arg,
                        explicit_type,
                        Some(deferred.name),
                        Some(position),
                    ))
                })
                .collect::<Result<Vec<_>>>()?;
            let (body, returns) = translator.translate_block(deferred.body)?;
            Ok((parameters, body, returns))
        })?;

        self.symbols
            .constrain_procedure_type(deferred.node, deferred.procedure, &returns)?;
        let procedure = self.symbols.procedure_mut(deferred.procedure);
        procedure.parameters = parameters;
        procedure.body = body;
        Ok(())
    }

    /// Run `translate` inside a fresh child scope, popped on every exit path
    fn in_child_scope<T>(&mut self, translate: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.symbols.push_scope();
        let result = translate(self);
        self.symbols.pop_scope();
        result
    }

    /// Variable `name` of the innermost scope, constrained to `ty`. Declared
    /// there with type `ty` if absent.
    fn bind(&mut self, node: &Expr, name: &str, ty: &Type, block: &mut Block) -> Result<VariableId> {
        match self.symbols.lookup_as_variable(node, name, false)? {
            Some(variable) => {
                self.symbols.constrain_variable_type(node, variable, ty)?;
                Ok(variable)
            }
            None => {
                let variable = self.symbols.declare_variable(name, Some(ty.clone()), None, None);
                block.push(Statement::Variable(variable));
                Ok(variable)
            }
        }
    }

    fn translate_assign(&mut self, targets: &[Expr], value: &Expr, block: &mut Block) -> Result<()> {
        let mut translated: Option<Expression> = None;
        for target in targets {
            if let Some(elements) = target.elements() {
                self.unpack(target, elements, value, block)?;
                continue;
            }
            let expression = match &translated {
                Some(expression) => expression.clone(),
                None => translated.insert(self.expressions().translate(value)?).clone(),
            };
            self.assign(target, expression, block)?;
        }
        Ok(())
    }

    /// `a, b = x, y` assigns element by element; nested patterns recurse
    fn unpack(&mut self, target: &Expr, targets: &[Expr], value: &Expr, block: &mut Block) -> Result<()> {
        let Some(values) = value.elements() else {
            return Err(Diagnostic::unsupported_construct(
                value,
                format!("unpacking of '{}'", value.kind_name()),
            ));
        };
        if targets.len() != values.len() {
            return Err(Diagnostic::structural(
                target,
                format!("Expected {} values, got {}", targets.len(), values.len()),
            ));
        }
        for (target, value) in targets.iter().zip(values) {
            match target.elements() {
                Some(elements) => self.unpack(target, elements, value, block)?,
                None => {
                    let expression = self.expressions().translate(value)?;
                    self.assign(target, expression, block)?;
                }
            }
        }
        Ok(())
    }

    fn assign(&mut self, target: &Expr, expression: Expression, block: &mut Block) -> Result<()> {
        match &target.kind {
            ExprKind::Name { id, .. } => {
                let variable = self.bind(target, id, &expression.ty(), block)?;
                block.push(Statement::assignment(variable, expression));
            }
            ExprKind::Subscript { value: base, slice, .. } => {
                let mut expressions = self.expressions();
                let variable = expressions.resolve_array(base)?;
                let index = expressions.translate_index(slice)?;
                self.symbols
                    .constrain_variable_type(target, variable, &Type::array_of(expression.ty()))?;
                block.push(Statement::array_assignment(variable, index, expression));
            }
            _ => require_kind(target, &["Name", "Subscript"])?,
        }
        Ok(())
    }

    /// `target op= value`, with the target read once
    fn translate_aug_assign(&mut self, target: &Expr, op: Operator, value: &Expr, block: &mut Block) -> Result<()> {
        let op = binary_operator(target, op)?;
        match &target.kind {
            ExprKind::Name { id, .. } => {
                let variable = self
                    .symbols
                    .lookup_as_variable(target, id, false)?
                    .ok_or_else(|| Diagnostic::missing_name(target, id.as_str()))?;
                let current = self.read(variable);
                let value = self.expressions().translate(value)?;
                let ty = Type::of_binary(op, &current.ty(), &value.ty());
                self.symbols.constrain_variable_type(target, variable, &ty)?;
                block.push(Statement::assignment(
                    variable,
                    Expression::binary(op, current, value, ty),
                ));
            }
            ExprKind::Subscript { value: base, slice, .. } => {
                let mut expressions = self.expressions();
                let variable = expressions.resolve_array(base)?;
                let index = expressions.translate_index(slice)?;
                let value = expressions.translate(value)?;
                let array = self.read(variable);
                let element = Expression::array_element(array.clone(), index.clone(), array.ty().element());
                let ty = Type::of_binary(op, &element.ty(), &value.ty());
                self.symbols
                    .constrain_variable_type(target, variable, &Type::array_of(ty.clone()))?;
                block.push(Statement::array_assignment(
                    variable,
                    index,
                    Expression::binary(op, element, value, ty),
                ));
            }
            _ => require_kind(target, &["Name", "Subscript"])?,
        }
        Ok(())
    }

    /// `for i in range(start, end, step): body` becomes
    ///
    /// ```text
    /// i = start
    /// while i != end:
    ///     body
    ///     i = i + step
    /// ```
    ///
    /// with `start` defaulting to 0 and `step` to 1.
    fn translate_counting_loop(
        &mut self,
        statement: &Stmt,
        target: &Expr,
        iter: &Expr,
        body: &[Stmt],
        block: &mut Block,
    ) -> Result<()> {
        require_kind(target, &["Name"])?;
        let name = target.identifier().unwrap_or_default();
        let variable = self.bind(target, name, &Type::Int, block)?;

        let bounds = match self.expressions().translate(iter)? {
            Expression::BuiltinCall { builtin, arguments, .. } if builtin == builtins::RANGE => arguments,
            _ => {
                return Err(Diagnostic::unsupported_construct(
                    statement,
                    "for (only 'in range' is supported)",
                ))
            }
        };
        let count = bounds.len();
        let mut bounds = bounds.into_iter();
        let (start, end, step) = match (count, bounds.next(), bounds.next(), bounds.next()) {
            (1, Some(end), _, _) => (Expression::int(0), end, Expression::int(1)),
            (2, Some(start), Some(end), _) => (start, end, Expression::int(1)),
            (3, Some(start), Some(end), Some(step)) => (start, end, step),
            _ => {
                return Err(Diagnostic::unsupported_construct(
                    iter,
                    format!("range with {} arguments", count),
                ))
            }
        };

        self.symbols.constrain_variable_type(target, variable, &start.ty())?;
        block.push(Statement::assignment(variable, start));

        let guard = Expression::binary(BinOp::Different, self.read(variable), end, Type::Boolean);
        let (mut statements, returns) = self.translate_block(body)?;
        let step_type = Type::of_binary(BinOp::Add, &self.symbols.type_of_variable(variable), &step.ty());
        self.symbols.constrain_variable_type(target, variable, &step_type)?;
        statements.push(Statement::assignment(
            variable,
            Expression::binary(BinOp::Add, self.read(variable), step, step_type),
        ));

        block.record_return(statement, &returns)?;
        block.push(Statement::pre_test_loop(guard, statements));
        Ok(())
    }

    fn translate_expression_statement(&mut self, statement: &Stmt, value: &Expr, block: &mut Block) -> Result<()> {
        match &value.kind {
            // docstring
            ExprKind::Constant { value: Constant::Str(_) } | ExprKind::Str { .. } => return Ok(()),
            ExprKind::Call { func, .. } => {
                if let Some(name) = func.identifier() {
                    if builtins::is_ignored_statement(name) && self.symbols.lookup(name, true).is_none() {
                        trace!("dropped call of {} at line {}", name, statement.line());
                        return Ok(());
                    }
                }
            }
            _ => {}
        }

        match self.expressions().translate(value)? {
            Expression::Call {
                procedure,
                arguments,
                ..
            } => block.push(Statement::call(procedure, arguments)),
            Expression::BuiltinCall {
                builtin, arguments, ..
            } if builtin == builtins::APPEND => block.push(Statement::builtin_call(builtin, arguments)),
            Expression::BuiltinCall { builtin, .. } => {
                return Err(Diagnostic::unsupported_construct(
                    statement,
                    format!("builtin function '{}'", builtin),
                ))
            }
            _ => {
                return Err(Diagnostic::unsupported_construct(
                    statement,
                    "expression statement (only 'Call' is supported)",
                ))
            }
        }
        Ok(())
    }
}

fn check_parameters(node: &Stmt, name: &str, args: &Arguments) -> Result<()> {
    if args.vararg.is_some() || args.kwarg.is_some() {
        return Err(Diagnostic::unsupported_construct(
            node,
            format!("variadic parameters of '{}'", name),
        ));
    }
    if !args.posonlyargs.is_empty() || !args.kwonlyargs.is_empty() {
        return Err(Diagnostic::unsupported_construct(
            node,
            format!("positional-only or keyword-only parameters of '{}'", name),
        ));
    }
    if !args.defaults.is_empty() {
        return Err(Diagnostic::unsupported_construct(
            node,
            format!("default parameter values of '{}'", name),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use serde_json::json;

    fn translate(body: Vec<serde_json::Value>) -> Result<(Vec<Statement>, SymbolTable)> {
        let mut symbols = symbols();
        let (statements, _) = StatementTranslator::new(&mut symbols).translate_block(&statements(body))?;
        Ok((statements, symbols))
    }

    #[test]
    fn test_counting_loop_desugars_to_pre_test_loop() {
        let (statements, _) = translate(vec![for_range(
            "i",
            vec![int(1), int(10), int(2)],
            vec![json!({ "_type": "Pass" })],
        )])
        .unwrap();

        let i = VariableId(0);
        let read = Expression::variable(i, Type::Int);
        assert_eq!(
            statements,
            vec![
                Statement::Variable(i),
                Statement::assignment(i, Expression::int(1)),
                Statement::pre_test_loop(
                    Expression::binary(BinOp::Different, read.clone(), Expression::int(10), Type::Boolean),
                    vec![Statement::assignment(
                        i,
                        Expression::binary(BinOp::Add, read, Expression::int(2), Type::Int)
                    )]
                ),
            ]
        );
    }

    #[test]
    fn test_single_bound_range_counts_from_zero() {
        let (statements, _) = translate(vec![for_range("k", vec![int(3)], vec![])]).unwrap();
        assert_eq!(statements[1], Statement::assignment(VariableId(0), Expression::int(0)));
        let Statement::Loop { guard, body } = &statements[2] else {
            panic!("expected a loop");
        };
        assert!(matches!(guard, Expression::BinaryOp { op: BinOp::Different, right, .. } if **right == Expression::int(3)));
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn test_loop_over_non_range_is_unsupported() {
        let loop_over_list = json!({
            "_type": "For", "lineno": 4, "target": store("x"),
            "iter": { "_type": "List", "elts": [int(1)] }, "body": [], "orelse": []
        });
        assert_eq!(
            translate(vec![loop_over_list]).unwrap_err().to_string(),
            "Unsupported for (only 'in range' is supported) at line 4"
        );
    }

    #[test]
    fn test_tuple_unpacking_assigns_elementwise() {
        let (statements, symbols) = translate(vec![assign(
            tuple(vec![store("a"), store("b")]),
            tuple(vec![int(1), constant(json!("x"))]),
        )])
        .unwrap();

        assert_eq!(statements.len(), 4);
        assert_eq!(symbols.type_of_variable(VariableId(0)), Type::Int);
        assert_eq!(symbols.type_of_variable(VariableId(1)), Type::String);

        let mismatch = assign(tuple(vec![store("a"), store("b")]), tuple(vec![int(1)]));
        assert!(matches!(translate(vec![mismatch]), Err(Diagnostic::Structural { .. })));

        let from_call = assign(tuple(vec![store("a"), store("b")]), call("f", vec![]));
        assert!(matches!(translate(vec![from_call]), Err(Diagnostic::Unsupported { .. })));
    }

    #[test]
    fn test_swap_reads_already_assigned_values() {
        let (statements, _) = translate(vec![
            assign(store("a"), int(1)),
            assign(store("b"), int(2)),
            assign(tuple(vec![store("a"), store("b")]), tuple(vec![name("b"), name("a")])),
        ])
        .unwrap();

        let (a, b) = (VariableId(0), VariableId(1));
        assert_eq!(statements.len(), 6);
        assert_eq!(
            statements[4..],
            [
                Statement::Assignment { variable: a, expression: Expression::variable(b, Type::Int) },
                Statement::Assignment { variable: b, expression: Expression::variable(a, Type::Int) },
            ]
        );
    }

    #[test]
    fn test_reassignment_must_keep_its_type() {
        let error = translate(vec![
            assign(store("x"), int(1)),
            json!({ "_type": "Assign", "lineno": 2, "targets": [store("x")], "value": constant(json!("a")) }),
        ])
        .unwrap_err();
        assert_eq!(error.to_string(), "Unsupported multiple types for 'x' (int, string) at line 0");

        // unknown never narrows or conflicts
        let (statements, symbols) =
            translate(vec![assign(store("x"), int(1)), assign(store("x"), constant(json!(null)))]).unwrap();
        assert_eq!(statements.len(), 3);
        assert_eq!(symbols.type_of_variable(VariableId(0)), Type::Int);
    }

    #[test]
    fn test_subscript_assignment_widens_base() {
        let (statements, symbols) = translate(vec![
            assign(store("xs"), json!({ "_type": "List", "elts": [] })),
            assign(subscript("xs", int(0)), constant(json!(2.5))),
        ])
        .unwrap();

        assert_eq!(symbols.type_of_variable(VariableId(0)), Type::array_of(Type::Double));
        assert!(matches!(
            &statements[2],
            Statement::ArrayAssignment { target, indexes, .. } if *target == VariableId(0) && indexes.len() == 1
        ));

        let builtin = translate(vec![assign(subscript("int", int(0)), int(1))]).unwrap_err();
        assert!(matches!(builtin, Diagnostic::Unsupported { .. }));
    }

    #[test]
    fn test_augmented_assignment() {
        let (statements, _) = translate(vec![
            assign(store("n"), int(1)),
            json!({ "_type": "AugAssign", "target": store("n"), "op": { "_type": "Mult" }, "value": int(3) }),
        ])
        .unwrap();
        let n = VariableId(0);
        assert_eq!(
            statements[2],
            Statement::assignment(
                n,
                Expression::binary(BinOp::Mul, Expression::variable(n, Type::Int), Expression::int(3), Type::Int)
            )
        );

        let undeclared = json!({ "_type": "AugAssign", "target": store("m"), "op": { "_type": "Add" }, "value": int(3) });
        assert!(translate(vec![undeclared]).unwrap_err().is_missing_name());
    }

    #[test]
    fn test_annotated_assignment_declares_explicit_type() {
        let annotated = json!({
            "_type": "AnnAssign", "target": store("total"), "annotation": name("float"), "value": constant(json!(0.0))
        });
        let (statements, symbols) = translate(vec![annotated]).unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(symbols.type_of_variable(VariableId(0)), Type::Double);

        let mismatched = json!({
            "_type": "AnnAssign", "target": store("total"), "annotation": name("int"), "value": constant(json!("zero"))
        });
        assert!(translate(vec![mismatched]).is_err());
    }

    #[test]
    fn test_procedures_see_later_siblings() {
        let (_, symbols) = translate(vec![
            function_def("first", &[], vec![ret(call("second", vec![]))]),
            function_def("second", &[], vec![ret(int(1))]),
        ])
        .unwrap();

        let declarations = symbols.into_declarations();
        assert_eq!(declarations.procedures.len(), 2);
        assert_eq!(declarations.procedures[1].ty, Type::Int);
        assert!(declarations.procedures[1].called);
        assert!(!declarations.procedures[0].called);
    }

    #[test]
    fn test_mutually_recursive_procedures() {
        let parity = |procedure: &str, base: bool, other: &str| {
            function_def(
                procedure,
                &["n"],
                vec![
                    json!({
                        "_type": "If", "test": compare(name("n"), "Eq", int(0)),
                        "body": [ret(constant(json!(base)))], "orelse": []
                    }),
                    ret(call(other, vec![binop(name("n"), "Sub", int(1))])),
                ],
            )
        };
        let (_, symbols) = translate(vec![parity("even", true, "odd"), parity("odd", false, "even")]).unwrap();

        let declarations = symbols.into_declarations();
        assert_eq!(declarations.procedures.len(), 2);
        for procedure in &declarations.procedures {
            assert_eq!(procedure.ty, Type::Boolean);
            assert!(procedure.called);
        }
    }

    #[test]
    fn test_nested_returns_stay_in_the_nested_procedure() {
        let (_, symbols) = translate(vec![function_def(
            "outer",
            &[],
            vec![
                function_def("inner", &[], vec![ret(constant(json!("text")))]),
                ret(int(1)),
            ],
        )])
        .unwrap();

        let declarations = symbols.into_declarations();
        let type_of = |wanted: &str| {
            declarations
                .procedures
                .iter()
                .find(|procedure| procedure.name.as_deref() == Some(wanted))
                .map(|procedure| procedure.ty.clone())
        };
        assert_eq!(type_of("outer"), Some(Type::Int));
        assert_eq!(type_of("inner"), Some(Type::String));
    }

    #[test]
    fn test_parameters_are_scoped_to_the_body() {
        let error = translate(vec![
            function_def("f", &["a"], vec![ret(name("a"))]),
            function_def("g", &[], vec![ret(name("a"))]),
        ])
        .unwrap_err();
        assert_eq!(error, Diagnostic::MissingName { name: "a".to_string(), line: 0 });
    }

    #[test]
    fn test_scope_is_popped_when_a_body_fails() {
        let mut symbols = symbols();
        let body = statements(vec![function_def("f", &["a"], vec![json!({ "_type": "ClassDef" })])]);
        assert!(StatementTranslator::new(&mut symbols).translate_block(&body).is_err());
        assert_eq!(symbols.depth(), 1);
    }

    #[test]
    fn test_conflicting_returns_across_branches() {
        let branches = json!({
            "_type": "If", "lineno": 2, "test": name("c"),
            "body": [ret(int(1))], "orelse": [ret(constant(json!("one")))]
        });
        let error = translate(vec![function_def("f", &["c"], vec![branches])]).unwrap_err();
        assert_eq!(error.to_string(), "Unsupported multiple types for return value (int, string) at line 2");
    }

    #[test]
    fn test_expression_statements() {
        let (statements, _) = translate(vec![
            expr(constant(json!("docstring"))),
            expr(call("print", vec![json!({ "_type": "JoinedStr" })])),
            assign(store("xs"), json!({ "_type": "List", "elts": [] })),
            expr(json!({
                "_type": "Call",
                "func": { "_type": "Attribute", "value": name("xs"), "attr": "append" },
                "args": [int(1)]
            })),
        ])
        .unwrap();
        assert_eq!(statements.len(), 3);
        assert!(matches!(&statements[2], Statement::BuiltinCall { builtin, arguments } if builtin == "append" && arguments.len() == 2));

        let arithmetic = translate(vec![expr(binop(int(1), "Add", int(2)))]).unwrap_err();
        assert_eq!(
            arithmetic.to_string(),
            "Unsupported expression statement (only 'Call' is supported) at line 0"
        );
        let builtin = translate(vec![expr(call("abs", vec![int(1)]))]).unwrap_err();
        assert_eq!(builtin.to_string(), "Unsupported builtin function 'abs' at line 0");
    }

    #[test]
    fn test_ignored_and_unsupported_statements() {
        let (statements, _) = translate(vec![
            json!({ "_type": "Pass" }),
            json!({ "_type": "Import" }),
            json!({ "_type": "Assert" }),
            json!({ "_type": "Raise" }),
        ])
        .unwrap();
        assert!(statements.is_empty());

        let class = json!({ "_type": "ClassDef", "lineno": 3 });
        assert_eq!(translate(vec![class]).unwrap_err().to_string(), "Unsupported 'ClassDef' at line 3");

        let while_else = json!({
            "_type": "While", "lineno": 5, "test": constant(json!(true)),
            "body": [{ "_type": "Break" }], "orelse": [{ "_type": "Pass" }]
        });
        assert_eq!(
            translate(vec![while_else]).unwrap_err().to_string(),
            "Unsupported else-block in 'While' at line 5"
        );
    }

    #[test]
    fn test_nested_blocks() {
        let (statements, _) = translate(vec![json!({
            "_type": "While", "test": constant(json!(true)),
            "body": [
                { "_type": "If", "test": constant(json!(false)), "body": [{ "_type": "Break" }], "orelse": [{ "_type": "Continue" }] }
            ],
            "orelse": []
        })])
        .unwrap();

        let Statement::Loop { body, .. } = &statements[0] else {
            panic!("expected a loop");
        };
        let Statement::Selection { body, alternative, .. } = &body[0] else {
            panic!("expected a selection");
        };
        assert_eq!(body, &vec![Statement::Break]);
        assert_eq!(alternative, &vec![Statement::Continue]);
    }
}
