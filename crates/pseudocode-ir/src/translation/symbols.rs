// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Symbol table
//!
//! Owns every declaration made during one translation together with the stack
//! of lexical scopes that make them visible. The outermost scope is the module
//! scope and is never popped. Each scope maps a source name to at most one
//! declaration; procedures and variables share that namespace.

use crate::data::declarations::{Declaration, Procedure, ProcedureId, Variable, VariableId};
use crate::data::naming::IdSource;
use crate::data::signatures::{Signature, SignatureTable};
use crate::data::types::Type;
use crate::data::variables::VariableRegistry;
use crate::diagnostics::{Diagnostic, Result};
use crate::syntax::Located;
use log::{debug, trace};
use std::collections::BTreeMap;
use std::fmt;

type Scope = BTreeMap<String, Declaration>;

/// Everything declared by a finished translation
#[derive(Debug)]
pub struct Declarations {
    pub procedures: Vec<Procedure>,
    pub variables: Vec<Variable>,
    pub registry: VariableRegistry,
}

impl Declarations {
    pub fn procedure(&self, id: ProcedureId) -> &Procedure {
        &self.procedures[id.0]
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.0]
    }
}

pub struct SymbolTable {
    ids: Box<dyn IdSource>,
    scopes: Vec<Scope>,
    procedures: Vec<Procedure>,
    variables: Vec<Variable>,
    registry: VariableRegistry,
    /// Read-only knowledge supplied by the caller
    signatures: SignatureTable,
    /// Call-site argument types of procedures with no supplied signature
    captured: SignatureTable,
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("scopes", &self.scopes)
            .field("procedures", &self.procedures)
            .field("variables", &self.variables)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl SymbolTable {
    pub fn new(ids: Box<dyn IdSource>) -> Self {
        Self {
            ids,
            scopes: vec![Scope::new()],
            procedures: vec![],
            variables: vec![],
            registry: VariableRegistry::new(),
            signatures: SignatureTable::new(),
            captured: SignatureTable::new(),
        }
    }

    pub fn with_signatures(mut self, signatures: SignatureTable) -> Self {
        self.signatures = signatures;
        self
    }

    // ------------------------------------------------------------------------
    // Scopes

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
        trace!("entered scope at depth {}", self.depth());
    }

    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            trace!("left scope, now at depth {}", self.depth());
        }
    }

    /// Number of open scopes, the module scope included
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn innermost(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    // ------------------------------------------------------------------------
    // Declarations

    /// Declare a procedure in the innermost scope. Anonymous procedures are
    /// recorded but never bound to a name.
    ///
    /// The initial result type is the explicit one if given, else the one from
    /// the signature table, else `unknown`.
    pub fn declare_procedure(&mut self, name: Option<&str>, explicit_type: Option<Type>) -> ProcedureId {
        let id = ProcedureId(self.procedures.len());
        let ty = explicit_type
            .or_else(|| {
                name.and_then(|name| self.signatures.get(name))
                    .map(|signature| signature.return_type.clone())
            })
            .unwrap_or_default();
        let uuid = self.ids.fresh();
        debug!(
            "declared procedure {} as {} with type {}",
            name.unwrap_or("<module>"),
            uuid,
            ty
        );
        self.procedures.push(Procedure {
            uuid,
            name: name.map(str::to_string),
            ty,
            parameters: vec![],
            body: vec![],
            called: false,
        });
        if let Some(name) = name {
            self.innermost().insert(name.to_string(), Declaration::Procedure(id));
        }
        id
    }

    /// Declare a variable in the innermost scope.
    ///
    /// A parameter passes the name of its owning procedure and its position so
    /// that its type can be seeded from the signature table when no explicit
    /// type is given.
    pub fn declare_variable(
        &mut self,
        name: &str,
        explicit_type: Option<Type>,
        owner: Option<&str>,
        position: Option<usize>,
    ) -> VariableId {
        let id = VariableId(self.variables.len());
        let ty = explicit_type
            .or_else(|| {
                let signature = self.signatures.get(owner?)?;
                signature.argument_type(name, position?)
            })
            .unwrap_or_default();
        let uuid = self.ids.fresh();
        debug!("declared variable {} as {} with type {}", name, uuid, ty);
        self.variables.push(Variable {
            uuid,
            name: name.to_string(),
        });
        self.registry.register(id, ty);
        self.innermost().insert(name.to_string(), Declaration::Variable(id));
        id
    }

    // ------------------------------------------------------------------------
    // Lookup

    /// Innermost declaration of `name`; only the innermost scope unless
    /// `search_enclosing` is set.
    pub fn lookup(&self, name: &str, search_enclosing: bool) -> Option<Declaration> {
        let visible = if search_enclosing { self.scopes.len() } else { 1 };
        self.scopes
            .iter()
            .rev()
            .take(visible)
            .find_map(|scope| scope.get(name).copied())
    }

    /// Resolve `name` to a variable. `Ok(None)` when nothing is declared, an
    /// error when the name is bound to a procedure.
    pub fn lookup_as_variable(
        &self,
        node: &impl Located,
        name: &str,
        search_enclosing: bool,
    ) -> Result<Option<VariableId>> {
        match self.lookup(name, search_enclosing) {
            None => Ok(None),
            Some(Declaration::Variable(id)) => Ok(Some(id)),
            Some(Declaration::Procedure(_)) => Err(Diagnostic::structural(
                node,
                format!("Expected variable '{}', got procedure", name),
            )),
        }
    }

    /// Resolve `name` as the target of a call. On success the procedure is
    /// marked as called, and the argument types are captured as its signature
    /// if none is known for it yet.
    pub fn lookup_as_procedure(
        &mut self,
        node: &impl Located,
        name: &str,
        search_enclosing: bool,
        argument_types: &[Type],
    ) -> Result<Option<ProcedureId>> {
        let id = match self.lookup(name, search_enclosing) {
            None => return Ok(None),
            Some(Declaration::Procedure(id)) => id,
            Some(Declaration::Variable(_)) => {
                return Err(Diagnostic::structural(
                    node,
                    format!("Expected procedure '{}', got variable", name),
                ))
            }
        };

        self.procedures[id.0].called = true;
        if !self.signatures.contains(name) && !self.captured.contains(name) {
            let signature = argument_types
                .iter()
                .fold(Signature::new(self.procedures[id.0].ty.clone()), |signature, ty| {
                    signature.with_argument(None, ty.clone())
                });
            debug!("captured call signature of {}", name);
            self.captured.insert(name, signature);
        }
        Ok(Some(id))
    }

    // ------------------------------------------------------------------------
    // Types

    pub fn type_of_variable(&self, id: VariableId) -> Type {
        self.registry.get_type(id)
    }

    /// Unify `ty` into the variable's known type
    pub fn constrain_variable_type(&mut self, node: &impl Located, id: VariableId, ty: &Type) -> Result<Type> {
        self.registry.constrain(id, ty).map_err(|existing| {
            Diagnostic::unsupported_construct(
                node,
                format!(
                    "multiple types for '{}' ({}, {})",
                    self.variables[id.0].name, existing, ty
                ),
            )
        })
    }

    /// Unify `ty` into the procedure's result type
    pub fn constrain_procedure_type(&mut self, node: &impl Located, id: ProcedureId, ty: &Type) -> Result<Type> {
        let procedure = &mut self.procedures[id.0];
        match procedure.ty.unify(ty) {
            Some(unified) => {
                procedure.ty = unified.clone();
                Ok(unified)
            }
            None => Err(Diagnostic::unsupported_construct(
                node,
                format!(
                    "multiple types for return value of '{}' ({}, {})",
                    procedure.display_name(),
                    procedure.ty,
                    ty
                ),
            )),
        }
    }

    // ------------------------------------------------------------------------
    // Accessors

    pub fn procedure(&self, id: ProcedureId) -> &Procedure {
        &self.procedures[id.0]
    }

    pub fn procedure_mut(&mut self, id: ProcedureId) -> &mut Procedure {
        &mut self.procedures[id.0]
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.0]
    }

    /// Names of the procedures reached by at least one call, in declaration order
    pub fn called_procedures(&self) -> Vec<String> {
        self.procedures
            .iter()
            .filter(|procedure| procedure.called)
            .filter_map(|procedure| procedure.name.clone())
            .collect()
    }

    pub fn captured_signatures(&self) -> &SignatureTable {
        &self.captured
    }

    pub fn into_declarations(self) -> Declarations {
        Declarations {
            procedures: self.procedures,
            variables: self.variables,
            registry: self.registry,
        }
    }
}
